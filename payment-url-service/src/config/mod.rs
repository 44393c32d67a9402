use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::observability::LogFormat;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub database: DatabaseConfig,
    pub assets: AssetsConfig,
    pub response_mode: ResponseMode,
    /// How long in-flight requests may drain after a shutdown signal.
    pub shutdown_grace: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn log_format(&self) -> LogFormat {
        match self {
            Environment::Development => LogFormat::Pretty,
            Environment::Production => LogFormat::Json,
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// How payment-url responses fill the HTTP status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Status line is always 400; the semantic status lives in `body.code`.
    #[default]
    Compat,
    /// Status line mirrors `body.code`, and catalog outages surface as 500.
    Strict,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub name: String,
    pub password: Secret<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct AssetsConfig {
    pub provider_file_path: PathBuf,
    pub stores_file_path: PathBuf,
}

impl PaymentConfig {
    pub fn from_env() -> Result<Self, AppError> {
        // Also loads .env for the variables read below.
        let common = core_config::Config::load()?;

        let environment: Environment = get_env("ENVIRONMENT", "development")
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let strict: bool = parse_env("STRICT_STATUS_CODES", "false")?;

        let config = PaymentConfig {
            common,
            environment,
            service_name: get_env("SERVICE_NAME", "payment-url-service"),
            log_level: get_env("LOG_LEVEL", "info"),
            database: DatabaseConfig {
                host: get_env("DB_HOST", "localhost"),
                port: parse_env("DB_PORT", "5432")?,
                user: get_env("DB_USER", "postgres"),
                name: get_env("DB_NAME", "postgres"),
                password: Secret::new(get_env("DB_PASS", "adminlol")),
                max_connections: parse_env("DB_MAX_CONNECTIONS", "5")?,
            },
            assets: AssetsConfig {
                provider_file_path: PathBuf::from(get_env(
                    "PROVIDER_FILE_PATH",
                    "./assets/providers.json",
                )),
                stores_file_path: PathBuf::from(get_env("STORES_FILE_PATH", "./assets/stores.json")),
            },
            response_mode: if strict {
                ResponseMode::Strict
            } else {
                ResponseMode::Compat
            },
            shutdown_grace: Duration::from_secs(parse_env("SHUTDOWN_GRACE_SECONDS", "5")?),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.database.max_connections == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "DB_MAX_CONNECTIONS must be greater than 0"
            )));
        }

        Ok(())
    }
}

/// Unset and empty variables both fall back to the default.
fn get_env(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(val) if !val.is_empty() => val,
        _ => default.to_string(),
    }
}

fn parse_env<T>(key: &str, default: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(key, default);
    raw.parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}
