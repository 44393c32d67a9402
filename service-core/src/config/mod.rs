use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Listener settings shared by every service binary.
///
/// Read from `SERVICE_HOST` / `SERVICE_PORT`, with an optional
/// `configuration` file underneath.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("SERVICE"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_target_localhost() {
        std::env::remove_var("SERVICE_HOST");
        std::env::remove_var("SERVICE_PORT");

        let config = Config::load().unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert_eq!(config.address(), "localhost:8080");
    }

    #[test]
    #[serial]
    fn environment_overrides_defaults() {
        std::env::set_var("SERVICE_HOST", "0.0.0.0");
        std::env::set_var("SERVICE_PORT", "9090");

        let config = Config::load().unwrap();
        assert_eq!(config.address(), "0.0.0.0:9090");

        std::env::remove_var("SERVICE_HOST");
        std::env::remove_var("SERVICE_PORT");
    }

    #[test]
    #[serial]
    fn malformed_port_is_a_config_error() {
        std::env::set_var("SERVICE_PORT", "not-a-port");

        let result = Config::load();
        assert!(matches!(result, Err(AppError::ConfigError(_))));

        std::env::remove_var("SERVICE_PORT");
    }
}
