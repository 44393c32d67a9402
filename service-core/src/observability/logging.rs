use crate::error::AppError;
use std::str::FromStr;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Output encoding for the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Flattened JSON events with file/line, for log shippers.
    Json,
    /// Human-readable lines for local development.
    Pretty,
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `log_level` must be a plain level name
/// (`trace`, `debug`, `info`, `warn`, `error`, `off`).
pub fn init_tracing(log_level: &str, format: LogFormat) -> Result<(), AppError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = LevelFilter::from_str(log_level).map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid log level '{}': {}", log_level, e))
            })?;
            EnvFilter::new(level.to_string()).add_directive(
                "sqlx=warn"
                    .parse()
                    .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
            )
        }
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .flatten_event(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
    };

    result.map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to init tracing: {}", e)))
}
