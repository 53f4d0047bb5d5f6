//! Diagnostic logging setup (stderr, filtered).

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured `log_level`.
pub const LOG_ENV: &str = "SITELOGGER_LOG";

pub fn init(cfg: &Config) -> AppResult<()> {
    let env_filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cfg.log_level).map_err(|e| {
            AppError::Config(format!("invalid log_level '{}': {}", cfg.log_level, e))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Other(format!("telemetry error: {}", e)))
}
