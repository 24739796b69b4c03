//! File logging setup.
//!
//! The terminal owns stdout and stderr while the screen is up, so logs only go
//! to a file, and only when one is configured.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use tracing_subscriber::EnvFilter;
use vitra_config::LoggingConfig;

/// Environment variable holding the log filter.
pub const LOG_FILTER_ENV: &str = "VITRA_LOG";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV: &str = "VITRA_LOG_FILE";

/// Resolve where logs should go, preferring the environment over config.
pub fn log_path(config: &LoggingConfig) -> Option<PathBuf> {
    env::var_os(LOG_FILE_ENV)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(|| config.file.clone())
}

/// Install the global subscriber. Returns false when logging is disabled.
pub fn init(config: &LoggingConfig) -> color_eyre::Result<bool> {
    let Some(path) = log_path(config) else {
        return Ok(false);
    };
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install logger: {e}"))?;
    Ok(true)
}
