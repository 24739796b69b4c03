//! Configuration for the vitra login screen.
//!
//! Settings are read from `config.toml` in the platform config directory.
//! A missing file yields defaults; missing keys take their default values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Bounds for the frame interval in milliseconds.
const MIN_FRAME_INTERVAL_MS: u64 = 8;
const MAX_FRAME_INTERVAL_MS: u64 = 1000;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub animation: AnimationConfig,
    pub login: LoginConfig,
    pub logging: LoggingConfig,
}

/// Background animation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Target time between frames.
    pub frame_interval_ms: u64,
    /// Fixed seed for the line field; random when absent.
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 33,
            seed: None,
        }
    }
}

impl AnimationConfig {
    /// Frame interval clamped to a sane range.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(
            self.frame_interval_ms
                .clamp(MIN_FRAME_INTERVAL_MS, MAX_FRAME_INTERVAL_MS),
        )
    }
}

/// Login form settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoginConfig {
    /// How long the simulated sign-in takes.
    pub submit_delay_ms: u64,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
        }
    }
}

impl LoginConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when `VITRA_LOG` is unset.
    pub level: String,
    /// Log file; logging is disabled when absent since the terminal owns stdout.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(source) => Self::from_toml(&source),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load configuration from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Platform path of the config file, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vitra").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}
