//! core::config
//!
//! Configuration loading.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$CF_HOME/config.toml` if `CF_HOME` is set
//! 2. `~/.cfkit/config.toml`
//!
//! A missing file is not an error: defaults are used, which means no
//! session and no target.
//!
//! # Example
//!
//! ```no_run
//! use cfkit::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! if config.is_logged_in() {
//!     println!("API: {:?}", config.api_endpoint);
//! }
//! ```

pub mod schema;

pub use schema::{Config, TargetRef};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the configuration directory.
pub const CF_HOME_ENV: &str = "CF_HOME";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read,
    /// parsed, or validated.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    ///
    /// Missing files yield `Config::default()`.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve the config file path.
    ///
    /// Honors `$CF_HOME`, otherwise `~/.cfkit/config.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(home) = std::env::var_os(CF_HOME_ENV) {
            return Ok(PathBuf::from(home).join("config.toml"));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".cfkit/config.toml"))
    }
}
