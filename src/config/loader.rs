use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

use crate::config::types::ClientConfig;

/// Environment variable that overrides `base_url` after loading.
pub const BASE_URL_ENV: &str = "RECORDS_BASE_URL";

/// Upper bound for each configured timeout (one day).
pub const MAX_TIMEOUT_SECONDS: u64 = 24 * 60 * 60;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ClientConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `<config_dir>/records-client/config.toml` via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("records-client").join("config.toml")
    }

    /// Loads configuration from the default config file, then applies the
    /// `RECORDS_BASE_URL` override.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
            config.validate()?;
        }
        Ok(config)
    }

    /// Loads configuration from an explicit path.
    ///
    /// - If the file doesn't exist, returns `ClientConfig::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ClientConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `base_url` is an absolute http(s) URL
    /// - every timeout is between 1 second and a day
    /// - the page limit is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("Invalid base_url '{}': {}", self.base_url, e),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!("base_url '{}' must use http or https", self.base_url),
            });
        }

        let timeouts = &self.timeouts;
        if timeouts.connect_seconds == 0 || timeouts.read_seconds == 0 || timeouts.write_seconds == 0
        {
            return Err(ConfigError::ValidationError {
                message: "Timeouts must be at least 1 second".to_string(),
            });
        }

        if timeouts.connect_seconds > MAX_TIMEOUT_SECONDS
            || timeouts.read_seconds > MAX_TIMEOUT_SECONDS
            || timeouts.write_seconds > MAX_TIMEOUT_SECONDS
        {
            return Err(ConfigError::ValidationError {
                message: format!("Timeouts must be at most {} seconds", MAX_TIMEOUT_SECONDS),
            });
        }

        if self.page.limit == 0 {
            return Err(ConfigError::ValidationError {
                message: "page.limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
