use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

use super::types::{Config, MAX_PAGE_SIZE};

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

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/pkgsearch/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("pkgsearch").join("config.toml")
    }

    /// Loads and validates configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::read_default()?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the default config file without validating.
    ///
    /// A missing file yields `Config::default()`.
    pub fn read_default() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::read_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses `path` without validating, so callers can apply
    /// overrides first.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "read config");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The registry base URL is an http(s) URL
    /// - Both timeouts are non-zero
    /// - The page size is within `1..=MAX_PAGE_SIZE`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let registry = &self.registry;

        match Url::parse(&registry.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "registry.base_url must use http or https, got '{}'",
                        url.scheme()
                    ),
                });
            }
            Err(e) => {
                return Err(ConfigError::ValidationError {
                    message: format!("registry.base_url '{}' is invalid: {}", registry.base_url, e),
                });
            }
        }

        if registry.timeout_seconds == 0 || registry.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "registry timeouts must be at least 1 second".to_string(),
            });
        }

        if !(1..=MAX_PAGE_SIZE).contains(&registry.page_size) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "registry.page_size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, registry.page_size
                ),
            });
        }

        Ok(())
    }
}
