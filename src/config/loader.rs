use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, QrBox};

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
    /// Uses `~/.config/qrquest/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("qrquest").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()` unvalidated,
    ///   since the endpoint may still come from the command line.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        if !config.api.endpoint.is_empty() {
            config.validate()?;
        }
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The API endpoint is set and is an http(s) URL
    /// - Scanner frame rate and capture region are usable
    /// - UI timings are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.api.endpoint.trim();
        if endpoint.is_empty() {
            return Err(invalid(
                "api.endpoint must be set (config file or --endpoint)".to_string(),
            ));
        }
        match reqwest::Url::parse(endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(invalid(format!(
                    "api.endpoint must use http or https, got '{}'",
                    url.scheme()
                )))
            }
            Err(err) => {
                return Err(invalid(format!(
                    "api.endpoint '{}' is not a valid URL: {}",
                    endpoint, err
                )))
            }
        }

        if !(1..=60).contains(&self.scanner.fps) {
            return Err(invalid(format!(
                "scanner.fps must be between 1 and 60, got {}",
                self.scanner.fps
            )));
        }

        match self.scanner.qrbox {
            QrBox::Pixels(0) => {
                return Err(invalid("scanner.qrbox must be greater than 0".to_string()))
            }
            QrBox::Fraction(f) if !(f > 0.0 && f <= 1.0) => {
                return Err(invalid(format!(
                    "scanner.qrbox fraction must be in (0, 1], got {}",
                    f
                )))
            }
            _ => {}
        }

        if self.ui.message_ttl_ms == 0 {
            return Err(invalid("ui.message_ttl_ms must be greater than 0".to_string()));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(invalid("ui.tick_rate_ms must be greater than 0".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError { message }
}
