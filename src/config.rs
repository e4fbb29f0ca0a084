//! Configuration management for chatbridge
//!
//! Parses TOML configuration files and provides typed access to settings.
//! Every section is optional; a missing section takes its defaults.

use crate::error::{AppError, AppResult};
use crate::provider_error::ErrorProvider;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub errors: ErrorsConfig,
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Provider error extraction settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorsConfig {
    /// Schema used to read structured payloads out of provider error text
    #[serde(default)]
    pub provider: ErrorProvider,
    /// Message returned to clients when no structured error can be extracted
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            provider: ErrorProvider::default(),
            fallback_message: default_fallback_message(),
        }
    }
}

fn default_fallback_message() -> String {
    "internal server error".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            })?;

        let config: Self = toml::from_str(&content).map_err(|source| {
            AppError::ConfigParseFailed {
                path: path_display,
                source,
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                path = %path.as_ref().display(),
                "Configuration file not found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration after parsing
    ///
    /// Called by `from_file()` and `from_str()`.
    pub fn validate(&self) -> AppResult<()> {
        let level = self.observability.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::Config(format!(
                "observability.log_level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.observability.log_level
            )));
        }

        if self.errors.fallback_message.trim().is_empty() {
            return Err(AppError::Config(
                "errors.fallback_message cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}
