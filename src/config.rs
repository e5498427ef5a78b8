//! Process configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use vigil_core::{DaemonError, LogConfig, Result, SupervisorConfig};
use vigil_dispatch::{DispatcherConfig, WeatherConfig};

/// Top-level TOML document. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `[log]`
    pub log: LogConfig,
    /// `[supervisor]`
    pub supervisor: SupervisorConfig,
    /// `[dispatcher]`
    pub dispatcher: DispatcherConfig,
    /// `[weather]`
    pub weather: WeatherConfig,
}

impl AppConfig {
    /// Validates every section.
    ///
    /// # Errors
    /// Returns the first section error as `DaemonError::Config`.
    pub fn validate(&self) -> Result<()> {
        self.log.validate()?;
        self.dispatcher
            .validate()
            .and_then(|()| self.weather.validate())
            .map_err(|e| DaemonError::config(e.to_string()))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DaemonError::config(format!("failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DaemonError::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns validated defaults.
    ///
    /// # Errors
    /// Same as [`AppConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }
}
