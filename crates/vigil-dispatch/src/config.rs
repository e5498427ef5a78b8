//! `[dispatcher]` and `[weather]` configuration sections.

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vigil_core::config::{humantime_serde, validate_daemon_name};

use crate::error::{DispatchError, Result};

/// Default daemon name of the dispatcher.
pub const DEFAULT_DAEMON_NAME: &str = "sr05-service";

/// Default upstream forecast endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// `[dispatcher]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Name the daemon is registered under.
    pub name: String,

    /// Listen address.
    pub bind_addr: SocketAddr,

    /// Recorded on the descriptor, never waited on.
    #[serde(with = "humantime_serde")]
    pub startup_grace: Duration,

    /// Recorded on the descriptor, never waited on.
    #[serde(with = "humantime_serde")]
    pub shutdown_grace: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DAEMON_NAME.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            startup_grace: Duration::from_secs(5),
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

impl DispatcherConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if the daemon name is invalid.
    pub fn validate(&self) -> Result<()> {
        validate_daemon_name(&self.name)
            .map_err(|e| DispatchError::config(format!("dispatcher.name: {e}")))
    }
}

/// `[weather]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Forecast endpoint, query string excluded.
    pub base_url: String,

    /// Whole-request timeout for upstream calls.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Timezone requested from the upstream.
    pub timezone: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            timezone: "UTC".to_string(),
        }
    }
}

impl WeatherConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if the URL scheme is not http(s), the timeout is
    /// zero, or the timezone is blank.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(DispatchError::config(
                "weather.base_url must start with http:// or https://",
            ));
        }
        if self.timeout.is_zero() {
            return Err(DispatchError::config("weather.timeout must be non-zero"));
        }
        if self.timezone.trim().is_empty() {
            return Err(DispatchError::config("weather.timezone cannot be empty"));
        }
        Ok(())
    }
}
