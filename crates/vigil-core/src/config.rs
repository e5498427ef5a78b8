//! Supervisor and logging configuration.
//!
//! Values are validated at load time with sensible defaults. Durations are
//! written as human-readable strings (`"2s"`, `"500ms"`).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DaemonError, Result};
use crate::supervisor::DEFAULT_SHUTDOWN_GRACE;

/// `[supervisor]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// Process-wide delay between the shutdown signal and exit.
    #[serde(default = "default_shutdown_grace")]
    #[serde(with = "humantime_serde")]
    pub shutdown_grace: Duration,
}

fn default_shutdown_grace() -> Duration {
    DEFAULT_SHUTDOWN_GRACE
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            shutdown_grace: default_shutdown_grace(),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl LogConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if the filter is blank.
    pub fn validate(&self) -> Result<()> {
        if self.filter.trim().is_empty() {
            return Err(DaemonError::config("log.filter cannot be empty"));
        }
        Ok(())
    }
}

/// Validates a daemon name: non-empty, alphanumerics, `-` and `_` only.
///
/// # Errors
/// Returns an error describing the first violated rule.
pub fn validate_daemon_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DaemonError::config("daemon name cannot be empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DaemonError::config(
            "daemon name must contain only alphanumeric characters, hyphens, and underscores",
        ));
    }
    Ok(())
}

/// Serde helper for humantime durations.
pub mod humantime_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes a duration as a humantime string.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    /// Deserializes a duration from a humantime string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
