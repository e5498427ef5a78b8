//! Error types for vigil-core.
//!
//! Every failure the supervisor can observe is an explicit variant; nothing
//! in the lifecycle path panics.

use crate::types::DaemonState;

/// Result type alias for supervisor operations.
pub type Result<T> = std::result::Result<T, DaemonError>;

/// Error type for daemon registration, lifecycle and program execution.
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    /// Configuration error (bad registration, invalid config value).
    #[error("configuration error: {0}")]
    Config(String),

    /// Runtime error raised by a daemon's program.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Rejected lifecycle transition.
    #[error("invalid state transition for {name}: {from:?} -> {to:?}")]
    State {
        /// Daemon name.
        name: String,
        /// State the daemon was in.
        from: DaemonState,
        /// State that was requested.
        to: DaemonState,
    },

    /// Signal handler registration failed.
    #[error("signal error: {0}")]
    Signal(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DaemonError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a runtime error.
    #[must_use]
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// Creates a signal error.
    #[must_use]
    pub fn signal(msg: impl Into<String>) -> Self {
        Self::Signal(msg.into())
    }
}
