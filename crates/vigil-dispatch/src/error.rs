//! Error types for vigil-dispatch.

use std::net::SocketAddr;

use vigil_core::DaemonError;

/// Result type alias for dispatcher setup and serving.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Failures of the dispatcher daemon itself.
///
/// Request-level problems never surface here; they are folded into the
/// response envelope or a transport status.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Invalid dispatcher or weather configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The weather client could not be built.
    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl DispatchError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<DispatchError> for DaemonError {
    fn from(err: DispatchError) -> Self {
        Self::runtime(format!("server failed: {err}"))
    }
}

/// Failures talking to the weather provider.
///
/// The adapter collapses all of these into one outcome for the caller; the
/// variants exist for the log line.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Network failure, timeout, non-success status or unreadable body.
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream body is not the expected JSON shape.
    #[error("malformed weather payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Parallel series of one group have different lengths.
    #[error("misaligned {0} series in weather payload")]
    Misaligned(&'static str),
}

/// Problems with the `Seed` of an `ex02` request.
///
/// The display text is the envelope note sent back to the client.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SeedError {
    /// No `Seed` object in the request.
    #[error("missing Seed data for ex02 service")]
    Missing,

    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    #[error("invalid latitude or longitude values")]
    OutOfRange {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
    },
}
