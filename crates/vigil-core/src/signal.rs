//! OS signal listener that ends a supervisor run.

use crate::error::{DaemonError, Result};
use crate::types::Signal;

/// Waits until the process receives SIGINT or SIGTERM.
///
/// Handlers are registered when the future is first polled, so a signal
/// delivered before that point uses the default disposition.
///
/// # Errors
/// Returns `DaemonError::Signal` if a handler cannot be registered.
#[cfg(unix)]
pub async fn wait_for_shutdown() -> Result<Signal> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| DaemonError::signal(format!("failed to register SIGTERM handler: {e}")))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| DaemonError::signal(format!("failed to register SIGINT handler: {e}")))?;

    let received = tokio::select! {
        _ = sigterm.recv() => Signal::Term,
        _ = sigint.recv() => Signal::Int,
    };

    tracing::debug!(signal = ?received, "shutdown signal observed");
    Ok(received)
}

/// Waits until the process receives Ctrl+C.
///
/// # Errors
/// Returns `DaemonError::Signal` if the handler cannot be registered.
#[cfg(not(unix))]
pub async fn wait_for_shutdown() -> Result<Signal> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| DaemonError::signal(format!("failed to listen for Ctrl+C: {e}")))?;
    Ok(Signal::Int)
}
