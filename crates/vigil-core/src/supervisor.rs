//! Supervisor - starts every registered daemon and waits for shutdown.
//!
//! Daemons are dispatched fire-and-forget in registration order. "Up and
//! running" means dispatched, not ready: there is no readiness barrier. Once
//! dispatched, a daemon's program runs until it returns; the only
//! cancellation is the process exiting after the grace window.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::daemon::DaemonDescriptor;
use crate::error::Result;
use crate::registry::DaemonRegistry;
use crate::signal::wait_for_shutdown;
use crate::types::{DaemonState, Signal};

/// Grace window between the shutdown signal and returning to the caller.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// How a supervisor run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSummary {
    /// Nothing was registered; no signal was awaited.
    NoDaemons,
    /// Daemons were dispatched and a shutdown signal ended the run.
    Stopped {
        /// Number of daemons dispatched.
        started: usize,
        /// Signal that ended the run.
        signal: Signal,
    },
}

/// Owns the registry and drives the process lifecycle.
#[derive(Debug)]
pub struct Supervisor {
    registry: DaemonRegistry,
    shutdown_grace: Duration,
}

impl Supervisor {
    /// Creates a supervisor over `registry` with the default grace window.
    #[must_use]
    pub fn new(registry: DaemonRegistry) -> Self {
        Self {
            registry,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }

    /// Overrides the process-wide grace window.
    ///
    /// This is a single delay for the whole process. Per-daemon grace values
    /// on the descriptors are not consulted.
    #[must_use]
    pub const fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &DaemonRegistry {
        &self.registry
    }

    /// Returns the grace window.
    #[must_use]
    pub const fn shutdown_grace(&self) -> Duration {
        self.shutdown_grace
    }

    /// Starts every daemon and blocks until SIGINT or SIGTERM.
    ///
    /// # Errors
    /// Returns an error if a daemon is not pending or a signal handler cannot
    /// be registered.
    pub async fn start_all(&self) -> Result<RunSummary> {
        self.start_all_until(wait_for_shutdown()).await
    }

    /// Starts every daemon and blocks until `shutdown` resolves.
    ///
    /// `shutdown` is not polled when the registry is empty.
    ///
    /// # Errors
    /// Returns an error if a daemon is not pending or `shutdown` fails.
    pub async fn start_all_until<F>(&self, shutdown: F) -> Result<RunSummary>
    where
        F: Future<Output = Result<Signal>>,
    {
        tracing::info!(source = "Main", "PROJECT: Starting up");

        if self.registry.is_empty() {
            tracing::info!(
                source = "Main",
                "PROJECT: No Daemon(s) to run. Shutting down now"
            );
            return Ok(RunSummary::NoDaemons);
        }

        for daemon in self.registry.iter() {
            tracing::info!(
                source = "Main",
                "PROJECT: Daemon {}: Starting up...",
                daemon.name()
            );

            daemon.transition(DaemonState::Running)?;
            tokio::spawn(run_to_completion(Arc::clone(daemon)));

            tracing::info!(
                source = "Main",
                "PROJECT: Daemon {}: Up and running",
                daemon.name()
            );
        }

        tracing::info!(source = "Main", "PROJECT: Running. Press Ctrl+C to shutdown.");
        let signal = shutdown.await?;

        tracing::info!(source = "Main", "PROJECT: Shutdown signal received");
        tokio::time::sleep(self.shutdown_grace).await;
        tracing::info!(source = "Main", "PROJECT: Shutdown complete");

        Ok(RunSummary::Stopped {
            started: self.registry.len(),
            signal,
        })
    }
}

/// Worker body: run the program, log the outcome, mark the daemon done.
async fn run_to_completion(daemon: Arc<DaemonDescriptor>) {
    let outcome = daemon.program().run().await;

    match outcome {
        Ok(()) => tracing::info!(
            source = "Main",
            "PROJECT: Daemon {}: Finished",
            daemon.name()
        ),
        Err(e) => tracing::error!(
            source = "Main",
            "PROJECT: Daemon {}: Error: {e}",
            daemon.name()
        ),
    }

    if let Err(e) = daemon.transition(DaemonState::Done) {
        tracing::error!(source = "Main", error = %e, "failed to record daemon completion");
    }
}
