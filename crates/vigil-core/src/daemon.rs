//! Daemon descriptor and the unit of work it supervises.
//!
//! A descriptor pairs a name with a [`Program`] and guards the daemon's
//! [`DaemonState`] behind its own lock. The registry hands out
//! `Arc<DaemonDescriptor>` handles; the state is never shared as a bare value.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{DaemonError, Result};
use crate::types::DaemonState;

/// A zero-argument unit of work run by the supervisor.
///
/// The program either runs until it completes or fails with an error. The
/// supervisor has no way to interrupt it once dispatched.
///
/// Any `Fn() -> impl Future<Output = Result<()>>` closure is a program:
///
/// ```rust
/// use vigil_core::{DaemonDescriptor, DaemonError};
///
/// let daemon = DaemonDescriptor::new("ticker", || async {
///     Err::<(), _>(DaemonError::runtime("nothing to do"))
/// });
/// assert_eq!(daemon.name(), "ticker");
/// ```
#[async_trait]
pub trait Program: Send + Sync + 'static {
    /// Runs the unit of work to completion.
    async fn run(&self) -> Result<()>;
}

#[async_trait]
impl<F, Fut> Program for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn run(&self) -> Result<()> {
        (self)().await
    }
}

/// A registered daemon.
///
/// The startup and shutdown grace durations are recorded for reporting only.
/// Nothing in the supervisor waits on them.
pub struct DaemonDescriptor {
    name: String,
    program: Arc<dyn Program>,
    state: Mutex<DaemonState>,
    startup_grace: Duration,
    shutdown_grace: Duration,
}

impl DaemonDescriptor {
    /// Creates a pending descriptor for `program`.
    #[must_use]
    pub fn new(name: impl Into<String>, program: impl Program) -> Self {
        Self {
            name: name.into(),
            program: Arc::new(program),
            state: Mutex::new(DaemonState::Pending),
            startup_grace: Duration::ZERO,
            shutdown_grace: Duration::ZERO,
        }
    }

    /// Sets the (inert) startup grace.
    #[must_use]
    pub const fn with_startup_grace(mut self, grace: Duration) -> Self {
        self.startup_grace = grace;
        self
    }

    /// Sets the (inert) shutdown grace.
    #[must_use]
    pub const fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Returns the daemon name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a snapshot of the current state.
    ///
    /// The value may be stale by the time the caller looks at it.
    #[must_use]
    pub fn state(&self) -> DaemonState {
        *self.state.lock()
    }

    /// Returns the recorded startup grace.
    #[must_use]
    pub const fn startup_grace(&self) -> Duration {
        self.startup_grace
    }

    /// Returns the recorded shutdown grace.
    #[must_use]
    pub const fn shutdown_grace(&self) -> Duration {
        self.shutdown_grace
    }

    /// Returns a handle to the program for dispatch.
    pub(crate) fn program(&self) -> Arc<dyn Program> {
        Arc::clone(&self.program)
    }

    /// Moves the daemon to `next` under the state lock.
    ///
    /// # Errors
    /// Returns `DaemonError::State` if `next` is not the legal successor of
    /// the current state. The state is left unchanged in that case.
    pub fn transition(&self, next: DaemonState) -> Result<DaemonState> {
        let mut guard = self.state.lock();
        let current = *guard;
        if !current.can_transition_to(next) {
            return Err(DaemonError::State {
                name: self.name.clone(),
                from: current,
                to: next,
            });
        }
        *guard = next;
        drop(guard);

        tracing::debug!(name = %self.name, old = %current, new = %next, "state changed");
        Ok(current)
    }
}

impl std::fmt::Debug for DaemonDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DaemonDescriptor")
            .field("name", &self.name)
            .field("state", &self.state())
            .field("startup_grace", &self.startup_grace)
            .field("shutdown_grace", &self.shutdown_grace)
            .finish_non_exhaustive()
    }
}
