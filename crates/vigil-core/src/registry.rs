//! Ordered daemon registry.
//!
//! Registration order is start order. Names are unique within a registry.

use std::sync::Arc;

use crate::daemon::DaemonDescriptor;
use crate::error::{DaemonError, Result};
use crate::types::DaemonState;

/// Ordered collection of daemon descriptors owned by the supervisor.
#[derive(Debug, Default)]
pub struct DaemonRegistry {
    daemons: Vec<Arc<DaemonDescriptor>>,
}

impl DaemonRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a daemon and returns a handle to its descriptor.
    ///
    /// # Errors
    /// Returns an error if a daemon with the same name is already registered.
    pub fn register(&mut self, daemon: DaemonDescriptor) -> Result<Arc<DaemonDescriptor>> {
        if self.get(daemon.name()).is_some() {
            return Err(DaemonError::Config(format!(
                "daemon {} already registered",
                daemon.name()
            )));
        }

        let daemon = Arc::new(daemon);
        self.daemons.push(Arc::clone(&daemon));

        tracing::debug!(name = %daemon.name(), position = self.daemons.len(), "registered daemon");

        Ok(daemon)
    }

    /// Returns the descriptor registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<DaemonDescriptor>> {
        self.daemons.iter().find(|d| d.name() == name)
    }

    /// Iterates descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<DaemonDescriptor>> {
        self.daemons.iter()
    }

    /// Returns the number of registered daemons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.daemons.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.daemons.is_empty()
    }

    /// Snapshot of every daemon's name and state, in registration order.
    ///
    /// Each state is read under its own lock; the snapshot as a whole is not
    /// atomic.
    #[must_use]
    pub fn states(&self) -> Vec<(String, DaemonState)> {
        self.daemons
            .iter()
            .map(|d| (d.name().to_string(), d.state()))
            .collect()
    }
}
