//! Vigil: a minimal daemon supervisor with a service-code request
//! dispatcher.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vigil::prelude::*;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//! let daemon = DispatcherDaemon::from_config(&config.dispatcher, &config.weather)?;
//!
//! let mut registry = DaemonRegistry::new();
//! registry.register(daemon.into_descriptor(&config.dispatcher))?;
//! Supervisor::new(registry)
//!     .with_shutdown_grace(config.supervisor.shutdown_grace)
//!     .start_all()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;

pub use config::AppConfig;
pub use vigil_core as core;
pub use vigil_dispatch as dispatch;

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use vigil_core::{
        DaemonDescriptor, DaemonError, DaemonRegistry, DaemonState, Program, RunSummary, Signal,
        Supervisor,
    };
    pub use vigil_dispatch::{
        Dispatcher, DispatcherDaemon, OpenMeteoClient, RequestEnvelope, ResponseEnvelope,
        WeatherProvider,
    };
}
