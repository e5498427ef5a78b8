// Allow unwrap/expect/panic in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # vigil-core
//!
//! Daemon supervision primitives for Vigil:
//!
//! - [`DaemonDescriptor`] - a named [`Program`] with a lock-guarded
//!   [`DaemonState`]
//! - [`DaemonRegistry`] - ordered, name-unique collection of descriptors
//! - [`Supervisor`] - dispatches every daemon, waits for SIGINT/SIGTERM,
//!   sleeps a fixed grace window, returns
//! - [`logging`] - the `[timestamp//source] message` console format
//!
//! ## Example
//!
//! ```rust,no_run
//! use vigil_core::{DaemonDescriptor, DaemonRegistry, Supervisor};
//!
//! # async fn demo() -> vigil_core::Result<()> {
//! let mut registry = DaemonRegistry::new();
//! registry.register(DaemonDescriptor::new("ticker", || async {
//!     tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!     Ok::<(), vigil_core::DaemonError>(())
//! }))?;
//!
//! Supervisor::new(registry).start_all().await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod daemon;
pub mod error;
pub mod logging;
pub mod registry;
pub mod signal;
pub mod supervisor;
pub mod types;

pub use config::{LogConfig, SupervisorConfig};
pub use daemon::{DaemonDescriptor, Program};
pub use error::{DaemonError, Result};
pub use logging::{LogLevel, init_logging, log};
pub use registry::DaemonRegistry;
pub use signal::wait_for_shutdown;
pub use supervisor::{DEFAULT_SHUTDOWN_GRACE, RunSummary, Supervisor};
pub use types::{DaemonState, Signal};
