// Allow unwrap/expect/panic in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # vigil-dispatch
//!
//! The `POST /service` endpoint run as a Vigil daemon:
//!
//! - [`envelope`] - request/response envelopes and outcome codes
//! - [`Dispatcher`] - routes `sr05` (greeting) and `ex02` (weather)
//! - [`WeatherAdapter`] - seed validation and reshaping of Open-Meteo data
//! - [`service_router`] - the axum router around the dispatcher
//! - [`DispatcherDaemon`] - binds and serves as a supervised [`Program`]
//!
//! [`Program`]: vigil_core::Program
//!
//! ## Example
//!
//! ```rust,no_run
//! use vigil_core::{DaemonRegistry, Supervisor};
//! use vigil_dispatch::{DispatcherConfig, DispatcherDaemon, WeatherConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DispatcherConfig::default();
//! let daemon = DispatcherDaemon::from_config(&config, &WeatherConfig::default())?;
//!
//! let mut registry = DaemonRegistry::new();
//! registry.register(daemon.into_descriptor(&config))?;
//! Supervisor::new(registry).start_all().await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod daemon;
pub mod envelope;
pub mod error;
pub mod http;
pub mod service;
pub mod weather;

pub use config::{DispatcherConfig, WeatherConfig};
pub use daemon::DispatcherDaemon;
pub use envelope::{OutcomeCode, RequestEnvelope, ResponseEnvelope, WeatherSeed, Yield};
pub use error::{DispatchError, Result, SeedError, WeatherError};
pub use http::{SERVICE_PATH, service_router};
pub use service::{Dispatcher, GREETING, ServiceCode};
pub use weather::{OpenMeteoClient, WeatherAdapter, WeatherData, WeatherProvider};
