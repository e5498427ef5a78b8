//! The dispatcher as a supervised program.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;
use vigil_core::{DaemonDescriptor, Program};

use crate::config::{DispatcherConfig, WeatherConfig};
use crate::error::{DispatchError, Result};
use crate::http::service_router;
use crate::service::Dispatcher;
use crate::weather::OpenMeteoClient;

/// Binds the listen address and serves `POST /service` until the process
/// exits. Never returns on success.
#[derive(Debug, Clone)]
pub struct DispatcherDaemon {
    bind_addr: SocketAddr,
    dispatcher: Dispatcher,
}

impl DispatcherDaemon {
    /// Creates a daemon serving `dispatcher` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, dispatcher: Dispatcher) -> Self {
        Self {
            bind_addr,
            dispatcher,
        }
    }

    /// Builds the production daemon backed by Open-Meteo.
    ///
    /// # Errors
    /// Returns an error if either section is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(dispatcher: &DispatcherConfig, weather: &WeatherConfig) -> Result<Self> {
        dispatcher.validate()?;
        weather.validate()?;

        let client = OpenMeteoClient::new(weather)?;
        Ok(Self::new(
            dispatcher.bind_addr,
            Dispatcher::new(Arc::new(client)),
        ))
    }

    /// Wraps the daemon in a descriptor carrying the section's name and
    /// grace values.
    #[must_use]
    pub fn into_descriptor(self, config: &DispatcherConfig) -> DaemonDescriptor {
        DaemonDescriptor::new(config.name.clone(), self)
            .with_startup_grace(config.startup_grace)
            .with_shutdown_grace(config.shutdown_grace)
    }

    /// Returns the configured listen address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Binds and serves.
    ///
    /// # Errors
    /// Returns `DispatchError::Bind` if the address is unavailable and
    /// `DispatchError::Serve` if the server stops with an error.
    pub async fn serve(&self) -> Result<()> {
        tracing::info!(source = "SR05", "Starting HTTP server on {}", self.bind_addr);

        let listener = TcpListener::bind(self.bind_addr)
            .await
            .map_err(|source| DispatchError::Bind {
                addr: self.bind_addr,
                source,
            })?;
        self.serve_listener(listener).await
    }

    /// Serves on an already bound listener.
    ///
    /// # Errors
    /// Returns `DispatchError::Serve` if the server stops with an error.
    pub async fn serve_listener(&self, listener: TcpListener) -> Result<()> {
        axum::serve(listener, service_router(self.dispatcher.clone()))
            .await
            .map_err(DispatchError::Serve)
    }
}

#[async_trait]
impl Program for DispatcherDaemon {
    async fn run(&self) -> vigil_core::Result<()> {
        Ok(self.serve().await?)
    }
}
