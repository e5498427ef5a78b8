//! `ex02`: seed validation, upstream call, reshaping.

use std::sync::Arc;

use super::{WeatherData, WeatherProvider};
use crate::envelope::{ResponseEnvelope, WeatherSeed, Yield};
use crate::error::{SeedError, WeatherError};

/// Turns an optional seed into a response envelope.
#[derive(Clone)]
pub struct WeatherAdapter {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherAdapter {
    /// Creates an adapter over `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Handles one `ex02` request.
    ///
    /// The provider is only called for a present, in-range seed. Every
    /// provider or reshaping failure becomes the same 500 envelope; the
    /// cause goes to the error log.
    pub async fn handle(&self, seed: Option<&WeatherSeed>) -> ResponseEnvelope {
        let Some(seed) = seed else {
            return ResponseEnvelope::rejected(&SeedError::Missing);
        };
        if let Err(err) = seed.validate() {
            return ResponseEnvelope::rejected(&err);
        }

        match self.fetch(seed).await {
            Ok(data) => ResponseEnvelope::success(Yield::Weather(Box::new(data))),
            Err(e) => {
                tracing::error!(
                    source = "SR05",
                    lat = seed.lat,
                    lon = seed.lon,
                    "failed to fetch weather data: {e}"
                );
                ResponseEnvelope::upstream_failure()
            }
        }
    }

    /// Fetches and reshapes the forecast for an already validated seed.
    ///
    /// # Errors
    /// Returns the provider error, or `WeatherError::Misaligned` if the
    /// upstream series differ in length.
    pub async fn fetch(&self, seed: &WeatherSeed) -> Result<WeatherData, WeatherError> {
        let upstream = self.provider.forecast(seed).await?;
        WeatherData::try_from(upstream)
    }
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter").finish_non_exhaustive()
    }
}
