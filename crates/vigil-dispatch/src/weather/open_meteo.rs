//! Open-Meteo forecast client.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::envelope::WeatherSeed;
use crate::error::WeatherError;

/// Hourly variables requested upstream.
pub const HOURLY_VARIABLES: &str =
    "temperature_2m,relative_humidity_2m,wind_speed_10m,wind_direction_10m,weather_code";

/// Daily variables requested upstream.
pub const DAILY_VARIABLES: &str = "sunrise,sunset";

/// Subset of the upstream forecast body that is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Hourly block.
    pub hourly: ForecastHourly,
    /// Daily block.
    pub daily: ForecastDaily,
}

/// Upstream hourly block, field names as sent by Open-Meteo.
///
/// Open-Meteo reports missing samples as `null`; they decode as zero so the
/// series stay index-aligned.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastHourly {
    #[serde(deserialize_with = "nullable_items")]
    pub time: Vec<String>,
    #[serde(deserialize_with = "nullable_items")]
    pub temperature_2m: Vec<f64>,
    #[serde(deserialize_with = "nullable_items")]
    pub wind_speed_10m: Vec<f64>,
    #[serde(deserialize_with = "nullable_items")]
    pub wind_direction_10m: Vec<i32>,
    #[serde(deserialize_with = "nullable_items")]
    pub relative_humidity_2m: Vec<i32>,
    #[serde(deserialize_with = "nullable_items")]
    pub weather_code: Vec<i32>,
}

/// Upstream daily block.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDaily {
    #[serde(deserialize_with = "nullable_items")]
    pub time: Vec<String>,
    #[serde(deserialize_with = "nullable_items")]
    pub sunrise: Vec<String>,
    #[serde(deserialize_with = "nullable_items")]
    pub sunset: Vec<String>,
}

/// Decodes an array whose elements may be `null`. A `null` array is empty.
fn nullable_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// `reqwest`-backed [`WeatherProvider`].
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: reqwest::Client,
    base_url: String,
    timezone: String,
}

impl OpenMeteoClient {
    /// Builds a client from the `[weather]` section.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            timezone: config.timezone.clone(),
        })
    }

    /// Returns the forecast endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query parameters sent for `seed`.
    ///
    /// Only the coordinates are forwarded; the seed's date window is not.
    #[must_use]
    pub fn query(&self, seed: &WeatherSeed) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", format!("{:.6}", seed.lat)),
            ("longitude", format!("{:.6}", seed.lon)),
            ("hourly", HOURLY_VARIABLES.to_string()),
            ("daily", DAILY_VARIABLES.to_string()),
            ("timezone", self.timezone.clone()),
        ]
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn forecast(&self, seed: &WeatherSeed) -> Result<ForecastResponse, WeatherError> {
        let body = self
            .http
            .get(&self.base_url)
            .query(&self.query(seed))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }
}
