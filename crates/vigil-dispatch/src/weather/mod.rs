//! Weather data served by `ex02` and the provider seam behind it.

pub mod adapter;
pub mod open_meteo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::envelope::WeatherSeed;
use crate::error::WeatherError;

pub use adapter::WeatherAdapter;
pub use open_meteo::{ForecastDaily, ForecastHourly, ForecastResponse, OpenMeteoClient};

/// Weather yield of a successful `ex02` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    /// Hourly series.
    pub hourly: HourlySeries,
    /// Daily series.
    pub daily: DailySeries,
}

/// Index-aligned hourly series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    /// ISO-8601 timestamps.
    pub time: Vec<String>,
    /// Air temperature at 2 m, °C.
    pub temperature: Vec<f64>,
    /// Wind speed at 10 m, km/h.
    pub wind_speed: Vec<f64>,
    /// Wind direction at 10 m, degrees.
    pub wind_direction: Vec<i32>,
    /// Relative humidity at 2 m, percent.
    pub humidity: Vec<i32>,
    /// WMO weather code.
    pub weather_code: Vec<i32>,
}

impl HourlySeries {
    /// Number of hourly samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns true if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns true if every series has the same length as `time`.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        let n = self.time.len();
        [
            self.temperature.len(),
            self.wind_speed.len(),
            self.wind_direction.len(),
            self.humidity.len(),
            self.weather_code.len(),
        ]
        .iter()
        .all(|&len| len == n)
    }
}

/// Index-aligned daily series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    /// ISO-8601 dates.
    pub date: Vec<String>,
    /// Sunrise times.
    pub sunrise: Vec<String>,
    /// Sunset times.
    pub sunset: Vec<String>,
}

impl DailySeries {
    /// Returns true if every series has the same length as `date`.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.sunrise.len() == self.date.len() && self.sunset.len() == self.date.len()
    }
}

impl TryFrom<ForecastResponse> for WeatherData {
    type Error = WeatherError;

    fn try_from(upstream: ForecastResponse) -> Result<Self, Self::Error> {
        let ForecastResponse { hourly, daily } = upstream;

        let hourly = HourlySeries {
            time: hourly.time,
            temperature: hourly.temperature_2m,
            wind_speed: hourly.wind_speed_10m,
            wind_direction: hourly.wind_direction_10m,
            humidity: hourly.relative_humidity_2m,
            weather_code: hourly.weather_code,
        };
        if !hourly.is_aligned() {
            return Err(WeatherError::Misaligned("hourly"));
        }

        let daily = DailySeries {
            date: daily.time,
            sunrise: daily.sunrise,
            sunset: daily.sunset,
        };
        if !daily.is_aligned() {
            return Err(WeatherError::Misaligned("daily"));
        }

        Ok(Self { hourly, daily })
    }
}

/// Source of upstream forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + 'static {
    /// Fetches the forecast for the seed's coordinates.
    ///
    /// # Errors
    /// Returns an error on any transport or decoding failure.
    async fn forecast(&self, seed: &WeatherSeed) -> Result<ForecastResponse, WeatherError>;
}
