//! Service-code routing.

use std::fmt;
use std::sync::Arc;

use crate::envelope::{RequestEnvelope, ResponseEnvelope, Yield};
use crate::weather::{WeatherAdapter, WeatherProvider};

/// Yield of `sr05`.
pub const GREETING: &str = "Hello world";

/// Parsed `Srvc` value. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCode {
    /// `sr05`.
    Greeting,
    /// `ex02`.
    Weather,
    /// Anything else, including the empty string.
    Unknown(String),
}

impl ServiceCode {
    /// Wire value of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Greeting => "sr05",
            Self::Weather => "ex02",
            Self::Unknown(code) => code,
        }
    }
}

impl From<&str> for ServiceCode {
    fn from(code: &str) -> Self {
        match code {
            "sr05" => Self::Greeting,
            "ex02" => Self::Weather,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a decoded request to its response envelope. Transport-free.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    weather: Arc<WeatherAdapter>,
}

impl Dispatcher {
    /// Creates a dispatcher whose `ex02` service uses `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            weather: Arc::new(WeatherAdapter::new(provider)),
        }
    }

    /// Routes `request` by its service code.
    pub async fn dispatch(&self, request: &RequestEnvelope) -> ResponseEnvelope {
        let code = ServiceCode::from(request.service.as_str());
        let response = match &code {
            ServiceCode::Greeting => ResponseEnvelope::success(Yield::Text(GREETING.to_string())),
            ServiceCode::Weather => self.weather.handle(request.seed.as_ref()).await,
            ServiceCode::Unknown(_) => ResponseEnvelope::unknown_service(),
        };

        tracing::debug!(
            source = "SR05",
            service = %code,
            outcome = response.code.as_u16(),
            "request dispatched"
        );
        response
    }
}
