//! Request and response envelopes for `POST /service`.
//!
//! Wire field names are case-sensitive:
//!
//! ```text
//! request:  {"Srvc": "ex02", "Seed": {"lat": 52.52, "lon": 13.41, "start": "", "end": ""}}
//! response: {"ExctnOutcomeCode": 200, "ExctnOutcomeNote": "", "Yield": ...}
//! ```

use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SeedError;
use crate::weather::WeatherData;

/// Valid latitudes, degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitudes, degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Inbound request. A missing or `null` `Srvc` decodes as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Service code.
    #[serde(rename = "Srvc", default, deserialize_with = "null_as_default")]
    pub service: String,

    /// Weather seed, only meaningful for `ex02`.
    #[serde(rename = "Seed", default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<WeatherSeed>,
}

impl RequestEnvelope {
    /// Decodes a request body. A top-level `null` is an empty request.
    ///
    /// # Errors
    /// Returns the decoder error for anything that is not a JSON object or
    /// `null`, or whose fields have the wrong types.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }
}

/// Reads an explicit `null` as the type's zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Coordinates and date window for the weather service.
///
/// Missing or `null` fields take their zero value.
///
/// `start` and `end` are accepted and carried along but not sent upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSeed {
    /// Latitude in degrees.
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    /// Longitude in degrees.
    #[serde(deserialize_with = "null_as_default")]
    pub lon: f64,
    /// Start date.
    #[serde(deserialize_with = "null_as_default")]
    pub start: String,
    /// End date.
    #[serde(deserialize_with = "null_as_default")]
    pub end: String,
}

impl WeatherSeed {
    /// Checks both coordinates against their valid ranges.
    ///
    /// # Errors
    /// Returns `SeedError::OutOfRange` if either coordinate is out of range.
    pub fn validate(&self) -> Result<(), SeedError> {
        if LATITUDE_RANGE.contains(&self.lat) && LONGITUDE_RANGE.contains(&self.lon) {
            Ok(())
        } else {
            Err(SeedError::OutOfRange {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

/// Outcome of the requested service.
///
/// Serialized as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum OutcomeCode {
    /// 200.
    Ok,
    /// 400: the client sent something unusable.
    BadRequest,
    /// 500: upstream or internal failure.
    Internal,
}

impl OutcomeCode {
    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::Internal => 500,
        }
    }

    /// Returns true for 200.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl From<OutcomeCode> for u16 {
    fn from(code: OutcomeCode) -> Self {
        code.as_u16()
    }
}

/// Integer that is not one of 200, 400, 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown outcome code {0}")]
pub struct UnknownOutcomeCode(pub u16);

impl TryFrom<u16> for OutcomeCode {
    type Error = UnknownOutcomeCode;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            200 => Ok(Self::Ok),
            400 => Ok(Self::BadRequest),
            500 => Ok(Self::Internal),
            other => Err(UnknownOutcomeCode(other)),
        }
    }
}

/// Response payload.
///
/// `Text` encodes as a JSON string, `Weather` as an object, `Empty` as
/// `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Yield {
    /// Plain string payload.
    Text(String),
    /// Reshaped weather data.
    Weather(Box<WeatherData>),
    /// No payload.
    #[default]
    Empty,
}

impl Yield {
    /// Returns true for `Empty` and for an empty string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Weather(_) => false,
            Self::Empty => true,
        }
    }
}

/// Outbound response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Outcome code.
    #[serde(rename = "ExctnOutcomeCode")]
    pub code: OutcomeCode,

    /// Explanation; empty on success.
    #[serde(rename = "ExctnOutcomeNote")]
    pub note: String,

    /// Payload; blank on failure.
    #[serde(rename = "Yield", default)]
    pub payload: Yield,
}

impl ResponseEnvelope {
    /// Successful response carrying `payload`.
    #[must_use]
    pub fn success(payload: Yield) -> Self {
        Self {
            code: OutcomeCode::Ok,
            note: String::new(),
            payload,
        }
    }

    /// Unknown service code. The yield is an empty string, not `null`.
    #[must_use]
    pub fn unknown_service() -> Self {
        Self {
            code: OutcomeCode::BadRequest,
            note: "unknown service code".to_string(),
            payload: Yield::Text(String::new()),
        }
    }

    /// Rejected weather seed.
    #[must_use]
    pub fn rejected(err: &SeedError) -> Self {
        Self {
            code: OutcomeCode::BadRequest,
            note: err.to_string(),
            payload: Yield::Empty,
        }
    }

    /// Weather provider failure.
    #[must_use]
    pub fn upstream_failure() -> Self {
        Self {
            code: OutcomeCode::Internal,
            note: "failed to fetch weather data".to_string(),
            payload: Yield::Empty,
        }
    }

    /// Checks the envelope invariant: success has an empty note and a
    /// payload, failure has a note and a blank payload.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.code.is_success() {
            self.note.is_empty() && !matches!(self.payload, Yield::Empty)
        } else {
            !self.note.is_empty() && self.payload.is_blank()
        }
    }
}
