/// Core data types for the weather forecast advisory service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no pipeline logic — only types, their display
/// impls, and the fixed advisory texts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw provider entries
// ---------------------------------------------------------------------------

/// One element of the provider's `list` array, after decoding but before
/// normalization.
///
/// Every payload field is optional: the provider occasionally omits fields,
/// and the drop-don't-guess policy lives in the normalizer, not here. Raw
/// entries are discarded once normalization has run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastEntry {
    /// Forecast timestamp as received, e.g. "2024-01-01 09:00:00".
    pub dt_txt: Option<String>,
    /// Short condition label, e.g. "clear sky", "light rain".
    pub description: Option<String>,
    /// Temperature in °C (metric units requested from the provider).
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Wind speed in the provider's metric unit (m/s).
    pub wind_speed: Option<f64>,
}

// ---------------------------------------------------------------------------
// Normalized records
// ---------------------------------------------------------------------------

/// A single normalized forecast interval.
///
/// Produced by `normalize::normalize` from a `RawForecastEntry`. Every field
/// is present and validated; rows that could not satisfy that are dropped
/// during normalization and never reach this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Provider-local forecast time, timezone-naive.
    pub time: NaiveDateTime,
    /// Non-empty condition label.
    pub description: String,
    /// °C, rounded to 2 decimal places.
    pub temperature: f64,
    /// Percent, truncated toward zero.
    pub humidity: i32,
    /// Provider units (m/s), truncated toward zero.
    pub wind_speed: i32,
}

// ---------------------------------------------------------------------------
// Advisory
// ---------------------------------------------------------------------------

/// Activity suggestion derived from one forecast set.
///
/// Variants are listed in classification priority order: a set that matches
/// `SunnyWarm` is never reported as `Rainy`, and so on down the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// Clear sky somewhere in the set and mean temperature in [20, 30] °C.
    SunnyWarm,
    /// Rain somewhere in the set.
    Rainy,
    /// Snow somewhere in the set, or mean temperature below freezing.
    ColdSnow,
    /// None of the above.
    Pleasant,
}

impl Advisory {
    /// The fixed suggestion text shown to the user.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Advisory::SunnyWarm => {
                "It's going to be sunny and warm! How about a picnic or a visit to the park?"
            }
            Advisory::Rainy => {
                "Looks like it might rain. Don't forget your umbrella! \
                 It's a perfect day for visiting a museum or reading a book."
            }
            Advisory::ColdSnow => {
                "Brrr, it's going to be cold! How about making a snowman, \
                 going skiing, or staying in with a hot cup of cocoa?"
            }
            Advisory::Pleasant => "The weather looks great! You should visit this city.",
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or decoding provider data.
///
/// All variants are non-retriable within the pipeline; retry/backoff, if
/// wanted, is layered by the caller.
#[derive(Debug, PartialEq)]
pub enum FetchError {
    /// Non-2xx HTTP response from the provider.
    Http(u16),
    /// Transport-level failure (DNS, connect, timeout).
    Network(String),
    /// The response body could not be deserialized.
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(code) => write!(f, "HTTP error: {}", code),
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Errors from the advisory classifier.
#[derive(Debug, PartialEq)]
pub enum AdvisoryError {
    /// The classifier was invoked on zero records; the mean temperature is
    /// undefined and no rule may fire.
    EmptyInput,
}

impl std::fmt::Display for AdvisoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvisoryError::EmptyInput => {
                write!(f, "Cannot classify an empty forecast set")
            }
        }
    }
}

impl std::error::Error for AdvisoryError {}

/// Errors from the persistence sink.
#[derive(Debug)]
pub enum PersistError {
    /// The store could not be reached or refused the connection.
    Connection(String),
    /// Schema verification or creation failed.
    Schema(String),
    /// The write transaction was rejected; prior contents remain untouched.
    Write(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Connection(msg) => write!(f, "Store connection error: {}", msg),
            PersistError::Schema(msg) => write!(f, "Store schema error: {}", msg),
            PersistError::Write(msg) => write!(f, "Store write error: {}", msg),
        }
    }
}

impl std::error::Error for PersistError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
