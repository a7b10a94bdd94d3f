/// OpenWeatherMap forecast API client.
///
/// Retrieves the 5-day / 3-hour forecast for a named city and decodes it
/// into raw forecast entries for the normalizer.
///
/// API documentation: https://openweathermap.org/forecast5
///
/// Single-attempt contract: one GET per call, no retry, no caching. The
/// request timeout is whatever the caller built into the `Client`.

use serde::Deserialize;

use crate::model::{FetchError, RawForecastEntry};

/// Default API host; overridable through configuration for testing.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

// ============================================================================
// OpenWeatherMap API Response Structures
// ============================================================================

/// Top-level forecast response. Only the `list` field matters to us.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastListItem>,
}

/// One 3-hour forecast interval as the provider sends it.
///
/// Every nested field is optional so that a partially populated interval
/// still decodes; the normalizer decides what to drop.
#[derive(Debug, Deserialize)]
pub struct ForecastListItem {
    /// Forecast time string, "%Y-%m-%d %H:%M:%S" in the provider's zone.
    pub dt_txt: Option<String>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub main: Option<MainReadings>,
    pub wind: Option<WindReadings>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct WindReadings {
    pub speed: Option<f64>,
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Fetch the hourly forecast for a city.
///
/// # Parameters
/// - `client`: HTTP client, built by the caller with an explicit timeout
/// - `base_url`: provider host, normally [`DEFAULT_BASE_URL`]
/// - `city`: city name as the provider understands it, e.g. "Helsinki"
/// - `api_key`: provider credential; passed through as a query parameter
///   and never logged or stored here
///
/// # Returns
/// The decoded `list` entries in provider order. Any non-2xx status,
/// transport failure, or undecodable body is a [`FetchError`] and the
/// caller must not proceed to normalization.
pub fn fetch_hourly(
    client: &reqwest::blocking::Client,
    base_url: &str,
    city: &str,
    api_key: &str,
) -> Result<Vec<RawForecastEntry>, FetchError> {
    let url = format!("{}/data/2.5/forecast", base_url);

    let response = client
        .get(&url)
        .query(&[("q", city), ("appid", api_key), ("units", "metric")])
        .send()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http(status.as_u16()));
    }

    let body = response
        .text()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    parse_forecast_body(&body)
}

/// Decode a forecast response body into raw entries.
///
/// Split out from [`fetch_hourly`] so decoding is testable without a
/// network connection.
pub fn parse_forecast_body(body: &str) -> Result<Vec<RawForecastEntry>, FetchError> {
    let response: ForecastResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(response.list.into_iter().map(entry_from_item).collect())
}

/// Flatten one provider interval into a raw entry.
///
/// Field mapping: `dt_txt` → time string, `weather[0].description` →
/// description, `main.temp` → temperature, `main.humidity` → humidity,
/// `wind.speed` → wind speed. Absent fields stay `None`.
fn entry_from_item(item: ForecastListItem) -> RawForecastEntry {
    RawForecastEntry {
        dt_txt: item.dt_txt,
        description: item
            .weather
            .into_iter()
            .next()
            .and_then(|w| w.description),
        temperature: item.main.as_ref().and_then(|m| m.temp),
        humidity: item.main.as_ref().and_then(|m| m.humidity),
        wind_speed: item.wind.as_ref().and_then(|w| w.speed),
    }
}

// ============================================================================
// Tests
// ============================================================================
