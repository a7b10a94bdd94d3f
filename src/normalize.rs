/// Normalization of raw provider entries into canonical forecast records.
///
/// Policy is drop-don't-guess: an entry with any field absent, null, or
/// non-parseable is excluded wholesale, never patched with a default. Drops
/// are a per-row condition, not an error — the caller only sees a shorter
/// output. Relative order of surviving entries is preserved.

use chrono::NaiveDateTime;

use crate::model::{ForecastRecord, RawForecastEntry};

/// Timestamp layout used by the provider's `dt_txt` field.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Convert raw entries into the canonical record set.
///
/// Pure and deterministic: the same input always yields the same output.
/// An empty input yields an empty output, not an error.
pub fn normalize(entries: &[RawForecastEntry]) -> Vec<ForecastRecord> {
    entries.iter().filter_map(normalize_entry).collect()
}

/// Normalize a single entry, or `None` if any field fails validation.
fn normalize_entry(entry: &RawForecastEntry) -> Option<ForecastRecord> {
    let time = parse_time(entry.dt_txt.as_deref()?)?;

    let description = entry.description.as_deref()?.trim();
    if description.is_empty() {
        return None;
    }

    let temperature = round_2dp(entry.temperature?);
    let humidity = truncate_to_i32(entry.humidity?);
    let wind_speed = truncate_to_i32(entry.wind_speed?);

    Some(ForecastRecord {
        time,
        description: description.to_string(),
        temperature,
        humidity,
        wind_speed,
    })
}

/// Parse a provider timestamp ("2024-01-01 09:00:00"), timezone-naive.
fn parse_time(dt_txt: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(dt_txt, DT_TXT_FORMAT).ok()
}

/// Round to 2 decimal places. Stable: rounding an already-rounded value
/// changes nothing.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Truncate toward zero. Source values are percentages and wind speeds the
/// provider guarantees non-negative, so this matches a plain int cast.
fn truncate_to_i32(value: f64) -> i32 {
    value.trunc() as i32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
