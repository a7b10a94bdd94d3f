/// Advisory classification over a normalized forecast set.
///
/// The rules mirror what a human would scan the table for: is there a clear
/// warm stretch, is rain coming, is it freezing. Evaluation order is a
/// designed tie-break — rule 1 wins over rule 2 even when both match — so
/// the conditions below must stay in this exact sequence.

use crate::model::{Advisory, AdvisoryError, ForecastRecord};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Derive one activity suggestion from the full forecast set.
///
/// Priority order, first match wins:
/// 1. any "clear sky" AND mean temperature in [20, 30] °C → [`Advisory::SunnyWarm`]
/// 2. any "rain"                                          → [`Advisory::Rainy`]
/// 3. any "snow" OR mean temperature < 0 °C               → [`Advisory::ColdSnow`]
/// 4. otherwise                                           → [`Advisory::Pleasant`]
///
/// Description matching is case-insensitive substring containment. The mean
/// is taken over the whole set, never a window.
///
/// Returns [`AdvisoryError::EmptyInput`] on zero records — the mean is
/// undefined there and silently picking a branch would mask an upstream
/// problem.
pub fn advise(records: &[ForecastRecord]) -> Result<Advisory, AdvisoryError> {
    if records.is_empty() {
        return Err(AdvisoryError::EmptyInput);
    }

    let mean_temp = mean_temperature(records);

    let any_clear = any_description_contains(records, "clear sky");
    let any_rain = any_description_contains(records, "rain");
    let any_snow = any_description_contains(records, "snow");

    let advisory = if any_clear && (20.0..=30.0).contains(&mean_temp) {
        Advisory::SunnyWarm
    } else if any_rain {
        Advisory::Rainy
    } else if any_snow || mean_temp < 0.0 {
        Advisory::ColdSnow
    } else {
        Advisory::Pleasant
    };

    Ok(advisory)
}

/// Mean temperature across the full set. Callers guarantee non-empty input.
fn mean_temperature(records: &[ForecastRecord]) -> f64 {
    let sum: f64 = records.iter().map(|r| r.temperature).sum();
    sum / records.len() as f64
}

/// Case-insensitive substring check over every description in the set.
fn any_description_contains(records: &[ForecastRecord], needle: &str) -> bool {
    records
        .iter()
        .any(|r| r.description.to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(description: &str, temperature: f64) -> ForecastRecord {
        ForecastRecord {
            time: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            description: description.to_string(),
            temperature,
            humidity: 55,
            wind_speed: 3,
        }
    }

    // --- Priority ordering --------------------------------------------------

    #[test]
    fn test_sunny_warm_wins_over_rain() {
        // One clear-sky record at 25 °C plus one rainy record: rule 1
        // precedes rule 2, so the result must be SunnyWarm.
        let records = vec![record("clear sky", 25.0), record("light rain", 25.0)];
        assert_eq!(advise(&records), Ok(Advisory::SunnyWarm));
    }

    #[test]
    fn test_clear_sky_outside_warm_band_falls_through_to_rain() {
        // Clear sky present but the mean is 10 °C, so rule 1 does not fire
        // and the rain record decides.
        let records = vec![record("clear sky", 8.0), record("light rain", 12.0)];
        assert_eq!(advise(&records), Ok(Advisory::Rainy));
    }

    #[test]
    fn test_rain_wins_over_snow() {
        let records = vec![record("light rain", 2.0), record("snow shower", 2.0)];
        assert_eq!(advise(&records), Ok(Advisory::Rainy));
    }

    // --- Individual rules ---------------------------------------------------

    #[test]
    fn test_snow_description_triggers_cold_even_when_mild() {
        // "snow shower" at a mean of 5 °C: rule 3 fires on the description
        // alone, independent of the temperature threshold.
        let records = vec![record("snow shower", 5.0)];
        assert_eq!(advise(&records), Ok(Advisory::ColdSnow));
    }

    #[test]
    fn test_subzero_mean_triggers_cold_without_snow_description() {
        let records = vec![record("overcast clouds", -3.0), record("mist", -1.0)];
        assert_eq!(advise(&records), Ok(Advisory::ColdSnow));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let records = vec![record("Clear Sky", 25.0)];
        assert_eq!(advise(&records), Ok(Advisory::SunnyWarm));

        let records = vec![record("Light RAIN", 12.0)];
        assert_eq!(advise(&records), Ok(Advisory::Rainy));
    }

    #[test]
    fn test_nothing_matches_yields_pleasant() {
        let records = vec![record("scattered clouds", 14.0), record("mist", 12.0)];
        assert_eq!(advise(&records), Ok(Advisory::Pleasant));
    }

    // --- Warm band boundaries -----------------------------------------------

    #[test]
    fn test_warm_band_is_inclusive_at_both_ends() {
        let at_20 = vec![record("clear sky", 20.0)];
        assert_eq!(advise(&at_20), Ok(Advisory::SunnyWarm));

        let at_30 = vec![record("clear sky", 30.0)];
        assert_eq!(advise(&at_30), Ok(Advisory::SunnyWarm));

        let above_30 = vec![record("clear sky", 30.01)];
        assert_eq!(advise(&above_30), Ok(Advisory::Pleasant));
    }

    #[test]
    fn test_mean_is_over_the_full_set() {
        // 35 and 15 individually miss the band; their mean (25) is inside.
        let records = vec![record("clear sky", 35.0), record("few clouds", 15.0)];
        assert_eq!(advise(&records), Ok(Advisory::SunnyWarm));
    }

    // --- Degenerate input ---------------------------------------------------

    #[test]
    fn test_empty_set_is_an_error() {
        assert_eq!(advise(&[]), Err(AdvisoryError::EmptyInput));
    }
}
