//! Age-banded tachycardia classification.

const DAYS_PER_YEAR: f64 = 365.0;

/// Upper heart-rate thresholds per age band, ordered youngest to oldest.
/// Bounds are half-open `[min, max)` in years, using a 365-day year.
const AGE_BANDS: [(f64, f64, f64); 11] = [
    (1.0 / DAYS_PER_YEAR, 3.0 / DAYS_PER_YEAR, 159.0),
    (3.0 / DAYS_PER_YEAR, 7.0 / DAYS_PER_YEAR, 166.0),
    (7.0 / DAYS_PER_YEAR, 28.0 / DAYS_PER_YEAR, 182.0),
    (28.0 / DAYS_PER_YEAR, 90.0 / DAYS_PER_YEAR, 179.0),
    (90.0 / DAYS_PER_YEAR, 150.0 / DAYS_PER_YEAR, 186.0),
    (150.0 / DAYS_PER_YEAR, 1.0, 169.0),
    (1.0, 3.0, 151.0),
    (3.0, 5.0, 137.0),
    (5.0, 8.0, 133.0),
    (8.0, 12.0, 130.0),
    (12.0, 16.0, 119.0),
];

/// Threshold applied when no band matches: adults (16+), and ages below
/// 1/365 years, which fall through the band table.
const DEFAULT_THRESHOLD: f64 = 100.0;

/// Whether `heart_rate` is tachycardic for a patient of `age_years`.
///
/// Strict comparison: a reading exactly at the band threshold is not
/// tachycardic. Pure and total over all inputs; age validation is the
/// validator's job, not re-done here.
pub fn is_tachycardic(heart_rate: f64, age_years: f64) -> bool {
    let threshold = AGE_BANDS
        .iter()
        .find(|(min, max, _)| *min <= age_years && age_years < *max)
        .map(|(_, _, threshold)| *threshold)
        .unwrap_or(DEFAULT_THRESHOLD);

    heart_rate > threshold
}
