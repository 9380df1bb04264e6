//! Heart-rate series aggregation.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Arithmetic mean of a reading series.
///
/// Fails with [`CoreError::EmptySeries`] on an empty series.
pub fn average(readings: &[f64]) -> Result<f64, CoreError> {
    if readings.is_empty() {
        return Err(CoreError::EmptySeries);
    }
    Ok(readings.iter().sum::<f64>() / readings.len() as f64)
}

/// Mean of the readings in the window anchored at `since`.
///
/// The window starts at the first timestamp strictly older than `since`,
/// scanning from the front and stopping at the first match; if no timestamp
/// is older, the window covers the whole series. With append-only ascending
/// timestamps the window is therefore usually the full series. This is the
/// behaviour the service has always had, pinned by
/// `first_older_timestamp_wins` below.
///
/// `timestamps` must be parallel to `readings` (same length), which the
/// repository guarantees.
pub fn windowed_average(
    readings: &[f64],
    timestamps: &[Timestamp],
    since: Timestamp,
) -> Result<f64, CoreError> {
    let mut start_index = 0;
    for (index, ts) in timestamps.iter().enumerate() {
        if *ts < since {
            start_index = index;
            break;
        }
    }
    average(&readings[start_index..])
}
