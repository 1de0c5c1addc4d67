//! Duration-threshold filtering.
//!
//! A single backward scan reads the duration at each episode's terminal
//! index, zeroes the episode if it is shorter than the threshold, and jumps
//! straight past it. The series is validated along the same path first, so
//! a malformed series is rejected before anything is written.

use tracing::trace;

use crate::episode::validate_series;
use crate::error::DurationError;

/// Rejects thresholds that cannot be compared against durations.
pub(crate) fn check_threshold(threshold: f64) -> Result<(), DurationError> {
    if threshold.is_nan() {
        return Err(DurationError::InvalidThreshold {
            reason: "threshold is NaN".to_string(),
        });
    }
    Ok(())
}

/// Zeroes every episode shorter than `threshold`, in place.
///
/// An episode whose duration equals `threshold` is kept. A threshold of
/// zero or below removes nothing. The slice is returned for chaining.
///
/// # Errors
///
/// Returns [`DurationError::InvalidThreshold`] for a NaN threshold, or a
/// duration error if a value read by the scan is not a valid step count or
/// its episode would start before index 0. On error `series` is unchanged.
///
/// # Example
///
/// ```
/// use drought_duration::apply_duration_threshold;
///
/// let mut series = [0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0, 0.0];
/// apply_duration_threshold(&mut series, 3.0).unwrap();
/// assert_eq!(series, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0]);
/// ```
pub fn apply_duration_threshold(
    series: &mut [f64],
    threshold: f64,
) -> Result<&mut [f64], DurationError> {
    check_threshold(threshold)?;
    validate_series(series)?;
    let eliminated = eliminate_short(series, threshold);
    trace!(
        len = series.len(),
        threshold,
        eliminated,
        "applied duration threshold"
    );
    Ok(series)
}

/// Returns a filtered copy of `series`, leaving the input untouched.
///
/// # Errors
///
/// Same as [`apply_duration_threshold`].
pub fn duration_thresholded(series: &[f64], threshold: f64) -> Result<Vec<f64>, DurationError> {
    let mut out = series.to_vec();
    apply_duration_threshold(&mut out, threshold)?;
    Ok(out)
}

/// Writes a filtered copy of `series` into a pre-allocated buffer.
///
/// # Errors
///
/// Returns [`DurationError::BufferLengthMismatch`] if `out.len() != series.len()`,
/// otherwise the same errors as [`apply_duration_threshold`]. `out` is only
/// written once validation has passed.
pub fn apply_duration_threshold_into(
    series: &[f64],
    threshold: f64,
    out: &mut [f64],
) -> Result<(), DurationError> {
    if out.len() != series.len() {
        return Err(DurationError::BufferLengthMismatch {
            expected: series.len(),
            got: out.len(),
        });
    }
    check_threshold(threshold)?;
    validate_series(series)?;
    out.copy_from_slice(series);
    eliminate_short(out, threshold);
    Ok(())
}

/// The scan proper. Assumes `series` passed [`validate_series`].
///
/// Returns the number of episodes zeroed.
pub(crate) fn eliminate_short(series: &mut [f64], threshold: f64) -> usize {
    let mut eliminated = 0;
    let mut cursor = series.len().checked_sub(1);
    while let Some(t) = cursor.filter(|&t| t > 0) {
        let drlen = series[t] as usize;
        if drlen > 0 && (drlen as f64) < threshold {
            series[t + 1 - drlen..=t].fill(0.0);
            eliminated += 1;
        }
        // Skip the episode and the non-drought step before it. With
        // drlen == 0 this is an ordinary one-step advance.
        cursor = t.checked_sub(drlen + 1);
    }
    eliminated
}
