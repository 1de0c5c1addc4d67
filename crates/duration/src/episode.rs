//! Episode recovery from drought-duration series.
//!
//! Episodes are never stored explicitly: the duration at an episode's
//! terminal index is the only record of it. [`episodes`] walks the series
//! backward along the same cursor path the threshold filter uses, so the
//! episodes it yields are exactly the ones the filter examines.

use crate::error::DurationError;

/// A drought episode recovered from a duration series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Episode {
    /// First index of the episode.
    pub start: usize,
    /// Terminal index, where the duration is recorded.
    pub end: usize,
    /// Number of time steps, `end - start + 1`.
    pub duration: usize,
}

/// Backward iterator over the episodes of a duration series.
///
/// Created by [`episodes`]. Yields at most one error, after which it is
/// exhausted.
#[derive(Debug, Clone)]
pub struct Episodes<'a> {
    series: &'a [f64],
    cursor: Option<usize>,
}

/// Iterates the episodes of `series`, last terminal index first.
///
/// Index 0 is never read as a terminal index; an episode touching index 0
/// is only found through the duration stored at its later terminal index.
pub fn episodes(series: &[f64]) -> Episodes<'_> {
    Episodes {
        series,
        cursor: series.len().checked_sub(1),
    }
}

impl Iterator for Episodes<'_> {
    type Item = Result<Episode, DurationError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let t = self.cursor.filter(|&t| t > 0)?;
            let duration = match read_duration(t, self.series[t]) {
                Ok(d) => d,
                Err(e) => {
                    self.cursor = None;
                    return Some(Err(e));
                }
            };
            // The step before an episode is non-drought by construction,
            // so it is skipped along with the episode itself.
            self.cursor = t.checked_sub(duration + 1);
            if duration > 0 {
                return Some(Ok(Episode {
                    start: t + 1 - duration,
                    end: t,
                    duration,
                }));
            }
        }
    }
}

impl std::iter::FusedIterator for Episodes<'_> {}

/// Reads the duration stored at terminal index `index`.
///
/// Rejects values that cannot be used as a step count, and durations whose
/// episode would start before index 0.
pub(crate) fn read_duration(index: usize, value: f64) -> Result<usize, DurationError> {
    if !value.is_finite() {
        return Err(DurationError::NonFiniteDuration { index, value });
    }
    if value < 0.0 {
        return Err(DurationError::NegativeDuration { index, value });
    }
    if value.fract() != 0.0 {
        return Err(DurationError::FractionalDuration { index, value });
    }
    if value > (index + 1) as f64 {
        return Err(DurationError::SpanOutOfBounds {
            index,
            duration: value,
        });
    }
    Ok(value as usize)
}

/// Checks every duration the threshold scan would read.
///
/// # Errors
///
/// Returns the first [`DurationError`] met on the backward cursor path.
pub fn validate_series(series: &[f64]) -> Result<(), DurationError> {
    episodes(series).try_for_each(|ep| ep.map(|_| ()))
}

/// Aggregate description of the episodes in a series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EpisodeSummary {
    /// Number of episodes.
    pub count: usize,
    /// Sum of all episode durations.
    pub total_steps: usize,
    /// Longest episode duration, 0 when there are none.
    pub max_duration: usize,
    /// Mean episode duration, 0.0 when there are none.
    pub mean_duration: f64,
}

impl EpisodeSummary {
    /// Combines two summaries, e.g. from different rows of a matrix.
    pub fn merge(self, other: Self) -> Self {
        let count = self.count + other.count;
        let total_steps = self.total_steps + other.total_steps;
        Self {
            count,
            total_steps,
            max_duration: self.max_duration.max(other.max_duration),
            mean_duration: mean(total_steps, count),
        }
    }
}

fn mean(total_steps: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_steps as f64 / count as f64
    }
}

/// Summarises the episodes of `series`.
///
/// # Errors
///
/// Returns [`DurationError`] if the series is malformed (see [`validate_series`]).
pub fn summarize(series: &[f64]) -> Result<EpisodeSummary, DurationError> {
    let mut summary = EpisodeSummary::default();
    for ep in episodes(series) {
        let ep = ep?;
        summary.count += 1;
        summary.total_steps += ep.duration;
        summary.max_duration = summary.max_duration.max(ep.duration);
    }
    summary.mean_duration = mean(summary.total_steps, summary.count);
    Ok(summary)
}
