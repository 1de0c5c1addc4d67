//! Configuration for duration-threshold filtering.

use crate::error::DurationError;
use crate::filter::check_threshold;

/// Configuration for duration-threshold filtering.
///
/// # Example
///
/// ```
/// use drought_duration::FilterConfig;
///
/// let config = FilterConfig::new().with_threshold(3.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct FilterConfig {
    threshold: f64,
}

impl FilterConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `threshold = 1.0`, which keeps every episode.
    pub fn new() -> Self {
        Self { threshold: 1.0 }
    }

    /// Sets the minimum episode duration to keep.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns the minimum episode duration to keep.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Validates this configuration.
    ///
    /// Any threshold that compares against durations is accepted, including
    /// zero, negative and infinite values.
    pub fn validate(&self) -> Result<(), DurationError> {
        check_threshold(self.threshold)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new()
    }
}
