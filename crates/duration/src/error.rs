//! Error types for the drought-duration crate.

/// Error type for all fallible operations in the drought-duration crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DurationError {
    /// Returned when a duration read by the scan is NaN or infinite.
    #[error("non-finite duration {value} at index {index}")]
    NonFiniteDuration {
        /// Terminal index holding the value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a duration read by the scan is negative.
    #[error("negative duration {value} at index {index}")]
    NegativeDuration {
        /// Terminal index holding the value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a duration read by the scan is not a whole number of steps.
    #[error("fractional duration {value} at index {index}")]
    FractionalDuration {
        /// Terminal index holding the value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when an episode would begin before index 0.
    #[error("episode of duration {duration} ending at index {index} extends before the start of the series")]
    SpanOutOfBounds {
        /// Terminal index of the episode.
        index: usize,
        /// Recorded duration.
        duration: f64,
    },

    /// Returned when the threshold cannot be compared against durations.
    #[error("invalid threshold: {reason}")]
    InvalidThreshold {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when matrix data does not match the declared shape.
    #[error("shape mismatch: {n_rows} x {n_cols} matrix needs {expected} values, got {got}")]
    ShapeMismatch {
        /// Declared number of rows.
        n_rows: usize,
        /// Declared number of columns.
        n_cols: usize,
        /// `n_rows * n_cols`.
        expected: usize,
        /// Actual data length.
        got: usize,
    },

    /// Returned when a declared matrix shape has more cells than `usize` can count.
    #[error("shape overflow: {n_rows} x {n_cols} matrix is too large")]
    ShapeOverflow {
        /// Declared number of rows.
        n_rows: usize,
        /// Declared number of columns.
        n_cols: usize,
    },

    /// Returned when rows passed to a matrix constructor differ in length.
    #[error("ragged rows: row {row} has {got} values, expected {expected}")]
    RaggedRows {
        /// Index of the first row with the wrong length.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// Returned when a pre-allocated buffer has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },

    /// Wraps an error raised while processing one row of a matrix.
    #[error("row {row}: {source}")]
    Row {
        /// Matrix row that failed.
        row: usize,
        /// Underlying error.
        #[source]
        source: Box<DurationError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_non_finite_duration() {
        let e = DurationError::NonFiniteDuration {
            index: 4,
            value: f64::NAN,
        };
        assert_eq!(e.to_string(), "non-finite duration NaN at index 4");
    }

    #[test]
    fn error_negative_duration() {
        let e = DurationError::NegativeDuration {
            index: 2,
            value: -3.0,
        };
        assert_eq!(e.to_string(), "negative duration -3 at index 2");
    }

    #[test]
    fn error_fractional_duration() {
        let e = DurationError::FractionalDuration {
            index: 7,
            value: 2.5,
        };
        assert_eq!(e.to_string(), "fractional duration 2.5 at index 7");
    }

    #[test]
    fn error_span_out_of_bounds() {
        let e = DurationError::SpanOutOfBounds {
            index: 2,
            duration: 5.0,
        };
        assert_eq!(
            e.to_string(),
            "episode of duration 5 ending at index 2 extends before the start of the series"
        );
    }

    #[test]
    fn error_invalid_threshold() {
        let e = DurationError::InvalidThreshold {
            reason: "threshold is NaN".to_string(),
        };
        assert_eq!(e.to_string(), "invalid threshold: threshold is NaN");
    }

    #[test]
    fn error_shape_mismatch() {
        let e = DurationError::ShapeMismatch {
            n_rows: 2,
            n_cols: 3,
            expected: 6,
            got: 5,
        };
        assert_eq!(
            e.to_string(),
            "shape mismatch: 2 x 3 matrix needs 6 values, got 5"
        );
    }

    #[test]
    fn error_shape_overflow() {
        let e = DurationError::ShapeOverflow {
            n_rows: usize::MAX,
            n_cols: 2,
        };
        assert_eq!(
            e.to_string(),
            format!("shape overflow: {} x 2 matrix is too large", usize::MAX)
        );
    }

    #[test]
    fn error_ragged_rows() {
        let e = DurationError::RaggedRows {
            row: 1,
            expected: 12,
            got: 11,
        };
        assert_eq!(e.to_string(), "ragged rows: row 1 has 11 values, expected 12");
    }

    #[test]
    fn error_row_wraps_source() {
        let e = DurationError::Row {
            row: 3,
            source: Box::new(DurationError::NegativeDuration {
                index: 1,
                value: -1.0,
            }),
        };
        assert_eq!(e.to_string(), "row 3: negative duration -1 at index 1");
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<DurationError>();
    }
}
