//! Error types for drought-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the drought-io crate.
///
/// Covers missing files, Parquet/Arrow failures, schema and value
/// validation problems, and malformed duration data.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps an error originating from the drought-duration crate.
    #[error("duration error: {reason}")]
    Duration {
        /// Description of the underlying duration failure.
        reason: String,
    },
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<drought_duration::DurationError> for IoError {
    fn from(e: drought_duration::DurationError) -> Self {
        IoError::Duration {
            reason: e.to_string(),
        }
    }
}
