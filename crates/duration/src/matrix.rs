//! Row-wise filtering of duration matrices.
//!
//! Each row is an independent duration series (a grid cell, with time
//! steps along the columns). Rows are processed in parallel; they never
//! share storage, so each rayon job owns its row outright.

use rayon::prelude::*;
use tracing::debug;

use crate::config::FilterConfig;
use crate::episode::{EpisodeSummary, summarize, validate_series};
use crate::error::DurationError;
use crate::filter::{check_threshold, eliminate_short};

/// Row-major matrix of duration series.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl DurationMatrix {
    /// Wraps row-major `data` as an `n_rows x n_cols` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`DurationError::ShapeOverflow`] if `n_rows * n_cols` overflows,
    /// or [`DurationError::ShapeMismatch`] if `data.len() != n_rows * n_cols`.
    pub fn new(n_rows: usize, n_cols: usize, data: Vec<f64>) -> Result<Self, DurationError> {
        let expected = n_rows
            .checked_mul(n_cols)
            .ok_or(DurationError::ShapeOverflow { n_rows, n_cols })?;
        if data.len() != expected {
            return Err(DurationError::ShapeMismatch {
                n_rows,
                n_cols,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            n_rows,
            n_cols,
            data,
        })
    }

    /// Builds a matrix from equal-length rows.
    ///
    /// # Errors
    ///
    /// Returns [`DurationError::RaggedRows`] if any row differs in length
    /// from the first.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DurationError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(DurationError::RaggedRows {
                row,
                expected: n_cols,
                got: r.len(),
            });
        }
        Ok(Self {
            n_rows,
            n_cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows (series).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns (time steps per series).
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.n_rows, "row index {i} out of range");
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_rows).map(|i| self.row(i))
    }

    /// The row-major backing data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix, returning the row-major backing data.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    fn is_degenerate(&self) -> bool {
        self.n_rows == 0 || self.n_cols == 0
    }

    /// Validates every row, reporting the lowest-indexed failure.
    fn validate_rows(&self) -> Result<(), DurationError> {
        let failure = self
            .data
            .par_chunks(self.n_cols)
            .enumerate()
            .find_map_first(|(row, series)| {
                validate_series(series).err().map(|e| DurationError::Row {
                    row,
                    source: Box::new(e),
                })
            });
        failure.map_or(Ok(()), Err)
    }

    /// Applies the duration threshold to every row, in place.
    ///
    /// All rows are validated before any row is modified, so on error the
    /// matrix is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DurationError::InvalidThreshold`] for a NaN threshold, or
    /// [`DurationError::Row`] wrapping the failure of the lowest-indexed
    /// malformed row.
    pub fn apply_duration_threshold(&mut self, threshold: f64) -> Result<usize, DurationError> {
        check_threshold(threshold)?;
        if self.is_degenerate() {
            return Ok(0);
        }
        self.validate_rows()?;

        let eliminated: usize = self
            .data
            .par_chunks_mut(self.n_cols)
            .map(|series| eliminate_short(series, threshold))
            .sum();
        debug!(
            n_rows = self.n_rows,
            n_cols = self.n_cols,
            threshold,
            eliminated,
            "applied duration threshold to matrix"
        );
        Ok(eliminated)
    }

    /// Applies the threshold from `config`. See [`Self::apply_duration_threshold`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::apply_duration_threshold`].
    pub fn apply_config(&mut self, config: &FilterConfig) -> Result<usize, DurationError> {
        config.validate()?;
        self.apply_duration_threshold(config.threshold())
    }

    /// Summarises the episodes of each row.
    ///
    /// # Errors
    ///
    /// Returns [`DurationError::Row`] for the lowest-indexed malformed row.
    pub fn summarize_rows(&self) -> Result<Vec<EpisodeSummary>, DurationError> {
        if self.is_degenerate() {
            return Ok(vec![EpisodeSummary::default(); self.n_rows]);
        }
        let per_row: Vec<Result<EpisodeSummary, DurationError>> = self
            .data
            .par_chunks(self.n_cols)
            .enumerate()
            .map(|(row, series)| {
                summarize(series).map_err(|e| DurationError::Row {
                    row,
                    source: Box::new(e),
                })
            })
            .collect();
        // Sequential collect stops at the first error in row order.
        per_row.into_iter().collect()
    }

    /// Summarises the episodes of the whole matrix.
    ///
    /// # Errors
    ///
    /// Same as [`Self::summarize_rows`].
    pub fn summarize(&self) -> Result<EpisodeSummary, DurationError> {
        Ok(self
            .summarize_rows()?
            .into_iter()
            .fold(EpisodeSummary::default(), EpisodeSummary::merge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_shape() {
        let err = DurationMatrix::new(2, 3, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            DurationError::ShapeMismatch {
                n_rows: 2,
                n_cols: 3,
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn new_rejects_overflowing_shape() {
        let n_rows = usize::MAX / 2 + 1;
        let err = DurationMatrix::new(n_rows, 2, Vec::new()).unwrap_err();
        assert_eq!(err, DurationError::ShapeOverflow { n_rows, n_cols: 2 });
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = DurationMatrix::from_rows(vec![vec![0.0; 3], vec![0.0; 3], vec![0.0; 2]])
            .unwrap_err();
        assert_eq!(
            err,
            DurationError::RaggedRows {
                row: 2,
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn row_access() {
        let m = DurationMatrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.rows().count(), 2);
    }

    #[test]
    fn empty_matrix_is_fine() {
        let mut m = DurationMatrix::from_rows(Vec::new()).unwrap();
        assert_eq!(m.apply_duration_threshold(3.0).unwrap(), 0);
        assert!(m.summarize_rows().unwrap().is_empty());

        let mut zero_cols = DurationMatrix::new(3, 0, Vec::new()).unwrap();
        assert_eq!(zero_cols.apply_duration_threshold(3.0).unwrap(), 0);
        assert_eq!(zero_cols.summarize_rows().unwrap().len(), 3);
    }

    #[test]
    fn filters_each_row() {
        let mut m = DurationMatrix::from_rows(vec![
            vec![0.0, 0.0, 2.0, 0.0],
            vec![0.0, 1.0, 2.0, 3.0],
        ])
        .unwrap();
        let n = m.apply_duration_threshold(3.0).unwrap();
        assert_eq!(n, 1);
        assert_eq!(m.row(0), &[0.0; 4]);
        assert_eq!(m.row(1), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn bad_row_reported_and_matrix_untouched() {
        let orig = DurationMatrix::from_rows(vec![
            vec![0.0, 0.0, 1.0],
            vec![0.0, 0.0, 7.0],
        ])
        .unwrap();
        let mut m = orig.clone();
        let err = m.apply_duration_threshold(5.0).unwrap_err();
        match err {
            DurationError::Row { row, source } => {
                assert_eq!(row, 1);
                assert!(matches!(*source, DurationError::SpanOutOfBounds { .. }));
            }
            other => panic!("expected Row error, got {other:?}"),
        }
        assert_eq!(m, orig);
    }

    #[test]
    fn lowest_bad_row_is_reported() {
        // Every odd row is malformed; row 1 must win regardless of scheduling.
        let rows: Vec<Vec<f64>> = (0..256)
            .map(|i| {
                if i % 2 == 1 {
                    vec![0.0, 0.0, -1.0]
                } else {
                    vec![0.0, 0.0, 1.0]
                }
            })
            .collect();
        let mut m = DurationMatrix::from_rows(rows).unwrap();
        for _ in 0..8 {
            match m.apply_duration_threshold(2.0).unwrap_err() {
                DurationError::Row { row, .. } => assert_eq!(row, 1),
                other => panic!("expected Row error, got {other:?}"),
            }
            match m.summarize_rows().unwrap_err() {
                DurationError::Row { row, .. } => assert_eq!(row, 1),
                other => panic!("expected Row error, got {other:?}"),
            }
        }
    }

    #[test]
    fn apply_config_uses_threshold() {
        let mut m = DurationMatrix::from_rows(vec![vec![0.0, 0.0, 2.0]]).unwrap();
        let cfg = FilterConfig::new().with_threshold(3.0);
        assert_eq!(m.apply_config(&cfg).unwrap(), 1);
        assert_eq!(m.into_vec(), vec![0.0; 3]);
    }

    #[test]
    fn summarize_whole_matrix() {
        let m = DurationMatrix::from_rows(vec![
            vec![0.0, 0.0, 2.0, 0.0],
            vec![0.0, 1.0, 2.0, 3.0],
        ])
        .unwrap();
        let s = m.summarize().unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.total_steps, 5);
        assert_eq!(s.max_duration, 3);
    }
}
