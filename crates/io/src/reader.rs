//! High-level Parquet reader orchestration.

use std::path::Path;

use drought_duration::DurationMatrix;
use tracing::debug;

use crate::error::IoError;
use crate::parquet_read;
use crate::table::DurationTable;

/// Read a drought-duration table from a Parquet file.
///
/// The file is expected in the wide layout produced by the upstream drought
/// model: one row per grid cell, one numeric column per time step. Integer
/// and floating-point columns are accepted; all are read as `f64`. Columns
/// holding a pandas DataFrame index are skipped and not written back.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Validation`] if a column is non-numeric, contains nulls, or
/// the batches disagree on schema, and [`IoError::Parquet`] for read
/// failures.
pub fn read_parquet(path: &Path) -> Result<DurationTable, IoError> {
    let (schema, batches) = parquet_read::read_batches(path)?;
    let layout = parquet_read::validate_schema(&schema)?;
    let (n_rows, data) = parquet_read::batches_to_row_major(&batches, &schema, &layout.indices)?;

    let n_cols = layout.columns.len();
    let matrix = DurationMatrix::new(n_rows, n_cols, data)?;
    debug!(
        path = %path.display(),
        n_rows,
        n_cols,
        skipped_index_columns = schema.fields().len() - n_cols,
        n_batches = batches.len(),
        "read duration table"
    );
    DurationTable::new(layout.columns, matrix)
}
