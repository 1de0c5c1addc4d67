//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch};
use arrow::compute::{CastOptions, cast_with_options};
use arrow::datatypes::{Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;
use crate::table::DurationTable;

/// Builds the Arrow schema for a duration table.
///
/// One non-nullable field per column, with the column's original type.
pub(crate) fn build_schema(table: &DurationTable) -> Schema {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|c| Field::new(c.name(), c.data_type().clone(), false))
        .collect();
    Schema::new(fields)
}

/// Converts a [`DurationTable`] into a single Arrow [`RecordBatch`].
///
/// Each matrix column is cast from `f64` to the type recorded for it. The
/// cast is strict: a value that does not fit the target type is an error
/// rather than a silent null.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if a value cannot be represented in its
/// column type, or [`IoError::Parquet`] if the batch cannot be assembled.
pub(crate) fn table_to_record_batch(
    table: &DurationTable,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let n_rows = table.n_rows();
    let n_cols = table.n_cols();
    let data = table.matrix().as_slice();
    let strict = CastOptions {
        safe: false,
        ..Default::default()
    };

    let columns: Vec<ArrayRef> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(c, meta)| {
            let values =
                Float64Array::from_iter_values((0..n_rows).map(|r| data[r * n_cols + c]));
            cast_with_options(&values, meta.data_type(), &strict).map_err(|e| {
                IoError::Validation {
                    count: 1,
                    details: format!("column '{}': {e}", meta.name()),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}
