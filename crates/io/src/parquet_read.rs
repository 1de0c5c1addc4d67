//! Low-level Parquet reading and column extraction.

use std::path::Path;

use arrow::array::{Array, AsArray, RecordBatch};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float64Type, Schema, SchemaRef};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;
use crate::table::{ColumnMeta, is_duration_type};

/// Reads the schema and all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_batches(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>), IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches: Vec<RecordBatch> = reader.collect::<Result<Vec<_>, _>>()?;

    Ok((schema, batches))
}

/// Schema metadata key under which pandas records its DataFrame layout.
const PANDAS_METADATA_KEY: &str = "pandas";

/// Duration columns selected from a file schema.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SchemaLayout {
    /// Positions of the duration columns in the file schema.
    pub(crate) indices: Vec<usize>,
    /// Metadata for those columns, in the same order.
    pub(crate) columns: Vec<ColumnMeta>,
}

/// `__index_level_0__`, `__index_level_1__`, ...
fn is_index_level_name(name: &str) -> bool {
    name.strip_prefix("__index_level_")
        .and_then(|rest| rest.strip_suffix("__"))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Names of the columns holding a pandas DataFrame index.
///
/// Unnamed index levels are stored as `__index_level_N__`; named ones are
/// listed under `index_columns` in the `pandas` schema metadata. A
/// `RangeIndex` is recorded there as an object and has no stored column.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the `pandas` metadata is not valid JSON.
pub(crate) fn pandas_index_columns(schema: &Schema) -> Result<Vec<String>, IoError> {
    let mut names: Vec<String> = schema
        .fields()
        .iter()
        .map(|f| f.name())
        .filter(|n| is_index_level_name(n))
        .cloned()
        .collect();

    if let Some(raw) = schema.metadata().get(PANDAS_METADATA_KEY) {
        let meta: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| IoError::Validation {
                count: 1,
                details: format!("invalid pandas metadata: {e}"),
            })?;
        if let Some(cols) = meta
            .get("index_columns")
            .and_then(serde_json::Value::as_array)
        {
            names.extend(
                cols.iter()
                    .filter_map(serde_json::Value::as_str)
                    .map(str::to_string),
            );
        }
    }

    names.sort();
    names.dedup();
    Ok(names)
}

/// Selects the duration columns of `schema` and checks they are numeric.
///
/// pandas index columns are skipped. Every remaining column must hold
/// durations.
///
/// # Errors
///
/// Returns [`IoError::Validation`] listing every non-numeric column, if no
/// duration columns remain, or if the pandas metadata is malformed.
pub(crate) fn validate_schema(schema: &Schema) -> Result<SchemaLayout, IoError> {
    let index_columns = pandas_index_columns(schema)?;
    let selected: Vec<(usize, &Field)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| !index_columns.contains(f.name()))
        .map(|(i, f)| (i, &**f))
        .collect();

    if selected.is_empty() {
        return Err(IoError::Validation {
            count: 1,
            details: "file has no duration columns".to_string(),
        });
    }

    let mismatches: Vec<String> = selected
        .iter()
        .filter(|(_, f)| !is_duration_type(f.data_type()))
        .map(|(_, f)| format!("column '{}' has non-numeric type {}", f.name(), f.data_type()))
        .collect();

    if !mismatches.is_empty() {
        return Err(IoError::Validation {
            count: mismatches.len(),
            details: mismatches.join("; "),
        });
    }

    Ok(SchemaLayout {
        indices: selected.iter().map(|(i, _)| *i).collect(),
        columns: selected
            .iter()
            .map(|(_, f)| ColumnMeta::new(f.name().as_str(), f.data_type().clone()))
            .collect(),
    })
}

/// Copies the selected columns of record batches into a row-major `f64`
/// buffer.
///
/// Every selected column is cast to `Float64`. Rows keep their file order.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if a batch's schema differs from the
/// file schema or a selected column contains nulls, or [`IoError::Parquet`]
/// if a cast fails.
pub(crate) fn batches_to_row_major(
    batches: &[RecordBatch],
    schema: &Schema,
    selected: &[usize],
) -> Result<(usize, Vec<f64>), IoError> {
    let n_cols = selected.len();
    let n_rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    let mut data = vec![0.0; n_rows * n_cols];

    let mut row_offset = 0;
    for (b, batch) in batches.iter().enumerate() {
        if batch.schema().fields() != schema.fields() {
            return Err(IoError::Validation {
                count: 1,
                details: format!("record batch {b} schema differs from file schema"),
            });
        }

        for (c, &src) in selected.iter().enumerate() {
            let column = batch.column(src);
            if column.null_count() > 0 {
                return Err(IoError::Validation {
                    count: 1,
                    details: format!(
                        "column '{}' contains {} null value(s)",
                        schema.field(src).name(),
                        column.null_count()
                    ),
                });
            }
            let as_f64 = cast(column, &DataType::Float64)?;
            let values = as_f64.as_primitive::<Float64Type>();
            for (r, &v) in values.values().iter().enumerate() {
                data[(row_offset + r) * n_cols + c] = v;
            }
        }
        row_offset += batch.num_rows();
    }

    Ok((n_rows, data))
}
