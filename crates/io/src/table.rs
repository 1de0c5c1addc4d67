//! In-memory duration table: a [`DurationMatrix`] plus Parquet column metadata.

use arrow::datatypes::DataType;
use drought_duration::DurationMatrix;

use crate::error::IoError;

/// Name and storage type of one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    name: String,
    data_type: DataType,
}

impl ColumnMeta {
    /// Creates column metadata.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arrow type the column is stored as on disk.
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }
}

/// Whether a column type can hold duration values.
pub(crate) fn is_duration_type(t: &DataType) -> bool {
    t.is_integer() || t.is_floating()
}

/// A drought-duration matrix with one named column per time step.
///
/// Rows are grid cells (or any other independent series); columns are time
/// steps. Column types are remembered so that a filtered table is written
/// back in the same storage type it was read in.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationTable {
    columns: Vec<ColumnMeta>,
    matrix: DurationMatrix,
}

impl DurationTable {
    /// Pairs column metadata with a matrix.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the column count does not match
    /// the matrix, or a column type is not an integer or float type.
    pub fn new(columns: Vec<ColumnMeta>, matrix: DurationMatrix) -> Result<Self, IoError> {
        let mut problems: Vec<String> = Vec::new();
        if columns.len() != matrix.n_cols() {
            problems.push(format!(
                "{} column names for a matrix with {} columns",
                columns.len(),
                matrix.n_cols()
            ));
        }
        for col in &columns {
            if !is_duration_type(col.data_type()) {
                problems.push(format!(
                    "column '{}' has non-numeric type {}",
                    col.name(),
                    col.data_type()
                ));
            }
        }
        if !problems.is_empty() {
            return Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            });
        }
        Ok(Self { columns, matrix })
    }

    /// Wraps a matrix with generated column names `t1, t2, ...`, all stored
    /// as `data_type`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `data_type` is not numeric.
    pub fn from_matrix(matrix: DurationMatrix, data_type: DataType) -> Result<Self, IoError> {
        let columns = (1..=matrix.n_cols())
            .map(|i| ColumnMeta::new(format!("t{i}"), data_type.clone()))
            .collect();
        Self::new(columns, matrix)
    }

    /// Column metadata, in order.
    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    /// The duration values.
    pub fn matrix(&self) -> &DurationMatrix {
        &self.matrix
    }

    /// Mutable access to the duration values, e.g. for filtering in place.
    pub fn matrix_mut(&mut self) -> &mut DurationMatrix {
        &mut self.matrix
    }

    /// Consumes the table, returning the matrix.
    pub fn into_matrix(self) -> DurationMatrix {
        self.matrix
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.matrix.n_rows()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.matrix.n_cols()
    }
}
