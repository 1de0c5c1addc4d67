//! # drought-io
//!
//! Read and write drought-duration matrices as Parquet. Bridges the wide
//! grid-cell-by-time-step files produced upstream into
//! [`drought_duration::DurationMatrix`], and writes filtered matrices back
//! with their original column names and storage types.

mod error;
mod parquet_read;
mod parquet_write;
mod reader;
mod table;
mod writer;

pub use error::IoError;
pub use reader::read_parquet;
pub use table::{ColumnMeta, DurationTable};
pub use writer::{Compression, WriterConfig, write_parquet};
