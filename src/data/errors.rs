//! # Data Errors

use thiserror::Error;

/// Result type for table operations
pub type DataResult<T> = Result<T, DataError>;

/// Table construction and access errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Row {index} out of bounds (rows={rows})")]
    RowOutOfBounds { index: usize, rows: usize },

    #[error("Record {index} has {actual} values, expected {expected}")]
    RecordWidth {
        index: usize,
        expected: usize,
        actual: usize,
    },
}
