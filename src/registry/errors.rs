//! # Registry Errors

use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Model label already registered: {0}")]
    DuplicateLabel(String),

    #[error("Invalid explainer '{label}': {reason}")]
    InvalidExplainer { label: String, reason: String },

    #[error("Row identifier already registered: {0}")]
    DuplicateRowId(String),

    #[error("Invalid observation batch: {0}")]
    InvalidBatch(String),
}
