//! # Store Errors

use thiserror::Error;

use crate::artifact::ArtifactKey;
use crate::engine::EngineError;
use crate::registry::RegistryError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
///
/// Registration errors leave the store unchanged for that call. Query
/// errors never change the store at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Model label already registered: {0}")]
    DuplicateLabel(String),

    #[error("Row identifier already registered: {0}")]
    DuplicateRowId(String),

    #[error("Invalid explainer '{label}': {reason}")]
    InvalidExplainer { label: String, reason: String },

    #[error("Invalid observation batch: {0}")]
    InvalidBatch(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Observation not found: {0}")]
    ObservationNotFound(String),

    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    /// Static store only: the cascade never produced this artifact
    #[error("Artifact not materialized: {0}")]
    ArtifactMissing(ArtifactKey),

    #[error("Computation failed for {key}: {source}")]
    ComputationError {
        key: ArtifactKey,
        #[source]
        source: EngineError,
    },
}

impl StoreError {
    /// Raised by `register_*` before anything was stored
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateLabel(_)
                | StoreError::DuplicateRowId(_)
                | StoreError::InvalidExplainer { .. }
                | StoreError::InvalidBatch(_)
        )
    }

    /// Lookup and validation failures of the read path
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::ModelNotFound(_)
                | StoreError::ObservationNotFound(_)
                | StoreError::VariableNotFound(_)
                | StoreError::ArtifactMissing(_)
        )
    }
}

impl From<RegistryError> for StoreError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::DuplicateLabel(label) => StoreError::DuplicateLabel(label),
            RegistryError::InvalidExplainer { label, reason } => {
                StoreError::InvalidExplainer { label, reason }
            }
            RegistryError::DuplicateRowId(id) => StoreError::DuplicateRowId(id),
            RegistryError::InvalidBatch(reason) => StoreError::InvalidBatch(reason),
        }
    }
}
