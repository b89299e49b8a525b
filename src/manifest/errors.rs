//! # Manifest Errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::data::DataError;
use crate::store::StoreError;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Manifest errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Cannot read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data for '{name}': {source}")]
    Data {
        name: String,
        #[source]
        source: DataError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
