//! Snapshot export
//!
//! A snapshot is the catalog descriptor of a static store, serialized once
//! as pretty JSON. Viewers can load it without a running server.
//!
//! The file is written next to its destination under a temporary name,
//! fsynced, then renamed into place, so readers never observe a partial
//! snapshot.

mod errors;

pub use errors::{SnapshotError, SnapshotResult};

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::store::{ArtifactStore, StoreMode};

/// Serialize the catalog of a static store
pub fn render_snapshot(store: &dyn ArtifactStore) -> SnapshotResult<String> {
    if store.mode() != StoreMode::Static {
        return Err(SnapshotError::UnsupportedMode(store.mode()));
    }
    Ok(serde_json::to_string_pretty(&store.catalog())?)
}

/// Write the snapshot of `store` to `path`. Returns the number of bytes
/// written.
pub fn export_snapshot(store: &dyn ArtifactStore, path: &Path) -> SnapshotResult<usize> {
    let rendered = render_snapshot(store)?;
    let temp = temp_path(path);

    let result = write_synced(&temp, rendered.as_bytes())
        .and_then(|_| fs::rename(&temp, path).map_err(|e| SnapshotError::io(path, e)));
    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result?;

    info!(
        path = %path.display(),
        bytes = rendered.len(),
        "Snapshot exported"
    );
    Ok(rendered.len())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> SnapshotResult<()> {
    let mut file = File::create(path).map_err(|e| SnapshotError::io(path, e))?;
    file.write_all(bytes).map_err(|e| SnapshotError::io(path, e))?;
    file.sync_all().map_err(|e| SnapshotError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NumericEngine;
    use crate::store::build_store;
    use tempfile::TempDir;

    #[test]
    fn test_live_store_is_rejected() {
        let store = build_store(StoreMode::Live, NumericEngine::new());
        assert!(matches!(
            render_snapshot(store.as_ref()),
            Err(SnapshotError::UnsupportedMode(StoreMode::Live))
        ));
    }

    #[test]
    fn test_export_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("arena.json");
        let store = build_store(StoreMode::Static, NumericEngine::new());

        let written = export_snapshot(store.as_ref(), &path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len() as usize, written);
        assert!(!dir.path().join("arena.json.tmp").exists());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("arena.json");
        let store = build_store(StoreMode::Static, NumericEngine::new());

        let err = export_snapshot(store.as_ref(), &path).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
