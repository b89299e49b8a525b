//! # Workspace Manifest
//!
//! Declares the models and observation batches a server or export run
//! starts with:
//!
//! ```json
//! {
//!   "models": [{
//!     "label": "A",
//!     "target": "y",
//!     "columns": ["age", "income", "y"],
//!     "rows": [[30, 50000, 1], [41, 32000, 0]],
//!     "model": {"intercept": 0.1, "coefficients": {"age": 0.01}}
//!   }],
//!   "observations": [{
//!     "columns": ["age", "income"],
//!     "rows": [{"id": "Alice", "values": [30, 50000]}]
//!   }]
//! }
//! ```
//!
//! Models are registered before batches, each in file order.

mod errors;

pub use errors::{ManifestError, ManifestResult};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::{Cell, Table};
use crate::explainer::{Explainer, LinearModel};
use crate::observation::ObservationBatch;
use crate::store::ArtifactStore;

/// A model with its training data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub label: String,
    /// Name of the column holding the target
    pub target: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub model: LinearModel,
}

impl ModelEntry {
    pub fn to_explainer(&self) -> ManifestResult<Explainer> {
        let data = Table::from_records(self.columns.clone(), self.rows.clone())
            .map_err(|source| self.data_error(source))?;
        Explainer::with_target_column(&self.label, data, &self.target, self.model.clone())
            .map_err(|source| self.data_error(source))
    }

    fn data_error(&self, source: crate::data::DataError) -> ManifestError {
        ManifestError::Data {
            name: self.label.clone(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowEntry {
    pub id: String,
    pub values: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub columns: Vec<String>,
    pub rows: Vec<RowEntry>,
}

impl BatchEntry {
    pub fn to_batch(&self) -> ManifestResult<ObservationBatch> {
        let records = self
            .rows
            .iter()
            .map(|row| (row.id.clone(), row.values.clone()))
            .collect();
        ObservationBatch::from_records(self.columns.clone(), records).map_err(|source| {
            ManifestError::Data {
                name: "observation batch".to_string(),
                source,
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub observations: Vec<BatchEntry>,
}

impl Manifest {
    /// Load a manifest from a JSON file
    pub fn load(path: &Path) -> ManifestResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Register every model, then every batch. Stops at the first error.
    pub fn apply(&self, store: &mut dyn ArtifactStore) -> ManifestResult<()> {
        for entry in &self.models {
            store.register_explainer(entry.to_explainer()?)?;
        }
        for entry in &self.observations {
            store.register_batch(entry.to_batch()?)?;
        }
        info!(
            models = self.models.len(),
            batches = self.observations.len(),
            "Manifest applied"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NumericEngine;
    use crate::store::{build_store, StoreError, StoreMode};

    const MANIFEST: &str = r#"{
        "models": [{
            "label": "A",
            "target": "y",
            "columns": ["age", "income", "y"],
            "rows": [[30, 50000, 1], [41, 32000, 0], [25, 41000, 1]],
            "model": {"intercept": 0.1, "coefficients": {"age": 0.01}}
        }],
        "observations": [{
            "columns": ["age", "income"],
            "rows": [{"id": "Alice", "values": [30, 50000]}]
        }]
    }"#;

    #[test]
    fn test_apply_registers_everything() {
        let manifest: Manifest = serde_json::from_str(MANIFEST).unwrap();
        let mut store = build_store(StoreMode::Live, NumericEngine::new());
        manifest.apply(store.as_mut()).unwrap();

        assert_eq!(store.explainers().labels(), vec!["A"]);
        assert_eq!(store.batches().row_ids(), vec!["Alice"]);
        assert_eq!(store.explainers().variables(), vec!["age", "income"]);
    }

    #[test]
    fn test_apply_twice_hits_duplicate_label() {
        let manifest: Manifest = serde_json::from_str(MANIFEST).unwrap();
        let mut store = build_store(StoreMode::Live, NumericEngine::new());
        manifest.apply(store.as_mut()).unwrap();

        let err = manifest.apply(store.as_mut()).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::Store(StoreError::DuplicateLabel(ref label)) if label == "A"
        ));
    }

    #[test]
    fn test_unknown_target_column() {
        let mut manifest: Manifest = serde_json::from_str(MANIFEST).unwrap();
        manifest.models[0].target = "outcome".to_string();
        assert!(matches!(
            manifest.models[0].to_explainer(),
            Err(ManifestError::Data { .. })
        ));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest: Manifest = serde_json::from_str("{}").unwrap();
        assert!(manifest.models.is_empty());
        assert!(manifest.observations.is_empty());
    }
}
