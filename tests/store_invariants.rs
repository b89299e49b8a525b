//! Store Invariant Tests
//!
//! Registration invariants shared by both store modes, and the eager
//! cascade of the static store:
//! - Model labels and row ids are globally unique; failed registrations
//!   change nothing
//! - The static artifact set does not depend on registration order
//! - Every artifact is computed exactly once
//! - A failed computation abandons only its own step

mod common;

use std::collections::BTreeSet;

use common::{age_only_explainer, batch, explainer, RecordingEngine};
use modelarena::artifact::{Artifact, ArtifactKey, PlotKind};
use modelarena::data::{Column, Table};
use modelarena::explainer::{Explainer, LinearModel};
use modelarena::store::{
    build_store, ArtifactStore, ResolveRequest, StaticStore, StoreError, StoreMode,
};

fn keys(store: &dyn ArtifactStore) -> BTreeSet<ArtifactKey> {
    store.catalog().plots().iter().map(Artifact::key).collect()
}

// =============================================================================
// Uniqueness
// =============================================================================

#[test]
fn test_duplicate_label_keeps_first() {
    for mode in [StoreMode::Static, StoreMode::Live] {
        let mut store = build_store(mode, RecordingEngine::new());
        store.register_explainer(explainer("A")).unwrap();

        let err = store.register_explainer(age_only_explainer("A")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateLabel("A".into()));

        let kept = store.explainers().lookup("A").unwrap();
        assert_eq!(kept.data().n_rows(), 4, "mode {}", mode);
        assert_eq!(store.explainers().len(), 1);
    }
}

#[test]
fn test_overlapping_row_ids_rejected_without_artifacts() {
    let engine = RecordingEngine::new();
    let mut store = StaticStore::new(engine.clone());
    store.register_explainer(explainer("A")).unwrap();
    store.register_batch(batch(&["r1", "r2"])).unwrap();
    let artifacts = store.artifacts().len();
    let calls = engine.call_count();

    let err = store.register_batch(batch(&["r3", "r2"])).unwrap_err();
    assert_eq!(err, StoreError::DuplicateRowId("r2".into()));

    assert_eq!(store.artifacts().len(), artifacts);
    assert_eq!(engine.call_count(), calls);
    assert!(!store.batches().contains("r3"));
    assert_eq!(store.batches().row_ids(), vec!["r1", "r2"]);
}

#[test]
fn test_duplicate_row_id_within_batch() {
    let mut store = build_store(StoreMode::Live, RecordingEngine::new());
    let err = store.register_batch(batch(&["r1", "r1"])).unwrap_err();
    assert!(matches!(err, StoreError::InvalidBatch(_)));
    assert!(store.batches().is_empty());
}

#[test]
fn test_invalid_explainer_rejected() {
    let data = Table::new(vec![Column::numeric("y", &[1.0, 0.0])]).unwrap();
    let target = Column::numeric("y", &[1.0, 0.0, 1.0]);
    let bad = Explainer::new("A", data, target, LinearModel::new(0.0));

    let mut store = build_store(StoreMode::Static, RecordingEngine::new());
    let err = store.register_explainer(bad).unwrap_err();
    assert!(matches!(err, StoreError::InvalidExplainer { .. }));
    assert!(store.explainers().is_empty());
    assert!(store.catalog().plots().is_empty());
}

// =============================================================================
// Static Cascade
// =============================================================================

#[test]
fn test_static_order_independence() {
    let models_first_engine = RecordingEngine::new();
    let mut models_first = build_store(StoreMode::Static, models_first_engine.clone());
    models_first.register_explainer(explainer("A")).unwrap();
    models_first.register_explainer(age_only_explainer("B")).unwrap();
    models_first.register_batch(batch(&["r1", "r2"])).unwrap();

    let batch_first_engine = RecordingEngine::new();
    let mut batch_first = build_store(StoreMode::Static, batch_first_engine.clone());
    batch_first.register_batch(batch(&["r1", "r2"])).unwrap();
    batch_first.register_explainer(explainer("A")).unwrap();
    batch_first.register_explainer(age_only_explainer("B")).unwrap();

    assert_eq!(keys(models_first.as_ref()), keys(batch_first.as_ref()));

    // A: 5 global + 3 per row; B: 3 global + 2 per row
    assert_eq!(models_first.catalog().plots().len(), 18);
    assert_eq!(models_first_engine.call_count(), 18);
    assert_eq!(batch_first_engine.call_count(), 18);
}

#[test]
fn test_one_breakdown_and_profile_per_shared_variable() {
    let mut store = build_store(StoreMode::Static, RecordingEngine::new());
    store.register_explainer(explainer("A")).unwrap();
    store.register_batch(batch(&["r1"])).unwrap();

    let catalog = store.catalog();
    let local: Vec<_> = catalog
        .plots()
        .iter()
        .filter(|a| a.observation.as_deref() == Some("r1"))
        .map(|a| (a.kind, a.variable.clone()))
        .collect();

    assert_eq!(
        local,
        vec![
            (PlotKind::Breakdown, None),
            (PlotKind::CeterisParibus, Some("age".to_string())),
            (PlotKind::CeterisParibus, Some("income".to_string())),
        ]
    );
}

#[test]
fn test_new_model_does_not_touch_existing_artifacts() {
    let engine = RecordingEngine::new();
    let mut store = build_store(StoreMode::Static, engine.clone());
    store.register_explainer(explainer("A")).unwrap();
    store.register_batch(batch(&["r1"])).unwrap();
    let before = store.catalog().plots().to_vec();
    let calls = engine.call_count();

    store.register_explainer(age_only_explainer("B")).unwrap();

    let after = store.catalog();
    assert_eq!(&after.plots()[..before.len()], &before[..]);
    assert!(engine.calls()[calls..].iter().all(|c| c.model == "B"));
}

#[test]
fn test_failed_computation_abandons_only_its_pair() {
    let engine = RecordingEngine::failing_on("r1", "income");
    let mut store = StaticStore::new(engine);
    store.register_batch(batch(&["r1", "r2"])).unwrap();

    let err = store.register_explainer(explainer("A")).unwrap_err();
    match &err {
        StoreError::ComputationError { key, .. } => assert_eq!(
            key,
            &ArtifactKey::profile(PlotKind::CeterisParibus, "A", "r1", "income")
        ),
        other => panic!("unexpected error: {}", other),
    }

    // registered despite the failure; earlier artifacts of the pair remain
    assert!(store.explainers().contains("A"));
    assert_eq!(store.artifacts().len(), 5 + 2 + 3);

    let missing = ResolveRequest::new(PlotKind::CeterisParibus, "A")
        .with_observation("r1")
        .with_variable("income");
    assert!(matches!(
        store.resolve(&missing),
        Err(StoreError::ArtifactMissing(_))
    ));

    let other_pair = ResolveRequest::new(PlotKind::CeterisParibus, "A")
        .with_observation("r2")
        .with_variable("income");
    assert!(store.resolve(&other_pair).is_ok());
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn test_catalog_projection() {
    let mut store = build_store(StoreMode::Live, RecordingEngine::new());
    store.register_explainer(age_only_explainer("B")).unwrap();
    store.register_explainer(explainer("A")).unwrap();
    store.register_batch(batch(&["r2", "r1"])).unwrap();
    store.register_batch(batch(&["r0"])).unwrap();

    let catalog = store.catalog();
    assert_eq!(catalog.version, "1.0.0");
    assert_eq!(catalog.models, vec!["B", "A"]);
    assert_eq!(catalog.variables, vec!["age", "income"]);
    assert_eq!(catalog.observations, vec!["r2", "r1", "r0"]);
    assert_eq!(catalog.timestamp(), store.timestamp());
}

#[test]
fn test_column_equal_to_target_stays_a_variable() {
    let data = Table::new(vec![
        Column::numeric("age", &[30.0, 41.0]),
        Column::numeric("y_copy", &[1.0, 0.0]),
        Column::numeric("y", &[1.0, 0.0]),
    ])
    .unwrap();
    let explainer =
        Explainer::with_target_column("A", data, "y", LinearModel::new(0.0)).unwrap();

    let mut store = build_store(StoreMode::Live, RecordingEngine::new());
    store.register_explainer(explainer).unwrap();
    assert_eq!(store.catalog().variables, vec!["age", "y_copy"]);
}
