//! Live Store and Dispatch Tests
//!
//! - Nothing is computed before a query arrives
//! - Queries change neither the registries nor the freshness timestamp
//! - The timestamp never decreases
//! - Every failure reaches the caller as "not found"

mod common;

use std::sync::Arc;
use std::thread;

use common::{alice, batch, explainer, RecordingEngine};
use modelarena::artifact::PlotKind;
use modelarena::dispatch::{DispatchOutcome, PlotQuery, QueryDispatcher};
use modelarena::engine::NumericEngine;
use modelarena::store::{
    build_store, share, ArtifactStore, LiveStore, ManualClock, StoreMode,
};

fn live_store(engine: RecordingEngine, clock: Arc<ManualClock>) -> Box<dyn ArtifactStore> {
    Box::new(LiveStore::with_clock(engine, clock))
}

// =============================================================================
// Lazy Computation
// =============================================================================

#[test]
fn test_no_precompute_and_reads_are_pure() {
    let engine = RecordingEngine::new();
    let clock = Arc::new(ManualClock::new(1_000));
    let mut store = live_store(engine.clone(), clock.clone());

    store.register_explainer(explainer("A")).unwrap();
    store.register_batch(batch(&["r1"])).unwrap();
    assert_eq!(engine.call_count(), 0);

    let timestamp = store.timestamp();
    clock.advance(500);

    let dispatcher = QueryDispatcher::new(store.as_ref());
    let query = PlotQuery::for_model("A").with_observation("r1");
    let artifact = dispatcher.dispatch("Breakdown", &query).unwrap();

    assert_eq!(artifact.kind, PlotKind::Breakdown);
    assert_eq!(artifact.model, "A");
    assert_eq!(artifact.observation.as_deref(), Some("r1"));
    assert_eq!(engine.call_count(), 1);

    assert_eq!(store.timestamp(), timestamp);
    assert_eq!(store.explainers().labels(), vec!["A"]);
    assert_eq!(store.batches().row_ids(), vec!["r1"]);
}

#[test]
fn test_every_query_recomputes() {
    let engine = RecordingEngine::new();
    let mut store = live_store(engine.clone(), Arc::new(ManualClock::new(0)));
    store.register_explainer(explainer("A")).unwrap();

    let dispatcher = QueryDispatcher::new(store.as_ref());
    let query = PlotQuery::for_model("A");
    dispatcher.dispatch("FeatureImportance", &query).unwrap();
    dispatcher.dispatch("FeatureImportance", &query).unwrap();
    assert_eq!(engine.call_count(), 2);
}

#[test]
fn test_timestamp_non_decreasing() {
    let clock = Arc::new(ManualClock::new(100));
    let mut store = live_store(RecordingEngine::new(), clock.clone());
    let mut last = store.timestamp().unwrap();

    for (i, now) in [200, 150, 150, 900].into_iter().enumerate() {
        clock.set(now);
        let id = format!("r{}", i);
        store.register_batch(batch(&[id.as_str()])).unwrap();
        let current = store.timestamp().unwrap();
        assert!(current >= last);
        last = current;
    }
    assert_eq!(last, 900);
}

// =============================================================================
// Not Found
// =============================================================================

#[test]
fn test_target_is_not_a_variable() {
    let mut store = build_store(StoreMode::Live, NumericEngine::new());
    store.register_explainer(explainer("A")).unwrap();

    let dispatcher = QueryDispatcher::new(store.as_ref());
    let query = PlotQuery::for_model("A").with_variable("y");
    assert_eq!(
        dispatcher.lookup("PartialDependence", &query),
        DispatchOutcome::NotFound
    );
}

#[test]
fn test_variable_absent_from_observation() {
    let mut store = build_store(StoreMode::Live, NumericEngine::new());
    store.register_explainer(explainer("A")).unwrap();
    store
        .register_batch(
            modelarena::observation::ObservationBatch::from_records(
                vec!["age".into()],
                vec![("Bob".into(), vec![modelarena::data::Cell::Number(44.0)])],
            )
            .unwrap(),
        )
        .unwrap();

    let dispatcher = QueryDispatcher::new(store.as_ref());
    let income = PlotQuery::for_model("A")
        .with_observation("Bob")
        .with_variable("income");
    assert!(dispatcher.dispatch("CeterisParibus", &income).is_none());

    let age = PlotQuery::for_model("A")
        .with_observation("Bob")
        .with_variable("age");
    assert!(dispatcher.dispatch("CeterisParibus", &age).is_some());
}

#[test]
fn test_computation_error_is_not_found() {
    let engine = RecordingEngine::failing_on("r1", "age");
    let mut store = live_store(engine.clone(), Arc::new(ManualClock::new(0)));
    store.register_explainer(explainer("A")).unwrap();
    store.register_batch(batch(&["r1"])).unwrap();

    let dispatcher = QueryDispatcher::new(store.as_ref());
    let query = PlotQuery::for_model("A")
        .with_observation("r1")
        .with_variable("age");
    assert_eq!(
        dispatcher.lookup("CeterisParibus", &query),
        DispatchOutcome::NotFound
    );
    // the engine was reached; the failure happened inside it
    assert_eq!(engine.call_count(), 1);
}

#[test]
fn test_unknown_model_and_observation() {
    let mut store = build_store(StoreMode::Live, NumericEngine::new());
    store.register_explainer(explainer("A")).unwrap();
    store.register_batch(batch(&["r1"])).unwrap();
    let dispatcher = QueryDispatcher::new(store.as_ref());

    assert!(dispatcher
        .dispatch("FeatureImportance", &PlotQuery::for_model("Z"))
        .is_none());
    assert!(dispatcher
        .dispatch("Breakdown", &PlotQuery::for_model("A").with_observation("r9"))
        .is_none());
}

// =============================================================================
// Scenario
// =============================================================================

#[test]
fn test_alice_breakdown_uses_model_variables_only() {
    let engine = RecordingEngine::new();
    let mut store = live_store(engine.clone(), Arc::new(ManualClock::new(0)));
    store.register_explainer(explainer("A")).unwrap();
    store.register_batch(alice()).unwrap();

    let dispatcher = QueryDispatcher::new(store.as_ref());
    let query = PlotQuery::for_model("A").with_observation("Alice");
    let artifact = dispatcher.dispatch("Breakdown", &query).unwrap();

    assert_eq!(
        (artifact.kind, artifact.model.as_str(), artifact.observation.as_deref()),
        (PlotKind::Breakdown, "A", Some("Alice"))
    );
    assert_eq!(engine.calls()[0].variables, vec!["age", "income"]);
}

#[test]
fn test_alice_breakdown_with_numeric_engine() {
    let mut store = build_store(StoreMode::Live, NumericEngine::new());
    store.register_explainer(explainer("A")).unwrap();
    store.register_batch(alice()).unwrap();

    let dispatcher = QueryDispatcher::new(store.as_ref());
    let artifact = dispatcher
        .dispatch("Breakdown", &PlotQuery::for_model("A").with_observation("Alice"))
        .unwrap();

    let variables: Vec<&str> = artifact.data["contributions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["variable"].as_str())
        .collect();
    assert_eq!(variables.len(), 2);
    assert!(variables.contains(&"age"));
    assert!(variables.contains(&"income"));
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_parallel_readers_with_writer() {
    let shared = share(build_store(StoreMode::Live, NumericEngine::new()));
    shared
        .write()
        .unwrap()
        .register_explainer(explainer("A"))
        .unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                let store = shared.read().unwrap();
                let dispatcher = QueryDispatcher::new(&**store);
                let query = PlotQuery::for_model("A").with_variable("age");
                dispatcher.dispatch("PartialDependence", &query).is_some()
            })
        })
        .collect();

    let writer = {
        let shared = shared.clone();
        thread::spawn(move || {
            shared
                .write()
                .unwrap()
                .register_batch(batch(&["r1"]))
                .is_ok()
        })
    };

    for reader in readers {
        assert!(reader.join().unwrap());
    }
    assert!(writer.join().unwrap());
    assert!(shared.read().unwrap().batches().contains("r1"));
}
