//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use modelarena::artifact::PlotKind;
use modelarena::data::{Cell, Column, Table};
use modelarena::engine::{ComputationEngine, EngineError, EngineResult};
use modelarena::explainer::{Explainer, LinearModel};
use modelarena::observation::{Observation, ObservationBatch};
use serde_json::{json, Value};

// =============================================================================
// Fixtures
// =============================================================================

/// Explainer over columns age, income, y with target y
pub fn explainer(label: &str) -> Explainer {
    let data = Table::new(vec![
        Column::numeric("age", &[30.0, 41.0, 25.0, 52.0]),
        Column::numeric("income", &[50000.0, 32000.0, 41000.0, 61000.0]),
        Column::numeric("y", &[1.0, 0.0, 1.0, 0.0]),
    ])
    .unwrap();
    let model = LinearModel::new(0.1)
        .with_coefficient("age", 0.01)
        .with_coefficient("income", 0.00001);
    Explainer::with_target_column(label, data, "y", model).unwrap()
}

/// Explainer over a single variable, for models that differ in shape
pub fn age_only_explainer(label: &str) -> Explainer {
    let data = Table::new(vec![
        Column::numeric("age", &[30.0, 41.0]),
        Column::numeric("y", &[1.0, 0.0]),
    ])
    .unwrap();
    Explainer::with_target_column(
        label,
        data,
        "y",
        LinearModel::new(0.0).with_coefficient("age", 0.02),
    )
    .unwrap()
}

/// Batch with columns age and income
pub fn batch(ids: &[&str]) -> ObservationBatch {
    ObservationBatch::from_records(
        vec!["age".into(), "income".into()],
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                (
                    id.to_string(),
                    vec![Cell::Number(30.0 + i as f64), Cell::Number(40000.0)],
                )
            })
            .collect(),
    )
    .unwrap()
}

/// `{Alice: age 30, income 50000, y 1}`
pub fn alice() -> ObservationBatch {
    ObservationBatch::from_records(
        vec!["age".into(), "income".into(), "y".into()],
        vec![(
            "Alice".into(),
            vec![Cell::Number(30.0), Cell::Number(50000.0), Cell::Number(1.0)],
        )],
    )
    .unwrap()
}

// =============================================================================
// Engines
// =============================================================================

/// One engine invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub kind: PlotKind,
    pub model: String,
    pub observation: Option<String>,
    pub variable: Option<String>,
    pub variables: Vec<String>,
}

/// Engine that records every call and returns a trivial payload.
/// Calls to a configured (observation, variable) pair fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_on: Option<(String, String)>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail ceteris-paribus computations for `observation` along `variable`
    pub fn failing_on(observation: &str, variable: &str) -> Self {
        Self {
            fail_on: Some((observation.to_string(), variable.to_string())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(
        &self,
        kind: PlotKind,
        explainer: &Explainer,
        observation: Option<&Observation<'_>>,
        variable: Option<&str>,
        variables: &[String],
    ) -> EngineResult<Value> {
        let call = Call {
            kind,
            model: explainer.label().to_string(),
            observation: observation.map(|o| o.id().to_string()),
            variable: variable.map(str::to_string),
            variables: variables.to_vec(),
        };
        self.calls.lock().unwrap().push(call.clone());

        if let Some((obs, var)) = &self.fail_on {
            if call.observation.as_ref() == Some(obs) && call.variable.as_ref() == Some(var) {
                return Err(EngineError::UnknownVariable(var.clone()));
            }
        }
        Ok(json!({ "kind": kind.name() }))
    }
}

impl ComputationEngine for RecordingEngine {
    fn feature_importance(&self, explainer: &Explainer, variables: &[String]) -> EngineResult<Value> {
        self.record(PlotKind::FeatureImportance, explainer, None, None, variables)
    }

    fn partial_dependence(&self, explainer: &Explainer, variable: &str) -> EngineResult<Value> {
        self.record(PlotKind::PartialDependence, explainer, None, Some(variable), &[])
    }

    fn accumulated_dependence(&self, explainer: &Explainer, variable: &str) -> EngineResult<Value> {
        self.record(PlotKind::AccumulatedDependence, explainer, None, Some(variable), &[])
    }

    fn breakdown(
        &self,
        explainer: &Explainer,
        observation: &Observation<'_>,
        variables: &[String],
    ) -> EngineResult<Value> {
        self.record(PlotKind::Breakdown, explainer, Some(observation), None, variables)
    }

    fn ceteris_paribus(
        &self,
        explainer: &Explainer,
        observation: &Observation<'_>,
        variable: &str,
    ) -> EngineResult<Value> {
        self.record(
            PlotKind::CeterisParibus,
            explainer,
            Some(observation),
            Some(variable),
            &[],
        )
    }
}
