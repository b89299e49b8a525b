//! Engine invocation shared by both store variants

use crate::artifact::Artifact;
use crate::engine::ComputationEngine;
use crate::explainer::Explainer;

use super::errors::{StoreError, StoreResult};
use super::request::Task;

/// Run one task on the engine and wrap the payload as an artifact.
pub(crate) fn compute_artifact<E>(
    engine: &E,
    explainer: &Explainer,
    task: &Task<'_>,
) -> StoreResult<Artifact>
where
    E: ComputationEngine + ?Sized,
{
    let key = task.key(explainer.label());
    let payload = match task {
        Task::FeatureImportance { variables } => engine.feature_importance(explainer, variables),
        Task::PartialDependence { variable } => engine.partial_dependence(explainer, variable),
        Task::AccumulatedDependence { variable } => {
            engine.accumulated_dependence(explainer, variable)
        }
        Task::Breakdown {
            observation,
            variables,
        } => engine.breakdown(explainer, observation, variables),
        Task::CeterisParibus {
            observation,
            variable,
        } => engine.ceteris_paribus(explainer, observation, variable),
    };

    match payload {
        Ok(data) => Ok(Artifact::new(key, data)),
        Err(source) => Err(StoreError::ComputationError { key, source }),
    }
}
