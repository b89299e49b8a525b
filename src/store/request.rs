//! # Resolve Requests
//!
//! Typed read requests and the lookup/validation steps shared by both
//! store variants.

use crate::artifact::{ArtifactKey, PlotKind};
use crate::explainer::Explainer;
use crate::observation::Observation;
use crate::registry::{ExplainerRegistry, ObservationRegistry};

use super::errors::{StoreError, StoreResult};

/// A request for one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub kind: PlotKind,
    pub model: String,
    pub observation: Option<String>,
    pub variable: Option<String>,
}

impl ResolveRequest {
    pub fn new(kind: PlotKind, model: impl Into<String>) -> Self {
        Self {
            kind,
            model: model.into(),
            observation: None,
            variable: None,
        }
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }
}

/// One unit of engine work
#[derive(Debug, Clone)]
pub(crate) enum Task<'a> {
    FeatureImportance {
        variables: Vec<String>,
    },
    PartialDependence {
        variable: String,
    },
    AccumulatedDependence {
        variable: String,
    },
    Breakdown {
        observation: Observation<'a>,
        variables: Vec<String>,
    },
    CeterisParibus {
        observation: Observation<'a>,
        variable: String,
    },
}

impl<'a> Task<'a> {
    pub(crate) fn kind(&self) -> PlotKind {
        match self {
            Task::FeatureImportance { .. } => PlotKind::FeatureImportance,
            Task::PartialDependence { .. } => PlotKind::PartialDependence,
            Task::AccumulatedDependence { .. } => PlotKind::AccumulatedDependence,
            Task::Breakdown { .. } => PlotKind::Breakdown,
            Task::CeterisParibus { .. } => PlotKind::CeterisParibus,
        }
    }

    pub(crate) fn key(&self, model: &str) -> ArtifactKey {
        let kind = self.kind();
        match self {
            Task::FeatureImportance { .. } => ArtifactKey::model(kind, model),
            Task::PartialDependence { variable } | Task::AccumulatedDependence { variable } => {
                ArtifactKey::variable(kind, model, variable.clone())
            }
            Task::Breakdown { observation, .. } => {
                ArtifactKey::observation(kind, model, observation.id())
            }
            Task::CeterisParibus {
                observation,
                variable,
            } => ArtifactKey::profile(kind, model, observation.id(), variable.clone()),
        }
    }

    /// Model-level tasks run when an explainer is registered
    pub(crate) fn global(explainer: &Explainer) -> Vec<Task<'a>> {
        let variables = explainer.variables();
        let mut tasks = Vec::with_capacity(1 + 2 * variables.len());
        tasks.push(Task::FeatureImportance {
            variables: variables.clone(),
        });
        for variable in &variables {
            tasks.push(Task::PartialDependence {
                variable: variable.clone(),
            });
        }
        for variable in variables {
            tasks.push(Task::AccumulatedDependence { variable });
        }
        tasks
    }

    /// Instance-level tasks for one (model, observation) pair
    pub(crate) fn local(explainer: &Explainer, observation: Observation<'a>) -> Vec<Task<'a>> {
        let shared = shared_variables(explainer, &observation);
        let mut tasks = Vec::with_capacity(1 + shared.len());
        for variable in &shared {
            tasks.push(Task::CeterisParibus {
                observation,
                variable: variable.clone(),
            });
        }
        tasks.insert(
            0,
            Task::Breakdown {
                observation,
                variables: shared,
            },
        );
        tasks
    }
}

/// Variables of the explainer that the observation carries
pub(crate) fn shared_variables(explainer: &Explainer, observation: &Observation<'_>) -> Vec<String> {
    explainer
        .variables()
        .into_iter()
        .filter(|v| observation.has_column(v))
        .collect()
}

/// Resolve a request against the registries.
///
/// Looks up the model, then the observation when the plot kind needs one,
/// then checks the variable belongs to the model's variable set (and to the
/// observation's columns for observation-scoped plots). An absent parameter
/// is reported like an unknown one.
pub(crate) fn locate<'a>(
    explainers: &'a ExplainerRegistry,
    observations: &'a ObservationRegistry,
    request: &ResolveRequest,
) -> StoreResult<(&'a Explainer, Task<'a>)> {
    let explainer = explainers
        .lookup(&request.model)
        .ok_or_else(|| StoreError::ModelNotFound(request.model.clone()))?;

    let task = match request.kind {
        PlotKind::FeatureImportance => Task::FeatureImportance {
            variables: explainer.variables(),
        },
        PlotKind::PartialDependence => Task::PartialDependence {
            variable: locate_variable(explainer, None, request)?,
        },
        PlotKind::AccumulatedDependence => Task::AccumulatedDependence {
            variable: locate_variable(explainer, None, request)?,
        },
        PlotKind::Breakdown => {
            let observation = locate_observation(observations, request)?;
            Task::Breakdown {
                variables: shared_variables(explainer, &observation),
                observation,
            }
        }
        PlotKind::CeterisParibus => {
            let observation = locate_observation(observations, request)?;
            let variable = locate_variable(explainer, Some(&observation), request)?;
            Task::CeterisParibus {
                observation,
                variable,
            }
        }
    };

    Ok((explainer, task))
}

fn locate_observation<'a>(
    observations: &'a ObservationRegistry,
    request: &ResolveRequest,
) -> StoreResult<Observation<'a>> {
    let id = request.observation.as_deref().unwrap_or_default();
    observations
        .lookup(id)
        .ok_or_else(|| StoreError::ObservationNotFound(id.to_string()))
}

fn locate_variable(
    explainer: &Explainer,
    observation: Option<&Observation<'_>>,
    request: &ResolveRequest,
) -> StoreResult<String> {
    let name = request.variable.as_deref().unwrap_or_default();
    let in_model = explainer.has_variable(name);
    let in_observation = observation.map_or(true, |o| o.has_column(name));
    if !in_model || !in_observation {
        return Err(StoreError::VariableNotFound(name.to_string()));
    }
    Ok(name.to_string())
}
