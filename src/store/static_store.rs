//! # Static Store
//!
//! Eagerly materializes every artifact reachable from the registry state.
//! Each registration reconciles only the new part of the state: a new model
//! is crossed with every known observation and a new batch with every known
//! model, so no (model, observation) pair is ever computed twice.
//!
//! A failed computation abandons the remainder of its step (one global
//! artifact, or one (model, observation) pair). Artifacts produced before
//! the failure are kept and the cascade moves on to the next step. The first
//! failure is returned to the caller once the cascade has finished.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::artifact::{Artifact, ArtifactKey};
use crate::engine::ComputationEngine;
use crate::explainer::Explainer;
use crate::observation::{Observation, ObservationBatch};
use crate::registry::{ExplainerRegistry, ObservationRegistry};

use super::catalog::CatalogDescriptor;
use super::compute::compute_artifact;
use super::errors::{StoreError, StoreResult};
use super::request::{locate, ResolveRequest, Task};
use super::{ArtifactStore, StoreMode};

/// Append-only artifact list with a key index
#[derive(Debug, Default)]
struct ArtifactList {
    artifacts: Vec<Artifact>,
    index: HashMap<ArtifactKey, usize>,
}

impl ArtifactList {
    fn contains(&self, key: &ArtifactKey) -> bool {
        self.index.contains_key(key)
    }

    fn get(&self, key: &ArtifactKey) -> Option<&Artifact> {
        self.index.get(key).map(|&i| &self.artifacts[i])
    }

    fn push(&mut self, artifact: Artifact) {
        let key = artifact.key();
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key, self.artifacts.len());
        self.artifacts.push(artifact);
    }

    /// Compute and append one task unless its artifact already exists
    fn materialize<E: ComputationEngine + ?Sized>(
        &mut self,
        engine: &E,
        explainer: &Explainer,
        task: &Task<'_>,
    ) -> StoreResult<()> {
        let key = task.key(explainer.label());
        if self.contains(&key) {
            return Ok(());
        }
        let artifact = compute_artifact(engine, explainer, task)?;
        debug!(artifact = %key, "Artifact materialized");
        self.push(artifact);
        Ok(())
    }

    /// Breakdown and ceteris-paribus artifacts for one pair
    fn materialize_pair<E: ComputationEngine + ?Sized>(
        &mut self,
        engine: &E,
        explainer: &Explainer,
        observation: Observation<'_>,
    ) -> StoreResult<()> {
        for task in Task::local(explainer, observation) {
            self.materialize(engine, explainer, &task)?;
        }
        Ok(())
    }
}

/// Store that computes every artifact at registration time
pub struct StaticStore<E> {
    engine: E,
    explainers: ExplainerRegistry,
    observations: ObservationRegistry,
    artifacts: ArtifactList,
}

impl<E: ComputationEngine> StaticStore<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            explainers: ExplainerRegistry::new(),
            observations: ObservationRegistry::new(),
            artifacts: ArtifactList::default(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Materialized artifacts in production order
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts.artifacts
    }

    pub fn artifact(&self, key: &ArtifactKey) -> Option<&Artifact> {
        self.artifacts.get(key)
    }
}

/// Log every cascade failure and surface the first one.
fn finish_cascade(subject: &str, produced: usize, failures: Vec<StoreError>) -> StoreResult<()> {
    for failure in &failures {
        warn!(subject, error = %failure, "Cascade step abandoned");
    }
    info!(
        subject,
        produced,
        failed = failures.len(),
        "Cascade complete"
    );
    match failures.into_iter().next() {
        Some(first) => Err(first),
        None => Ok(()),
    }
}

impl<E: ComputationEngine> ArtifactStore for StaticStore<E> {
    fn mode(&self) -> StoreMode {
        StoreMode::Static
    }

    fn register_explainer(&mut self, explainer: Explainer) -> StoreResult<()> {
        let StaticStore {
            engine,
            explainers,
            observations,
            artifacts,
        } = self;

        let explainer = explainers.register(explainer)?;
        info!(model = explainer.label(), "Explainer registered");

        let before = artifacts.artifacts.len();
        let mut failures = Vec::new();

        for task in Task::global(explainer) {
            if let Err(e) = artifacts.materialize(&*engine, explainer, &task) {
                failures.push(e);
            }
        }
        for observation in observations.observations() {
            if let Err(e) = artifacts.materialize_pair(&*engine, explainer, observation) {
                failures.push(e);
            }
        }

        finish_cascade(
            explainer.label(),
            artifacts.artifacts.len() - before,
            failures,
        )
    }

    fn register_batch(&mut self, batch: ObservationBatch) -> StoreResult<()> {
        let StaticStore {
            engine,
            explainers,
            observations,
            artifacts,
        } = self;

        let batch = observations.register(batch)?;
        info!(rows = batch.len(), "Observation batch registered");

        let before = artifacts.artifacts.len();
        let mut failures = Vec::new();

        for explainer in explainers.all() {
            for observation in batch.observations() {
                if let Err(e) = artifacts.materialize_pair(&*engine, explainer, observation) {
                    failures.push(e);
                }
            }
        }

        finish_cascade("batch", artifacts.artifacts.len() - before, failures)
    }

    fn resolve(&self, request: &ResolveRequest) -> StoreResult<Artifact> {
        let (explainer, task) = locate(&self.explainers, &self.observations, request)?;
        let key = task.key(explainer.label());
        self.artifacts
            .get(&key)
            .cloned()
            .ok_or(StoreError::ArtifactMissing(key))
    }

    fn catalog(&self) -> CatalogDescriptor {
        CatalogDescriptor::for_static(&self.explainers, &self.observations, self.artifacts())
    }

    fn timestamp(&self) -> Option<i64> {
        None
    }

    fn explainers(&self) -> &ExplainerRegistry {
        &self.explainers
    }

    fn batches(&self) -> &ObservationRegistry {
        &self.observations
    }
}
