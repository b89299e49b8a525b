//! # Live Store
//!
//! Keeps only the registries. Every resolve runs the engine synchronously;
//! nothing is cached between requests.

use tracing::info;

use crate::artifact::Artifact;
use crate::engine::ComputationEngine;
use crate::explainer::Explainer;
use crate::observation::ObservationBatch;
use crate::registry::{ExplainerRegistry, ObservationRegistry};

use super::catalog::CatalogDescriptor;
use super::clock::{Clock, SystemClock};
use super::compute::compute_artifact;
use super::errors::StoreResult;
use super::request::{locate, ResolveRequest};
use super::{ArtifactStore, StoreMode};

/// Store that computes artifacts on demand
pub struct LiveStore<E> {
    engine: E,
    explainers: ExplainerRegistry,
    observations: ObservationRegistry,
    clock: Box<dyn Clock>,
    timestamp: i64,
}

impl<E: ComputationEngine> LiveStore<E> {
    pub fn new(engine: E) -> Self {
        Self::with_clock(engine, SystemClock)
    }

    pub fn with_clock(engine: E, clock: impl Clock + 'static) -> Self {
        let clock: Box<dyn Clock> = Box::new(clock);
        let timestamp = clock.now_millis();
        Self {
            engine,
            explainers: ExplainerRegistry::new(),
            observations: ObservationRegistry::new(),
            clock,
            timestamp,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Advance the freshness timestamp; never moves backwards
    fn touch(&mut self) {
        self.timestamp = self.timestamp.max(self.clock.now_millis());
    }
}

impl<E: ComputationEngine> ArtifactStore for LiveStore<E> {
    fn mode(&self) -> StoreMode {
        StoreMode::Live
    }

    fn register_explainer(&mut self, explainer: Explainer) -> StoreResult<()> {
        let label = self.explainers.register(explainer)?.label().to_string();
        self.touch();
        info!(model = %label, timestamp = self.timestamp, "Explainer registered");
        Ok(())
    }

    fn register_batch(&mut self, batch: ObservationBatch) -> StoreResult<()> {
        let rows = self.observations.register(batch)?.len();
        self.touch();
        info!(rows, timestamp = self.timestamp, "Observation batch registered");
        Ok(())
    }

    fn resolve(&self, request: &ResolveRequest) -> StoreResult<Artifact> {
        let (explainer, task) = locate(&self.explainers, &self.observations, request)?;
        compute_artifact(&self.engine, explainer, &task)
    }

    fn catalog(&self) -> CatalogDescriptor {
        CatalogDescriptor::for_live(&self.explainers, &self.observations, self.timestamp)
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.timestamp)
    }

    fn explainers(&self) -> &ExplainerRegistry {
        &self.explainers
    }

    fn batches(&self) -> &ObservationRegistry {
        &self.observations
    }
}
