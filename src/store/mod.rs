//! # Artifact Store
//!
//! Two implementations of [`ArtifactStore`] over the same registries:
//!
//! | Mode   | Registration                       | Resolve             |
//! |--------|------------------------------------|---------------------|
//! | Static | validates, then runs the cascade   | reads the cache     |
//! | Live   | validates, then bumps the timestamp| computes on demand  |
//!
//! The store kind is picked once at construction through [`build_store`].
//! Concurrency control attaches to the store object itself: wrap it in a
//! [`SharedStore`] so reads share the lock and registration holds it
//! exclusively for the whole cascade.

mod catalog;
mod clock;
mod compute;
mod errors;
mod live_store;
mod request;
mod static_store;

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

pub use catalog::{CatalogContents, CatalogDescriptor, PlotDescriptor, PROTOCOL_VERSION};
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{StoreError, StoreResult};
pub use live_store::LiveStore;
pub use request::ResolveRequest;
pub use static_store::StaticStore;

use crate::artifact::Artifact;
use crate::engine::ComputationEngine;
use crate::explainer::Explainer;
use crate::observation::ObservationBatch;
use crate::registry::{ExplainerRegistry, ObservationRegistry};

/// Which computation strategy a store uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Static,
    #[default]
    Live,
}

impl StoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreMode::Static => "static",
            StoreMode::Live => "live",
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(StoreMode::Static),
            "live" => Ok(StoreMode::Live),
            other => Err(format!("unknown store mode '{}'", other)),
        }
    }
}

/// Common surface of both store variants
pub trait ArtifactStore: Send + Sync {
    fn mode(&self) -> StoreMode;

    /// Add a model. Fails without changing anything on a duplicate label or
    /// an invalid explainer.
    fn register_explainer(&mut self, explainer: Explainer) -> StoreResult<()>;

    /// Add a batch of observations. Fails without changing anything if any
    /// row id is already known.
    fn register_batch(&mut self, batch: ObservationBatch) -> StoreResult<()>;

    /// Look up or compute one artifact. Never mutates the store.
    fn resolve(&self, request: &ResolveRequest) -> StoreResult<Artifact>;

    /// Fresh descriptor of the current state
    fn catalog(&self) -> CatalogDescriptor;

    /// Freshness timestamp in ms since the epoch; `None` for static stores
    fn timestamp(&self) -> Option<i64>;

    fn explainers(&self) -> &ExplainerRegistry;

    fn batches(&self) -> &ObservationRegistry;
}

/// A store behind a reader-writer lock
pub type SharedStore = Arc<RwLock<Box<dyn ArtifactStore>>>;

/// Construct the store variant for `mode`
pub fn build_store<E>(mode: StoreMode, engine: E) -> Box<dyn ArtifactStore>
where
    E: ComputationEngine + 'static,
{
    match mode {
        StoreMode::Static => Box::new(StaticStore::new(engine)),
        StoreMode::Live => Box::new(LiveStore::new(engine)),
    }
}

pub fn share(store: Box<dyn ArtifactStore>) -> SharedStore {
    Arc::new(RwLock::new(store))
}
