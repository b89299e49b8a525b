//! # Query Dispatcher
//!
//! Turns plain string parameters into a typed [`ResolveRequest`] and
//! collapses every failure into "not found". Unknown plot kinds, missing
//! parameters, failed lookups and failed computations all look the same to
//! the caller. Computation failures are logged with full detail.

mod query;

pub use query::PlotQuery;

use tracing::{debug, error};

use crate::artifact::{Artifact, PlotKind};
use crate::store::{ArtifactStore, StoreError};

/// Result of a dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Found(Artifact),
    NotFound,
}

impl DispatchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, DispatchOutcome::Found(_))
    }

    pub fn into_artifact(self) -> Option<Artifact> {
        match self {
            DispatchOutcome::Found(artifact) => Some(artifact),
            DispatchOutcome::NotFound => None,
        }
    }
}

/// Read-only adapter over a store
pub struct QueryDispatcher<'a> {
    store: &'a dyn ArtifactStore,
}

impl<'a> QueryDispatcher<'a> {
    pub fn new(store: &'a dyn ArtifactStore) -> Self {
        Self { store }
    }

    /// Dispatch by plot kind name, e.g. `"Breakdown"`
    pub fn lookup(&self, kind: &str, query: &PlotQuery) -> DispatchOutcome {
        match kind.parse::<PlotKind>() {
            Ok(kind) => self.lookup_kind(kind, query),
            Err(e) => {
                debug!(error = %e, "Dispatch rejected");
                DispatchOutcome::NotFound
            }
        }
    }

    pub fn lookup_kind(&self, kind: PlotKind, query: &PlotQuery) -> DispatchOutcome {
        let Some(request) = query.to_request(kind) else {
            debug!(plot = %kind, "Dispatch rejected: missing parameters");
            return DispatchOutcome::NotFound;
        };

        match self.store.resolve(&request) {
            Ok(artifact) => DispatchOutcome::Found(artifact),
            Err(StoreError::ComputationError { key, source }) => {
                error!(artifact = %key, error = %source, detail = ?source, "Computation failed");
                DispatchOutcome::NotFound
            }
            Err(e) => {
                debug!(plot = %kind, error = %e, "Dispatch not found");
                DispatchOutcome::NotFound
            }
        }
    }

    pub fn dispatch(&self, kind: &str, query: &PlotQuery) -> Option<Artifact> {
        self.lookup(kind, query).into_artifact()
    }
}
