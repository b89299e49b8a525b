//! Arena HTTP Routes
//!
//! Read-only endpoints over a shared artifact store:
//!
//! - `GET /` - catalog descriptor
//! - `GET /timestamp` - freshness timestamp (live stores only)
//! - `GET /{PlotKind}` - one artifact, selected by query parameters
//!
//! Anything that cannot be resolved is a bare 404.

use std::sync::{Arc, PoisonError};

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tracing::{debug, error};

use crate::artifact::PlotKind;
use crate::dispatch::{DispatchOutcome, PlotQuery, QueryDispatcher};
use crate::store::{ArtifactStore, SharedStore};

// ==================
// Shared State
// ==================

/// Arena state shared across handlers
pub struct ArenaState {
    pub store: SharedStore,
}

impl ArenaState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Run `f` on a blocking thread under the store's read lock
    async fn read<T, F>(&self, f: F) -> Result<T, JoinError>
    where
        F: FnOnce(&dyn ArtifactStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let guard = store.read().unwrap_or_else(PoisonError::into_inner);
            f(&**guard)
        })
        .await
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize, Deserialize)]
pub struct TimestampResponse {
    pub timestamp: i64,
}

// ==================
// Router
// ==================

/// Create arena routes
pub fn arena_routes(state: Arc<ArenaState>) -> Router {
    let mut router = Router::new()
        .route("/", get(catalog_handler))
        .route("/timestamp", get(timestamp_handler));

    for kind in PlotKind::ALL {
        router = router.route(&format!("/{}", kind.name()), plot_route(kind));
    }

    router.with_state(state)
}

fn plot_route(kind: PlotKind) -> MethodRouter<Arc<ArenaState>> {
    get(
        move |State(state): State<Arc<ArenaState>>,
              query: Result<Query<PlotQuery>, QueryRejection>| async move {
            plot_handler(kind, state, query).await
        },
    )
}

// ==================
// Handlers
// ==================

fn worker_failed(err: JoinError) -> Response {
    error!(error = %err, "Store worker failed");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// GET /
async fn catalog_handler(State(state): State<Arc<ArenaState>>) -> Response {
    match state.read(|store| store.catalog()).await {
        Ok(catalog) => (StatusCode::OK, Json(catalog)).into_response(),
        Err(e) => worker_failed(e),
    }
}

/// GET /timestamp
async fn timestamp_handler(State(state): State<Arc<ArenaState>>) -> Response {
    match state.read(|store| store.timestamp()).await {
        Ok(Some(timestamp)) => {
            (StatusCode::OK, Json(TimestampResponse { timestamp })).into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => worker_failed(e),
    }
}

/// GET /{PlotKind}
async fn plot_handler(
    kind: PlotKind,
    state: Arc<ArenaState>,
    query: Result<Query<PlotQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            debug!(plot = %kind, error = %rejection, "Malformed query");
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    let outcome = state
        .read(move |store| QueryDispatcher::new(store).lookup_kind(kind, &query))
        .await;

    match outcome {
        Ok(DispatchOutcome::Found(artifact)) => (StatusCode::OK, Json(artifact)).into_response(),
        Ok(DispatchOutcome::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => worker_failed(e),
    }
}
