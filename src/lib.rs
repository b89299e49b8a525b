//! modelarena - A diagnostic-artifact store for model explanations
//!
//! Register fitted models (as [`explainer::Explainer`]s) and batches of
//! observations, then browse feature importance, dependence profiles,
//! break-downs and ceteris-paribus profiles keyed by model, observation and
//! variable.
//!
//! Two store strategies share one trait ([`store::ArtifactStore`]):
//! - static: every reachable artifact is computed at registration time and
//!   can be exported as a snapshot
//! - live: artifacts are computed per request and served over HTTP

pub mod artifact;
pub mod cli;
pub mod data;
pub mod dispatch;
pub mod engine;
pub mod explainer;
pub mod http_server;
pub mod logging;
pub mod manifest;
pub mod observation;
pub mod registry;
pub mod snapshot;
pub mod store;
