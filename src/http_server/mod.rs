//! # Arena HTTP Server Module
//!
//! Read-only HTTP surface over an artifact store.
//!
//! # Endpoints
//!
//! - `/` - Catalog descriptor
//! - `/timestamp` - Freshness timestamp of a live store
//! - `/FeatureImportance`, `/PartialDependence`, `/AccumulatedDependence`,
//!   `/Breakdown`, `/CeterisParibus` - Artifacts selected by `model`,
//!   `observation` and `variable` query parameters

pub mod arena_routes;
pub mod config;
pub mod server;

pub use arena_routes::ArenaState;
pub use config::HttpServerConfig;
pub use server::HttpServer;
