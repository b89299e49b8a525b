//! # Registries
//!
//! Append-only registries for explainers and observation batches.
//!
//! # Invariants
//!
//! - Model labels are unique across the registry
//! - Row identifiers are unique across every batch ever registered
//! - A failed registration leaves the registry untouched
//! - Entries are never mutated or removed

mod errors;
mod explainers;
mod observations;

pub use errors::{RegistryError, RegistryResult};
pub use explainers::ExplainerRegistry;
pub use observations::ObservationRegistry;
