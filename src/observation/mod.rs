//! # Observations
//!
//! Batches of rows to be explained at the instance level. Each row carries
//! an identifier that is unique across the whole store.

mod batch;

pub use batch::{Observation, ObservationBatch};
