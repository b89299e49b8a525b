//! # Tabular Data
//!
//! Column-oriented tables shared by explainers and observation batches.
//!
//! Columns are reference counted: cloning a [`Column`] hands out another
//! handle to the same cells. [`Column::same_as`] compares allocations, which
//! is how an explainer tells its target column apart from a predictor that
//! merely holds equal values.

mod cell;
mod errors;
mod table;

pub use cell::{Cell, Column};
pub use errors::{DataError, DataResult};
pub use table::{Row, Table};
