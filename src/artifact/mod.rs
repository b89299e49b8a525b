//! # Artifacts
//!
//! One computed diagnostic plot, keyed by plot kind and the model,
//! observation and variable it describes.
//!
//! | Plot kind | Keyed by |
//! |---|---|
//! | FeatureImportance | model |
//! | PartialDependence | model, variable |
//! | AccumulatedDependence | model, variable |
//! | Breakdown | model, observation |
//! | CeterisParibus | model, observation, variable |

mod kind;
mod record;

pub use kind::{PlotKind, PlotParam, UnknownPlotKind};
pub use record::{Artifact, ArtifactKey};
