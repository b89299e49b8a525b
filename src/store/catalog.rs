//! # Catalog Descriptor
//!
//! Projection of registry and store state into the single document served
//! at the root of the HTTP surface and written by snapshot export.

use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, PlotKind, PlotParam};
use crate::registry::{ExplainerRegistry, ObservationRegistry};

/// Protocol version tag carried by every descriptor
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// A plot kind and the query parameters it requires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotDescriptor {
    #[serde(rename = "plotType")]
    pub plot_type: PlotKind,
    pub params: Vec<PlotParam>,
}

impl PlotDescriptor {
    /// One entry per plot kind, in declaration order
    pub fn all() -> Vec<PlotDescriptor> {
        PlotKind::ALL
            .iter()
            .map(|kind| PlotDescriptor {
                plot_type: *kind,
                params: kind.required_params().to_vec(),
            })
            .collect()
    }
}

/// Variant-specific part of the descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogContents {
    Static {
        plots: Vec<Artifact>,
    },
    Live {
        #[serde(rename = "availablePlots")]
        available_plots: Vec<PlotDescriptor>,
        timestamp: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDescriptor {
    pub version: String,
    pub observations: Vec<String>,
    pub variables: Vec<String>,
    pub models: Vec<String>,
    #[serde(flatten)]
    pub contents: CatalogContents,
}

impl CatalogDescriptor {
    /// Descriptor for a store holding a materialized artifact list
    pub fn for_static(
        explainers: &ExplainerRegistry,
        observations: &ObservationRegistry,
        plots: &[Artifact],
    ) -> Self {
        Self::build(
            explainers,
            observations,
            CatalogContents::Static {
                plots: plots.to_vec(),
            },
        )
    }

    /// Descriptor for a store computing on demand
    pub fn for_live(
        explainers: &ExplainerRegistry,
        observations: &ObservationRegistry,
        timestamp: i64,
    ) -> Self {
        Self::build(
            explainers,
            observations,
            CatalogContents::Live {
                available_plots: PlotDescriptor::all(),
                timestamp,
            },
        )
    }

    fn build(
        explainers: &ExplainerRegistry,
        observations: &ObservationRegistry,
        contents: CatalogContents,
    ) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            observations: observations.row_ids(),
            variables: explainers.variables(),
            models: explainers.labels(),
            contents,
        }
    }

    /// Materialized artifacts, empty for live descriptors
    pub fn plots(&self) -> &[Artifact] {
        match &self.contents {
            CatalogContents::Static { plots } => plots,
            CatalogContents::Live { .. } => &[],
        }
    }

    pub fn timestamp(&self) -> Option<i64> {
        match &self.contents {
            CatalogContents::Static { .. } => None,
            CatalogContents::Live { timestamp, .. } => Some(*timestamp),
        }
    }
}
