//! # Plot Kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed catalog of diagnostic plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlotKind {
    FeatureImportance,
    PartialDependence,
    AccumulatedDependence,
    Breakdown,
    CeterisParibus,
}

/// A request parameter a plot kind is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotParam {
    Model,
    Observation,
    Variable,
}

impl PlotParam {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotParam::Model => "model",
            PlotParam::Observation => "observation",
            PlotParam::Variable => "variable",
        }
    }
}

impl PlotKind {
    /// Every plot kind, in catalog order
    pub const ALL: [PlotKind; 5] = [
        PlotKind::FeatureImportance,
        PlotKind::PartialDependence,
        PlotKind::AccumulatedDependence,
        PlotKind::Breakdown,
        PlotKind::CeterisParibus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlotKind::FeatureImportance => "FeatureImportance",
            PlotKind::PartialDependence => "PartialDependence",
            PlotKind::AccumulatedDependence => "AccumulatedDependence",
            PlotKind::Breakdown => "Breakdown",
            PlotKind::CeterisParibus => "CeterisParibus",
        }
    }

    /// Parameters the artifact is keyed by
    pub fn required_params(&self) -> &'static [PlotParam] {
        match self {
            PlotKind::FeatureImportance => &[PlotParam::Model],
            PlotKind::PartialDependence | PlotKind::AccumulatedDependence => {
                &[PlotParam::Model, PlotParam::Variable]
            }
            PlotKind::Breakdown => &[PlotParam::Model, PlotParam::Observation],
            PlotKind::CeterisParibus => &[
                PlotParam::Model,
                PlotParam::Observation,
                PlotParam::Variable,
            ],
        }
    }

    pub fn needs_observation(&self) -> bool {
        self.required_params().contains(&PlotParam::Observation)
    }

    pub fn needs_variable(&self) -> bool {
        self.required_params().contains(&PlotParam::Variable)
    }

    /// Model-level plots, computed once per explainer
    pub fn is_global(&self) -> bool {
        !self.needs_observation()
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a path segment names no plot kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown plot kind: {0}")]
pub struct UnknownPlotKind(pub String);

impl FromStr for PlotKind {
    type Err = UnknownPlotKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlotKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownPlotKind(s.to_string()))
    }
}
