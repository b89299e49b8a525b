//! # Linear Model
//!
//! A small generalized linear model that can be declared in a workspace
//! manifest. Numeric variables contribute `coefficient * value`; categorical
//! variables contribute a per-level effect (unknown levels contribute zero).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::predictor::{PredictionError, Predictor};
use crate::data::Table;

/// Link function applied to the linear predictor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    #[default]
    Identity,
    Logistic,
}

/// Linear model parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub intercept: f64,

    /// Coefficients of numeric variables
    #[serde(default)]
    pub coefficients: BTreeMap<String, f64>,

    /// Level effects of categorical variables
    #[serde(default)]
    pub levels: BTreeMap<String, BTreeMap<String, f64>>,

    #[serde(default)]
    pub link: Link,
}

impl LinearModel {
    pub fn new(intercept: f64) -> Self {
        Self {
            intercept,
            ..Default::default()
        }
    }

    /// Add a numeric coefficient
    pub fn with_coefficient(mut self, variable: impl Into<String>, weight: f64) -> Self {
        self.coefficients.insert(variable.into(), weight);
        self
    }

    /// Add a categorical level effect
    pub fn with_level(
        mut self,
        variable: impl Into<String>,
        level: impl Into<String>,
        effect: f64,
    ) -> Self {
        self.levels
            .entry(variable.into())
            .or_default()
            .insert(level.into(), effect);
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.link = link;
        self
    }
}

impl Predictor for LinearModel {
    fn predict(&self, data: &Table) -> Result<Vec<f64>, PredictionError> {
        let mut scores = vec![self.intercept; data.n_rows()];

        for (name, weight) in &self.coefficients {
            let column = data
                .column(name)
                .ok_or_else(|| PredictionError::new(format!("missing column '{}'", name)))?;
            for (score, cell) in scores.iter_mut().zip(column.cells()) {
                let value = cell.as_number().ok_or_else(|| {
                    PredictionError::new(format!("column '{}' holds non-numeric value '{}'", name, cell))
                })?;
                *score += weight * value;
            }
        }

        for (name, effects) in &self.levels {
            let column = data
                .column(name)
                .ok_or_else(|| PredictionError::new(format!("missing column '{}'", name)))?;
            for (score, cell) in scores.iter_mut().zip(column.cells()) {
                let level = cell.to_string();
                *score += effects.get(&level).copied().unwrap_or(0.0);
            }
        }

        if self.link == Link::Logistic {
            for score in &mut scores {
                *score = 1.0 / (1.0 + (-*score).exp());
            }
        }

        Ok(scores)
    }
}
