//! Permutation feature importance

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::errors::{EngineError, EngineResult};
use super::support::mean;
use crate::explainer::Explainer;

/// Loss of the model after permuting one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableImportance {
    pub variable: String,
    /// Mean loss across permutation rounds
    pub dropout_loss: f64,
    pub min: f64,
    pub max: f64,
}

/// Result of permutation importance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceResult {
    /// Loss function name
    pub loss: String,
    /// Loss of the untouched model
    pub full_model: f64,
    /// Loss against a permuted target
    pub baseline: f64,
    /// Sorted by drop-out loss, most important first
    pub variables: Vec<VariableImportance>,
}

fn rmse(observed: &[f64], predicted: &[f64]) -> f64 {
    let squared: Vec<f64> = observed
        .iter()
        .zip(predicted)
        .map(|(o, p)| (o - p).powi(2))
        .collect();
    mean(&squared).sqrt()
}

/// Compute permutation importance for the given variables
pub fn permutation_importance(
    explainer: &Explainer,
    variables: &[String],
    config: &EngineConfig,
) -> EngineResult<ImportanceResult> {
    let target = explainer
        .target()
        .numbers()
        .ok_or_else(|| EngineError::NonNumericTarget(explainer.label().to_string()))?;
    let data = explainer.data();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let predictions = explainer.predict(data)?;
    let full_model = rmse(&target, &predictions);

    let mut baseline_losses = Vec::with_capacity(config.permutations);
    for _ in 0..config.permutations {
        let mut shuffled = target.clone();
        shuffled.shuffle(&mut rng);
        baseline_losses.push(rmse(&shuffled, &predictions));
    }

    let mut importances = Vec::with_capacity(variables.len());
    for variable in variables {
        let column = data
            .column(variable)
            .ok_or_else(|| EngineError::UnknownVariable(variable.clone()))?;

        let mut losses = Vec::with_capacity(config.permutations);
        for _ in 0..config.permutations {
            let mut cells = column.cells().to_vec();
            cells.shuffle(&mut rng);
            let permuted = data.with_column_replaced(variable, cells)?;
            losses.push(rmse(&target, &explainer.predict(&permuted)?));
        }

        importances.push(VariableImportance {
            variable: variable.clone(),
            dropout_loss: mean(&losses),
            min: losses.iter().copied().fold(f64::INFINITY, f64::min),
            max: losses.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        });
    }

    importances.sort_by(|a, b| b.dropout_loss.total_cmp(&a.dropout_loss));

    Ok(ImportanceResult {
        loss: "rmse".to_string(),
        full_model,
        baseline: mean(&baseline_losses),
        variables: importances,
    })
}
