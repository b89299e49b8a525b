//! Partial dependence and accumulated local effects

use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::errors::{EngineError, EngineResult};
use super::support::{mean, Grid};
use crate::data::{Cell, Column};
use crate::explainer::Explainer;

/// Average model response along one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependenceProfile {
    pub variable: String,
    pub numerical: bool,
    pub x: Vec<Cell>,
    pub y: Vec<f64>,
}

fn training_column<'a>(explainer: &'a Explainer, variable: &str) -> EngineResult<&'a Column> {
    explainer
        .data()
        .column(variable)
        .ok_or_else(|| EngineError::UnknownVariable(variable.to_string()))
}

/// Mean prediction over the training data with the variable pinned to
/// each grid value in turn.
pub fn partial_dependence(
    explainer: &Explainer,
    variable: &str,
    config: &EngineConfig,
) -> EngineResult<DependenceProfile> {
    let column = training_column(explainer, variable)?;
    let grid = Grid::for_column(column, config.grid_points)?;
    let x = grid.cells();

    let mut y = Vec::with_capacity(x.len());
    for value in &x {
        let pinned = explainer.data().with_column_filled(variable, value)?;
        y.push(mean(&explainer.predict(&pinned)?));
    }

    Ok(DependenceProfile {
        variable: variable.to_string(),
        numerical: grid.is_numeric(),
        x,
        y,
    })
}

/// Accumulated local effects, centred and shifted to the mean prediction.
///
/// Numeric variables use the quantile grid as bin edges. Categorical
/// variables accumulate level-to-level differences in level order.
pub fn accumulated_dependence(
    explainer: &Explainer,
    variable: &str,
    config: &EngineConfig,
) -> EngineResult<DependenceProfile> {
    let column = training_column(explainer, variable)?;
    let grid = Grid::for_column(column, config.grid_points)?;
    let base = mean(&explainer.predict(explainer.data())?);

    let y = match &grid {
        Grid::Numeric(edges) => {
            let values = column
                .numbers()
                .ok_or_else(|| EngineError::MixedVariable(variable.to_string()))?;
            numeric_effects(explainer, variable, &values, edges)?
        }
        Grid::Categorical(levels) => categorical_effects(explainer, column, levels)?,
    };

    Ok(DependenceProfile {
        variable: variable.to_string(),
        numerical: grid.is_numeric(),
        x: grid.cells(),
        y: y.into_iter().map(|effect| effect + base).collect(),
    })
}

/// Bin `k` covers `(edges[k-1], edges[k]]`; the first bin also takes
/// `edges[0]` and anything beyond the last edge lands in the last bin.
fn bin_of(edges: &[f64], x: f64) -> usize {
    edges[1..]
        .iter()
        .position(|&edge| x <= edge)
        .map(|p| p + 1)
        .unwrap_or(edges.len() - 1)
}

/// Centre accumulated effects on their count-weighted mean
fn centre(accumulated: &[f64], counts: &[usize], midpoint: bool) -> Vec<f64> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return accumulated.to_vec();
    }
    let weighted: f64 = counts
        .iter()
        .enumerate()
        .map(|(k, &count)| {
            let level = if midpoint {
                (accumulated[k] + accumulated[k + 1]) / 2.0
            } else {
                accumulated[k]
            };
            count as f64 * level
        })
        .sum();
    let offset = weighted / total as f64;
    accumulated.iter().map(|a| a - offset).collect()
}

fn numeric_effects(
    explainer: &Explainer,
    variable: &str,
    values: &[f64],
    edges: &[f64],
) -> EngineResult<Vec<f64>> {
    if edges.len() < 2 {
        return Ok(vec![0.0; edges.len()]);
    }

    let data = explainer.data();
    let bins: Vec<usize> = values.iter().map(|&x| bin_of(edges, x)).collect();
    let lower = bins.iter().map(|&k| Cell::Number(edges[k - 1])).collect();
    let upper = bins.iter().map(|&k| Cell::Number(edges[k])).collect();

    let low = explainer.predict(&data.with_column_replaced(variable, lower)?)?;
    let high = explainer.predict(&data.with_column_replaced(variable, upper)?)?;

    let n_bins = edges.len() - 1;
    let mut sums = vec![0.0; n_bins];
    let mut counts = vec![0usize; n_bins];
    for ((&k, l), h) in bins.iter().zip(&low).zip(&high) {
        sums[k - 1] += h - l;
        counts[k - 1] += 1;
    }

    let mut accumulated = vec![0.0; edges.len()];
    for k in 1..edges.len() {
        let effect = if counts[k - 1] > 0 {
            sums[k - 1] / counts[k - 1] as f64
        } else {
            0.0
        };
        accumulated[k] = accumulated[k - 1] + effect;
    }

    Ok(centre(&accumulated, &counts, true))
}

fn categorical_effects(
    explainer: &Explainer,
    column: &Column,
    levels: &[String],
) -> EngineResult<Vec<f64>> {
    let data = explainer.data();
    let mut level_means = Vec::with_capacity(levels.len());
    for level in levels {
        let pinned = data.with_column_filled(column.name(), &Cell::Category(level.clone()))?;
        level_means.push(mean(&explainer.predict(&pinned)?));
    }

    let mut accumulated = vec![0.0; levels.len()];
    for j in 1..levels.len() {
        accumulated[j] = accumulated[j - 1] + (level_means[j] - level_means[j - 1]);
    }

    let counts: Vec<usize> = levels
        .iter()
        .map(|level| {
            column
                .cells()
                .iter()
                .filter(|c| c.as_category() == Some(level.as_str()))
                .count()
        })
        .collect();

    Ok(centre(&accumulated, &counts, false))
}
