//! Shared helpers for the numeric engine: evaluation grids, means and
//! single-row prediction points.

use super::errors::{EngineError, EngineResult};
use crate::data::{Cell, Column, Table};
use crate::explainer::Explainer;
use crate::observation::Observation;

/// Values a variable is swept over
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Grid {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl Grid {
    /// Quantile grid for numeric columns, level list for categorical ones.
    ///
    /// A numeric grid always spans at least the column's minimum and maximum.
    pub(crate) fn for_column(column: &Column, points: usize) -> EngineResult<Grid> {
        let points = points.max(2);
        if column.is_empty() {
            return Err(EngineError::EmptyVariable(column.name().to_string()));
        }

        if let Some(mut values) = column.numbers() {
            values.sort_by(f64::total_cmp);
            let mut distinct = values.clone();
            distinct.dedup();

            if distinct.len() <= points {
                return Ok(Grid::Numeric(distinct));
            }

            let steps = (points - 1) as f64;
            let mut grid: Vec<f64> = (0..points)
                .map(|i| quantile(&values, i as f64 / steps))
                .collect();
            grid.dedup();
            return Ok(Grid::Numeric(grid));
        }

        if column.is_categorical() {
            return Ok(Grid::Categorical(column.levels()));
        }

        Err(EngineError::MixedVariable(column.name().to_string()))
    }

    pub(crate) fn is_numeric(&self) -> bool {
        matches!(self, Grid::Numeric(_))
    }

    pub(crate) fn cells(&self) -> Vec<Cell> {
        match self {
            Grid::Numeric(values) => values.iter().copied().map(Cell::Number).collect(),
            Grid::Categorical(levels) => levels.iter().cloned().map(Cell::Category).collect(),
        }
    }
}

/// Linearly interpolated quantile of sorted values
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// One-row table in the explainer's layout carrying the observation's values.
///
/// Columns the observation lacks keep the first training row's value, so
/// the model always sees every column it was trained on.
pub(crate) fn observation_point(
    explainer: &Explainer,
    observation: &Observation<'_>,
) -> EngineResult<Table> {
    let data = explainer.data();
    let mut point = data.select_row(0)?;
    for name in data.column_names() {
        if let Some(cell) = observation.value(name) {
            point = point.with_column_filled(name, cell)?;
        }
    }
    Ok(point)
}

/// Observation value of a variable the computation depends on
pub(crate) fn observed_value<'a>(
    observation: &Observation<'a>,
    variable: &str,
) -> EngineResult<&'a Cell> {
    observation
        .value(variable)
        .ok_or_else(|| EngineError::MissingValue(variable.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numeric_grid_uses_distinct_values() {
        let column = Column::numeric("x", &[3.0, 1.0, 2.0, 1.0]);
        assert_eq!(
            Grid::for_column(&column, 10).unwrap(),
            Grid::Numeric(vec![1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn test_large_numeric_grid_uses_quantiles() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let column = Column::numeric("x", &values);
        let Grid::Numeric(grid) = Grid::for_column(&column, 5).unwrap() else {
            panic!("expected numeric grid");
        };
        assert_eq!(grid, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_degenerate_point_count_keeps_endpoints() {
        let values: Vec<f64> = (0..=10).map(f64::from).collect();
        let column = Column::numeric("x", &values);
        for points in [0, 1] {
            assert_eq!(
                Grid::for_column(&column, points).unwrap(),
                Grid::Numeric(vec![0.0, 10.0])
            );
        }
    }

    #[test]
    fn test_categorical_and_mixed_grids() {
        let column = Column::categorical("c", &["b", "a", "b"]);
        assert_eq!(
            Grid::for_column(&column, 5).unwrap(),
            Grid::Categorical(vec!["b".into(), "a".into()])
        );

        let mixed = Column::new("m", vec![Cell::Number(1.0), Cell::from("a")]);
        assert!(matches!(
            Grid::for_column(&mixed, 5),
            Err(EngineError::MixedVariable(_))
        ));
    }

    #[test]
    fn test_quantile_interpolates() {
        assert_eq!(quantile(&[0.0, 10.0], 0.25), 2.5);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }
}
