//! Sequential break-down attribution
//!
//! Starting from the mean prediction over the training data, variables are
//! pinned to the observation's values one at a time. Each variable's
//! contribution is the change in mean prediction it causes. Variables with
//! the largest single-variable effect are pinned first.

use serde::{Deserialize, Serialize};

use super::errors::EngineResult;
use super::support::{mean, observation_point, observed_value};
use crate::data::Cell;
use crate::explainer::Explainer;
use crate::observation::Observation;

/// Contribution of one variable to a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub variable: String,
    pub value: Cell,
    pub contribution: f64,
    /// Mean prediction after pinning this and all earlier variables
    pub cumulative: f64,
}

/// Break-down of one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownResult {
    /// Mean prediction over the training data
    pub intercept: f64,
    /// Model prediction for the observation
    pub prediction: f64,
    pub contributions: Vec<Contribution>,
}

pub fn breakdown(
    explainer: &Explainer,
    observation: &Observation<'_>,
    variables: &[String],
) -> EngineResult<BreakdownResult> {
    let data = explainer.data();
    let intercept = mean(&explainer.predict(data)?);

    let mut pinned_values = Vec::with_capacity(variables.len());
    for variable in variables {
        pinned_values.push((variable, observed_value(observation, variable)?));
    }

    let mut order: Vec<(usize, f64)> = Vec::with_capacity(variables.len());
    for (i, (variable, value)) in pinned_values.iter().enumerate() {
        let pinned = data.with_column_filled(variable, value)?;
        let effect = mean(&explainer.predict(&pinned)?) - intercept;
        order.push((i, effect.abs()));
    }
    // stable sort keeps table order among ties
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut current = data.clone();
    let mut previous = intercept;
    let mut contributions = Vec::with_capacity(order.len());
    for (i, _) in order {
        let (variable, value) = pinned_values[i];
        current = current.with_column_filled(variable, value)?;
        let cumulative = mean(&explainer.predict(&current)?);
        contributions.push(Contribution {
            variable: variable.clone(),
            value: value.clone(),
            contribution: cumulative - previous,
            cumulative,
        });
        previous = cumulative;
    }

    let point = observation_point(explainer, observation)?;
    let prediction = explainer.predict(&point)?[0];

    Ok(BreakdownResult {
        intercept,
        prediction,
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, Table};
    use crate::explainer::LinearModel;
    use crate::observation::ObservationBatch;

    fn explainer() -> Explainer {
        let data = Table::new(vec![
            Column::numeric("age", &[20.0, 40.0]),
            Column::numeric("income", &[10.0, 30.0]),
            Column::numeric("y", &[0.0, 1.0]),
        ])
        .unwrap();
        let model = LinearModel::new(0.0)
            .with_coefficient("age", 1.0)
            .with_coefficient("income", 10.0);
        Explainer::with_target_column("A", data, "y", model).unwrap()
    }

    fn batch() -> ObservationBatch {
        ObservationBatch::from_records(
            vec!["age".into(), "income".into()],
            vec![("Alice".into(), vec![Cell::Number(31.0), Cell::Number(50.0)])],
        )
        .unwrap()
    }

    #[test]
    fn test_contributions_sum_to_prediction() {
        let explainer = explainer();
        let batch = batch();
        let alice = batch.observation(0).unwrap();
        let result = breakdown(&explainer, &alice, &explainer.variables()).unwrap();

        // intercept = mean(20 + 100, 40 + 300) = 230
        assert_eq!(result.intercept, 230.0);
        assert_eq!(result.prediction, 531.0);
        let total: f64 = result.contributions.iter().map(|c| c.contribution).sum();
        assert!((result.intercept + total - result.prediction).abs() < 1e-9);
    }

    #[test]
    fn test_largest_effect_first() {
        let explainer = explainer();
        let batch = batch();
        let alice = batch.observation(0).unwrap();
        let result = breakdown(&explainer, &alice, &explainer.variables()).unwrap();
        assert_eq!(result.contributions[0].variable, "income");
        assert_eq!(result.contributions[0].contribution, 300.0);
        assert_eq!(result.contributions[1].contribution, 1.0);
    }

    #[test]
    fn test_missing_observation_value() {
        let explainer = explainer();
        let batch = batch();
        let alice = batch.observation(0).unwrap();
        let result = breakdown(&explainer, &alice, &["height".to_string()]);
        assert!(result.is_err());
    }
}
