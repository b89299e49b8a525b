//! # Explainer

use std::fmt;
use std::sync::Arc;

use super::predictor::{PredictionError, Predictor};
use crate::data::{Column, DataError, DataResult, Table};

/// A fitted model together with its training data and target.
///
/// # Target identity
///
/// The variable set of an explainer is every data column except the one
/// that *is* the target. A column is the target when it shares the target's
/// cell allocation ([`Column::same_as`]); building the explainer with
/// [`Explainer::with_target_column`] guarantees this. When no column shares
/// the allocation, the column carrying the target's name and values is the
/// target. A predictor that only happens to hold the same values as the
/// target always stays a predictor.
///
/// The target columns are resolved once at construction.
#[derive(Clone)]
pub struct Explainer {
    label: String,
    data: Table,
    target: Column,
    predictor: Arc<dyn Predictor>,
    excluded: Vec<usize>,
}

impl Explainer {
    pub fn new(
        label: impl Into<String>,
        data: Table,
        target: Column,
        predictor: impl Predictor + 'static,
    ) -> Self {
        let excluded = target_columns(&data, &target);
        Self {
            label: label.into(),
            data,
            target,
            predictor: Arc::new(predictor),
            excluded,
        }
    }

    /// Create an explainer whose target is one of the table's own columns
    pub fn with_target_column(
        label: impl Into<String>,
        data: Table,
        target: &str,
        predictor: impl Predictor + 'static,
    ) -> DataResult<Self> {
        let target = data
            .column(target)
            .cloned()
            .ok_or_else(|| DataError::ColumnNotFound(target.to_string()))?;
        Ok(Self::new(label, data, target, predictor))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> &Table {
        &self.data
    }

    pub fn target(&self) -> &Column {
        &self.target
    }

    /// Run the prediction function, checking it returns one score per row
    pub fn predict(&self, data: &Table) -> Result<Vec<f64>, PredictionError> {
        let scores = self.predictor.predict(data)?;
        if scores.len() != data.n_rows() {
            return Err(PredictionError::new(format!(
                "model '{}' returned {} predictions for {} rows",
                self.label,
                scores.len(),
                data.n_rows()
            )));
        }
        Ok(scores)
    }

    /// Check the explainer has the shape the store relies on.
    ///
    /// Returns a human readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.label.trim().is_empty() {
            return Err("label is empty".to_string());
        }
        if self.data.is_empty() {
            return Err("data table is empty".to_string());
        }
        if self.target.len() != self.data.n_rows() {
            return Err(format!(
                "target has {} values but data has {} rows",
                self.target.len(),
                self.data.n_rows()
            ));
        }
        self.predict(&self.data).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Names of the data columns holding the target
    pub fn target_names(&self) -> Vec<&str> {
        let columns = self.data.columns();
        self.excluded.iter().map(|&i| columns[i].name()).collect()
    }

    /// The variable set: data columns minus the target, in table order
    pub fn variables(&self) -> Vec<String> {
        self.variable_columns()
            .map(|c| c.name().to_string())
            .collect()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variable_columns().any(|c| c.name() == name)
    }

    fn variable_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.data
            .columns()
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.excluded.contains(i))
            .map(|(_, c)| c)
    }
}

/// Indices of the data columns identified as the target
fn target_columns(data: &Table, target: &Column) -> Vec<usize> {
    let columns = data.columns();
    let by_identity: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.same_as(target))
        .map(|(i, _)| i)
        .collect();

    if !by_identity.is_empty() {
        return by_identity;
    }

    columns
        .iter()
        .position(|c| c.name() == target.name() && c.values_equal(target))
        .into_iter()
        .collect()
}

impl fmt::Debug for Explainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Explainer")
            .field("label", &self.label)
            .field("rows", &self.data.n_rows())
            .field("columns", &self.data.column_names().collect::<Vec<_>>())
            .field("target", &self.target.name())
            .finish_non_exhaustive()
    }
}
