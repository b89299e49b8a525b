//! # Prediction Functions

use thiserror::Error;

use crate::data::Table;

/// Failure raised by a model's prediction function
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Prediction failed: {0}")]
pub struct PredictionError(pub String);

impl PredictionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Uniform prediction interface: one score per table row.
pub trait Predictor: Send + Sync {
    fn predict(&self, data: &Table) -> Result<Vec<f64>, PredictionError>;
}

impl<F> Predictor for F
where
    F: Fn(&Table) -> Result<Vec<f64>, PredictionError> + Send + Sync,
{
    fn predict(&self, data: &Table) -> Result<Vec<f64>, PredictionError> {
        self(data)
    }
}
