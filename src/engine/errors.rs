//! # Engine Errors

use thiserror::Error;

use crate::data::DataError;
use crate::explainer::PredictionError;

/// Result type for engine computations
pub type EngineResult<T> = Result<T, EngineError>;

/// Computation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Variable not in training data: {0}")]
    UnknownVariable(String),

    #[error("Observation has no value for variable: {0}")]
    MissingValue(String),

    #[error("Variable '{0}' mixes numeric and categorical values")]
    MixedVariable(String),

    #[error("Variable '{0}' has no values")]
    EmptyVariable(String),

    #[error("Target of model '{0}' is not numeric")]
    NonNumericTarget(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}
