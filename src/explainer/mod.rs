//! # Explainers
//!
//! An explainer bundles a fitted model with the data it was trained on:
//! a label, a training table, a target vector and a uniform prediction
//! function. Explainers are opaque to the store and never change once
//! registered.

mod explainer;
mod linear;
mod predictor;

pub use explainer::Explainer;
pub use linear::{Link, LinearModel};
pub use predictor::{PredictionError, Predictor};
