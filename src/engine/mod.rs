//! # Artifact Computation Engine
//!
//! Pure functions producing the payload of one artifact. The store calls
//! exactly one method per artifact and never inspects the returned value.
//!
//! [`NumericEngine`] is the bundled implementation:
//! - permutation feature importance (RMSE drop-out loss)
//! - partial dependence over a quantile grid
//! - accumulated local effects
//! - sequential break-down attribution
//! - ceteris-paribus profiles

mod breakdown;
mod config;
mod dependence;
mod errors;
mod importance;
mod numeric;
mod profile;
mod support;

pub use breakdown::{BreakdownResult, Contribution};
pub use config::EngineConfig;
pub use dependence::DependenceProfile;
pub use errors::{EngineError, EngineResult};
pub use importance::{ImportanceResult, VariableImportance};
pub use numeric::NumericEngine;
pub use profile::{CeterisParibusProfile, ProfilePoint};

use serde_json::Value;

use crate::explainer::Explainer;
use crate::observation::Observation;

/// Computes artifact payloads.
///
/// Implementations must be side-effect free with respect to the explainer
/// and observation; the store may call them from several readers at once.
pub trait ComputationEngine: Send + Sync {
    /// Model-level importance over the given variables
    fn feature_importance(&self, explainer: &Explainer, variables: &[String]) -> EngineResult<Value>;

    /// Partial dependence profile of one variable
    fn partial_dependence(&self, explainer: &Explainer, variable: &str) -> EngineResult<Value>;

    /// Accumulated dependence profile of one variable
    fn accumulated_dependence(&self, explainer: &Explainer, variable: &str) -> EngineResult<Value>;

    /// Attribution of one prediction to the given variables
    fn breakdown(
        &self,
        explainer: &Explainer,
        observation: &Observation<'_>,
        variables: &[String],
    ) -> EngineResult<Value>;

    /// Prediction profile of one observation along one variable
    fn ceteris_paribus(
        &self,
        explainer: &Explainer,
        observation: &Observation<'_>,
        variable: &str,
    ) -> EngineResult<Value>;
}
