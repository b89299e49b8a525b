//! # Numeric Engine

use serde_json::Value;

use super::breakdown::breakdown;
use super::config::EngineConfig;
use super::dependence::{accumulated_dependence, partial_dependence};
use super::errors::{EngineError, EngineResult};
use super::importance::permutation_importance;
use super::profile::ceteris_paribus;
use super::ComputationEngine;
use crate::explainer::Explainer;
use crate::observation::Observation;

/// Bundled [`ComputationEngine`] working on numeric and categorical tables
#[derive(Debug, Clone, Default)]
pub struct NumericEngine {
    config: EngineConfig,
}

impl NumericEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom settings, rejected when `config` does not validate
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl ComputationEngine for NumericEngine {
    fn feature_importance(&self, explainer: &Explainer, variables: &[String]) -> EngineResult<Value> {
        let result = permutation_importance(explainer, variables, &self.config)?;
        Ok(serde_json::to_value(result)?)
    }

    fn partial_dependence(&self, explainer: &Explainer, variable: &str) -> EngineResult<Value> {
        let result = partial_dependence(explainer, variable, &self.config)?;
        Ok(serde_json::to_value(result)?)
    }

    fn accumulated_dependence(&self, explainer: &Explainer, variable: &str) -> EngineResult<Value> {
        let result = accumulated_dependence(explainer, variable, &self.config)?;
        Ok(serde_json::to_value(result)?)
    }

    fn breakdown(
        &self,
        explainer: &Explainer,
        observation: &Observation<'_>,
        variables: &[String],
    ) -> EngineResult<Value> {
        let result = breakdown(explainer, observation, variables)?;
        Ok(serde_json::to_value(result)?)
    }

    fn ceteris_paribus(
        &self,
        explainer: &Explainer,
        observation: &Observation<'_>,
        variable: &str,
    ) -> EngineResult<Value> {
        let result = ceteris_paribus(explainer, observation, variable, &self.config)?;
        Ok(serde_json::to_value(result)?)
    }
}
