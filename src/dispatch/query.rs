use serde::{Deserialize, Serialize};

use crate::artifact::PlotKind;
use crate::store::ResolveRequest;

/// Untyped query parameters as received over HTTP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotQuery {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub observation: Option<String>,
    #[serde(default)]
    pub variable: Option<String>,
}

impl PlotQuery {
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// Typed request, or `None` if a parameter `kind` needs is missing.
    /// Parameters the kind does not use are dropped.
    pub fn to_request(&self, kind: PlotKind) -> Option<ResolveRequest> {
        let mut request = ResolveRequest::new(kind, self.model.clone()?);
        if kind.needs_observation() {
            request = request.with_observation(self.observation.clone()?);
        }
        if kind.needs_variable() {
            request = request.with_variable(self.variable.clone()?);
        }
        Some(request)
    }
}
