//! # Artifact Records

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kind::PlotKind;

/// Identity of an artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
    pub kind: PlotKind,
    pub model: String,
    pub observation: Option<String>,
    pub variable: Option<String>,
}

impl ArtifactKey {
    pub fn new(
        kind: PlotKind,
        model: impl Into<String>,
        observation: Option<String>,
        variable: Option<String>,
    ) -> Self {
        Self {
            kind,
            model: model.into(),
            observation,
            variable,
        }
    }

    /// Key of a model-level plot (feature importance)
    pub fn model(kind: PlotKind, model: impl Into<String>) -> Self {
        Self::new(kind, model, None, None)
    }

    /// Key of a (model, variable) plot
    pub fn variable(kind: PlotKind, model: impl Into<String>, variable: impl Into<String>) -> Self {
        Self::new(kind, model, None, Some(variable.into()))
    }

    /// Key of a (model, observation) plot
    pub fn observation(
        kind: PlotKind,
        model: impl Into<String>,
        observation: impl Into<String>,
    ) -> Self {
        Self::new(kind, model, Some(observation.into()), None)
    }

    /// Key of a (model, observation, variable) plot
    pub fn profile(
        kind: PlotKind,
        model: impl Into<String>,
        observation: impl Into<String>,
        variable: impl Into<String>,
    ) -> Self {
        Self::new(kind, model, Some(observation.into()), Some(variable.into()))
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[model={}", self.kind, self.model)?;
        if let Some(observation) = &self.observation {
            write!(f, ", observation={}", observation)?;
        }
        if let Some(variable) = &self.variable {
            write!(f, ", variable={}", variable)?;
        }
        write!(f, "]")
    }
}

/// One computed plot.
///
/// Serialized in the shape published to viewers:
/// `{"plotType", "model", "observation"?, "variable"?, "data"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "plotType")]
    pub kind: PlotKind,

    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,

    /// Opaque plot data produced by the computation engine
    pub data: Value,
}

impl Artifact {
    pub fn new(key: ArtifactKey, data: Value) -> Self {
        Self {
            kind: key.kind,
            model: key.model,
            observation: key.observation,
            variable: key.variable,
            data,
        }
    }

    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::new(
            self.kind,
            self.model.clone(),
            self.observation.clone(),
            self.variable.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_display() {
        let key = ArtifactKey::profile(PlotKind::CeterisParibus, "A", "Alice", "age");
        assert_eq!(
            key.to_string(),
            "CeterisParibus[model=A, observation=Alice, variable=age]"
        );
    }

    #[test]
    fn test_artifact_json_shape() {
        let artifact = Artifact::new(
            ArtifactKey::observation(PlotKind::Breakdown, "A", "Alice"),
            json!({"intercept": 0.5}),
        );
        let value = serde_json::to_value(&artifact).unwrap();
        assert_eq!(
            value,
            json!({
                "plotType": "Breakdown",
                "model": "A",
                "observation": "Alice",
                "data": {"intercept": 0.5}
            })
        );
        assert_eq!(artifact.key().observation.as_deref(), Some("Alice"));
    }
}
