//! # Explainer Registry

use std::collections::HashMap;

use super::errors::{RegistryError, RegistryResult};
use crate::explainer::Explainer;

/// Registered explainers, in insertion order
#[derive(Debug, Default)]
pub struct ExplainerRegistry {
    explainers: Vec<Explainer>,

    /// Positions by label
    by_label: HashMap<String, usize>,
}

impl ExplainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an explainer, returning a reference to the stored entry
    pub fn register(&mut self, explainer: Explainer) -> RegistryResult<&Explainer> {
        let label = explainer.label().to_string();

        if self.by_label.contains_key(&label) {
            return Err(RegistryError::DuplicateLabel(label));
        }

        explainer
            .validate()
            .map_err(|reason| RegistryError::InvalidExplainer {
                label: label.clone(),
                reason,
            })?;

        let position = self.explainers.len();
        self.explainers.push(explainer);
        self.by_label.insert(label, position);

        Ok(&self.explainers[position])
    }

    pub fn lookup(&self, label: &str) -> Option<&Explainer> {
        self.by_label.get(label).map(|&i| &self.explainers[i])
    }

    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// All explainers in insertion order
    pub fn all(&self) -> &[Explainer] {
        &self.explainers
    }

    pub fn labels(&self) -> Vec<String> {
        self.explainers
            .iter()
            .map(|e| e.label().to_string())
            .collect()
    }

    /// Union of every explainer's variable set, first appearance wins
    pub fn variables(&self) -> Vec<String> {
        let mut union: Vec<String> = Vec::new();
        for variable in self.explainers.iter().flat_map(Explainer::variables) {
            if !union.contains(&variable) {
                union.push(variable);
            }
        }
        union
    }

    pub fn len(&self) -> usize {
        self.explainers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explainers.is_empty()
    }
}
