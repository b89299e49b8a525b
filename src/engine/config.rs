//! Engine Configuration
//!
//! Grid resolution and permutation settings for [`NumericEngine`](super::NumericEngine).

use serde::{Deserialize, Serialize};

/// Numeric engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Points in partial dependence and ceteris-paribus grids (default: 51)
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,

    /// Permutation rounds per variable for feature importance (default: 10)
    #[serde(default = "default_permutations")]
    pub permutations: usize,

    /// Seed for permutation shuffles (default: 1313)
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_grid_points() -> usize {
    51
}

fn default_permutations() -> usize {
    10
}

fn default_seed() -> u64 {
    1313
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_points: default_grid_points(),
            permutations: default_permutations(),
            seed: default_seed(),
        }
    }
}

impl EngineConfig {
    /// Check settings are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_points < 2 {
            return Err(format!("grid_points must be >= 2, got {}", self.grid_points));
        }
        if self.permutations == 0 {
            return Err("permutations must be > 0".to_string());
        }
        Ok(())
    }
}
