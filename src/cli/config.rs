//! Configuration file (`modelarena.json`)
//!
//! Every section is optional:
//!
//! ```json
//! {
//!   "mode": "live",
//!   "manifest": "./arena.json",
//!   "http": {"host": "127.0.0.1", "port": 9294, "cors_origins": []},
//!   "engine": {"grid_points": 51, "permutations": 10, "seed": 1313},
//!   "logging": {"level": "info", "format": "text"}
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::http_server::HttpServerConfig;
use crate::logging::LoggingConfig;
use crate::store::StoreMode;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Store mode (default: live)
    #[serde(default)]
    pub mode: StoreMode,

    /// Workspace manifest loaded at startup (optional)
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        self.engine
            .validate()
            .map_err(|e| CliError::config_error(format!("Engine config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| CliError::config_error(format!("Logging config error: {}", e)))?;

        Ok(())
    }
}
