//! CLI command implementations
//!
//! Every command follows the same boot sequence:
//! 1. Configuration load (file or defaults, then command-line overrides)
//! 2. Logging
//! 3. Store construction for the selected mode
//! 4. Manifest registration
//!
//! and then serves, exports or prints the resulting store.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::info;

use crate::engine::NumericEngine;
use crate::http_server::HttpServer;
use crate::logging::{init_logging, LoggingError};
use crate::manifest::Manifest;
use crate::snapshot::export_snapshot;
use crate::store::{build_store, share, ArtifactStore, StoreMode};

use super::args::{Command, Sources};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_pretty, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { sources, port } => serve(&sources, port),
        Command::Export { sources, output } => export(&sources, &output),
        Command::Catalog { sources } => catalog(&sources),
    }
}

/// Resolve configuration with command-line overrides applied
fn configure(sources: &Sources) -> CliResult<Config> {
    let mut config = Config::load_or_default(sources.config.as_deref())?;
    if let Some(mode) = sources.mode {
        config.mode = mode;
    }
    if let Some(manifest) = &sources.manifest {
        config.manifest = Some(manifest.clone());
    }

    match init_logging(&config.logging) {
        Ok(()) | Err(LoggingError::AlreadyInitialized(_)) => {}
        Err(e) => return Err(CliError::config_error(e.to_string())),
    }

    Ok(config)
}

/// Build the store for `config` and register the manifest contents
pub fn load_store(config: &Config) -> CliResult<Box<dyn ArtifactStore>> {
    let engine = NumericEngine::with_config(config.engine.clone())
        .map_err(|e| CliError::config_error(e.to_string()))?;
    let mut store = build_store(config.mode, engine);
    info!(mode = %config.mode, "Store created");

    if let Some(path) = &config.manifest {
        let manifest = Manifest::load(path).map_err(|e| CliError::manifest_error(e.to_string()))?;
        manifest
            .apply(store.as_mut())
            .map_err(|e| CliError::manifest_error(e.to_string()))?;
    }

    Ok(store)
}

/// Serve the store over HTTP until the process is stopped
pub fn serve(sources: &Sources, port: Option<u16>) -> CliResult<()> {
    let mut config = configure(sources)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let store = load_store(&config)?;
    let server = HttpServer::with_config(share(store), config.http.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Materialize every plot and write the static snapshot to `output`
pub fn export(sources: &Sources, output: &Path) -> CliResult<()> {
    let mut config = configure(sources)?;
    if config.mode != StoreMode::Static {
        info!(configured = %config.mode, "Export always uses a static store");
        config.mode = StoreMode::Static;
    }

    let store = load_store(&config)?;
    let bytes = export_snapshot(store.as_ref(), output)
        .map_err(|e| CliError::export_failed(e.to_string()))?;

    write_response(json!({
        "output": PathBuf::from(output),
        "bytes": bytes,
        "models": store.explainers().len(),
        "observations": store.batches().row_ids().len(),
    }))
}

/// Print the catalog descriptor
pub fn catalog(sources: &Sources) -> CliResult<()> {
    let config = configure(sources)?;
    let store = load_store(&config)?;
    write_pretty(&store.catalog())
}
