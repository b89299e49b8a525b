//! CLI argument definitions using clap
//!
//! Commands:
//! - modelarena serve --config <path> --manifest <path>
//! - modelarena export --config <path> --manifest <path> --output <path>
//! - modelarena catalog --config <path> --manifest <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::store::StoreMode;

/// modelarena - Diagnostic plots for machine-learning models
#[derive(Parser, Debug)]
#[command(name = "modelarena")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments every command takes
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Sources {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the workspace manifest; overrides the config's `manifest`
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Store mode; overrides the config's `mode`
    #[arg(long)]
    pub mode: Option<StoreMode>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the catalog and plots over HTTP
    Serve {
        #[command(flatten)]
        sources: Sources,

        /// Port to listen on; overrides the config's `http.port`
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write a static snapshot of every plot to a JSON file
    Export {
        #[command(flatten)]
        sources: Sources,

        /// Destination file
        #[arg(long, default_value = "./modelarena-snapshot.json")]
        output: PathBuf,
    },

    /// Print the catalog descriptor to stdout
    Catalog {
        #[command(flatten)]
        sources: Sources,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
