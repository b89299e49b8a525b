//! CLI module for modelarena
//!
//! Provides command-line interface for:
//! - serve: Register the manifest and serve plots over HTTP
//! - export: Write a static snapshot of every plot
//! - catalog: Print the catalog descriptor

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, Sources};
pub use commands::{catalog, export, load_store, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_pretty, write_response};
