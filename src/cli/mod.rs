//! cli
//!
//! Command-line interface layer for metadelta.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Load configuration and build the [`Registry`]
//! - Delegate to command handlers
//!
//! The CLI owns no classification logic; every answer comes from the
//! registry's catalog, repository and filters.

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::registry::Registry;

/// Execution context shared by command handlers.
#[derive(Debug)]
pub struct Context {
    /// Resolved configuration (file plus CLI overrides).
    pub config: Config,
    /// Owner of the catalog, repository and filters.
    pub registry: Registry,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    if let Some(dir) = &cli.cwd {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to '{}'", dir.display()))?;
    }
    let cwd = std::env::current_dir().context("failed to determine working directory")?;

    let config = Config::load(Some(&cwd))
        .context("failed to load configuration")?
        .with_overrides(
            cli.api_version,
            cli.definitions_dir.clone(),
            &cli.filter_overrides(),
        )
        .context("invalid command-line configuration")?;

    let registry = Registry::new(config.definitions_dir());
    let ctx = Context { config, registry };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(commands::dispatch(cli.command, &ctx))
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
