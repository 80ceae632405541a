//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--definitions <dir>`: Definition files directory
//! - `--api-version <n>`: Requested API version
//! - `--ignore`, `--ignore-destructive`, `--include`, `--include-destructive`:
//!   Pattern files for the change filters

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::FilterConfig;

/// metadelta - classify diff paths against versioned metadata definitions
#[derive(Parser, Debug)]
#[command(name = "metadelta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if metadelta was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Directory holding the versioned definition files
    #[arg(long = "definitions", global = true, value_name = "DIR")]
    pub definitions_dir: Option<PathBuf>,

    /// API version; unsupported versions use the latest supported one
    #[arg(long, global = true, value_name = "N")]
    pub api_version: Option<u32>,

    /// Pattern file of paths to drop
    #[arg(long, global = true, value_name = "FILE")]
    pub ignore: Option<String>,

    /// Pattern file of deleted paths to drop (defaults to --ignore)
    #[arg(long, global = true, value_name = "FILE")]
    pub ignore_destructive: Option<String>,

    /// Pattern file of paths to keep
    #[arg(long, global = true, value_name = "FILE")]
    pub include: Option<String>,

    /// Pattern file of deleted paths to keep
    #[arg(long, global = true, value_name = "FILE")]
    pub include_destructive: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Filter settings given on the command line.
    pub fn filter_overrides(&self) -> FilterConfig {
        FilterConfig {
            ignore: self.ignore.clone().unwrap_or_default(),
            ignore_destructive: self.ignore_destructive.clone().unwrap_or_default(),
            include: self.include.clone().unwrap_or_default(),
            include_destructive: self.include_destructive.clone().unwrap_or_default(),
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List discovered API versions and the latest supported one
    Versions,

    /// Resolve paths to metadata types
    #[command(after_help = "\
OUTPUT:
    One line per path: <path> TAB <type> TAB <fully qualified name>
    Unresolved paths print '-' as type.

EXAMPLES:
    metadelta resolve force-app/main/default/classes/Foo.cls
    git diff --name-only HEAD~1 | xargs metadelta resolve")]
    Resolve {
        /// Repository-relative paths
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Read diff lines from stdin and print the ones kept by the filters
    #[command(after_help = "\
INPUT:
    Lines of the form '<A|M|D> <path>'. Lines starting with '!' are always kept.

EXAMPLES:
    git diff --name-status HEAD~1 | metadelta filter --ignore .forceignore")]
    Filter,
}
