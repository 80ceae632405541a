//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Obtains what it needs from the registry
//! 2. Writes results to the given writer (stdout in production)
//!
//! Handlers are async because building the repository and the filters reads
//! definition and pattern files.

mod filter;
mod resolve;
mod versions;

pub use filter::filter;
pub use resolve::resolve;
pub use versions::versions;

use std::io;
use std::process::ExitCode;

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a command to its handler.
pub async fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Versions => versions(ctx, &mut out).await,
        Command::Resolve { paths } => resolve(ctx, &paths, &mut out).await,
        Command::Filter => {
            let stdin = io::stdin();
            filter(ctx, stdin.lock(), &mut out).await
        }
    }
}
