//! resolve command - Resolve paths to metadata types

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::Context;

/// Print `path<TAB>type<TAB>fully qualified name` for each path.
///
/// Exits with failure when any path is unresolved.
pub async fn resolve(ctx: &Context, paths: &[String], out: &mut impl Write) -> Result<ExitCode> {
    let metadata = ctx
        .registry
        .metadata(ctx.config.api_version())
        .await
        .context("failed to load metadata definitions")?;

    let mut unresolved = 0;
    for path in paths {
        match metadata.get(path) {
            Some(found) => {
                let name = if found.xml_name.is_empty() {
                    found.directory_name().unwrap_or_default()
                } else {
                    found.xml_name.as_str()
                };
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    path,
                    name,
                    metadata.fully_qualified_name(path)
                )?;
            }
            None => {
                unresolved += 1;
                writeln!(out, "{}\t-", path)?;
            }
        }
    }

    Ok(if unresolved == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
