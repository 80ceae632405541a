//! versions command - List discovered API versions

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::Context;

/// Print every discovered version, then the latest supported one.
///
/// ```text
/// versions: 57 58 59
/// latest supported: 58
/// ```
pub async fn versions(ctx: &Context, out: &mut impl Write) -> Result<ExitCode> {
    let catalog = ctx.registry.catalog();
    let versions = catalog
        .list_supported_versions()
        .await
        .with_context(|| format!("failed to scan '{}'", catalog.dir().display()))?;
    let latest = catalog.latest_supported_version().await?;

    let listed: Vec<String> = versions.iter().map(u32::to_string).collect();
    writeln!(out, "versions: {}", listed.join(" "))?;
    match latest {
        Some(version) => writeln!(out, "latest supported: {}", version)?,
        None => writeln!(out, "latest supported: none")?,
    }
    Ok(ExitCode::SUCCESS)
}
