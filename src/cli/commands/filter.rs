//! filter command - Keep the diff lines allowed by both filters

use std::io::{BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::cli::Context;

/// Copy each input line kept by the ignore and the include filter to `out`.
pub async fn filter(ctx: &Context, input: impl BufRead, out: &mut impl Write) -> Result<ExitCode> {
    let filters = ctx.config.filter();
    let ignore = ctx
        .registry
        .ignore_filter(filters)
        .await
        .context("failed to build ignore filter")?;
    let include = ctx
        .registry
        .include_filter(filters)
        .await
        .context("failed to build include filter")?;

    let (mut kept, mut dropped) = (0usize, 0usize);
    for line in input.lines() {
        let line = line.context("failed to read diff line")?;
        if line.trim().is_empty() {
            continue;
        }
        if ignore.keep(&line) && include.keep(&line) {
            writeln!(out, "{}", line)?;
            kept += 1;
        } else {
            dropped += 1;
        }
    }

    debug!(kept, dropped, "filtered diff lines");
    Ok(ExitCode::SUCCESS)
}
