// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;
use snapd_client::endpoints::GetLogs;
use snapd_core::LogEntry;

use super::Context;
use crate::output::OutputFormat;

/// Entries are printed as they arrive; with `follow` this runs until
/// Ctrl-C or until snapd ends the stream.
pub async fn logs(ctx: &Context, names: Vec<String>, lines: i64, follow: bool) -> Result<()> {
    let format = ctx.format;
    let endpoint = GetLogs::new(names).limit(lines).follow(follow).on_entry(move |entry| {
        println!("{}", render(&entry, format));
    });
    ctx.client.logs(endpoint, ctx.options()).await?;
    Ok(())
}

fn render(entry: &LogEntry, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => entry.to_string(),
        OutputFormat::Json => serde_json::to_string(entry).unwrap_or_default(),
    }
}
