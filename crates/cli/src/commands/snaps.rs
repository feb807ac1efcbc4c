// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snap listing, search and the change-producing snap actions.

use anyhow::Result;
use snapd_client::endpoints::{FindSnaps, ListSnaps, Prefer, SnapAction};
use snapd_core::{Change, Snap};

use super::Context;
use crate::color;
use crate::output::{self, or_dash, OutputFormat, Table};

pub async fn list(ctx: &Context, snaps: Vec<String>, all: bool) -> Result<()> {
    let found = ctx.client.call(ListSnaps::new().names(snaps).all_revisions(all), ctx.options()).await?;
    match ctx.format {
        OutputFormat::Json => output::print_json(&found),
        OutputFormat::Text => {
            if found.is_empty() {
                println!("No snaps are installed yet.");
                return Ok(());
            }
            print!("{}", list_table(&found).render());
            Ok(())
        }
    }
}

pub(crate) fn list_table(snaps: &[Snap]) -> Table {
    let mut table = Table::new(&["Name", "Version", "Rev", "Tracking", "Publisher", "Notes"]);
    for snap in snaps {
        table.row(vec![
            color::header(&snap.name),
            snap.version.clone(),
            snap.revision.clone(),
            or_dash(&snap.tracking_channel),
            or_dash(snap.publisher_name()),
            notes(snap),
        ]);
    }
    table
}

/// `classic`, `devmode`, `disabled` and friends, or `-`.
pub(crate) fn notes(snap: &Snap) -> String {
    let mut notes = Vec::new();
    if snap.confinement == "classic" {
        notes.push("classic");
    }
    if snap.devmode {
        notes.push("devmode");
    }
    if snap.jailmode {
        notes.push("jailmode");
    }
    if snap.trymode {
        notes.push("try");
    }
    if snap.private {
        notes.push("private");
    }
    if snap.status == "installed" {
        notes.push("disabled");
    }
    if snap.snap_type != "app" && !snap.snap_type.is_empty() {
        notes.push(snap.snap_type.as_str());
    }
    if notes.is_empty() {
        "-".to_string()
    } else {
        notes.join(",")
    }
}

pub async fn info(ctx: &Context, name: &str) -> Result<()> {
    let snap = ctx.client.get_snap(name).await?;
    match ctx.format {
        OutputFormat::Json => output::print_json(&snap),
        OutputFormat::Text => {
            print!("{}", info_text(&snap));
            Ok(())
        }
    }
}

pub(crate) fn info_text(snap: &Snap) -> String {
    let mut fields = vec![
        ("name", snap.name.clone()),
        ("summary", snap.summary.clone()),
        ("publisher", or_dash(snap.publisher_name())),
        ("license", or_dash(&snap.license)),
        ("version", format!("{} ({})", snap.version, snap.revision)),
        ("tracking", or_dash(&snap.tracking_channel)),
        ("installed", output::format_time(snap.install_date)),
        ("notes", notes(snap)),
    ];
    if !snap.apps.is_empty() {
        let apps: Vec<&str> = snap.apps.iter().map(|app| app.name.as_str()).collect();
        fields.push(("apps", apps.join(", ")));
    }

    let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 1;
    let mut out = String::new();
    for (key, value) in fields {
        out.push_str(&format!("{:<width$} {value}\n", format!("{key}:")));
    }
    out
}

pub async fn find(ctx: &Context, query: &str, exact_name: bool) -> Result<()> {
    let endpoint = if exact_name { FindSnaps::name(query) } else { FindSnaps::query(query) };
    let snaps = ctx.client.call(endpoint, ctx.options()).await?;
    match ctx.format {
        OutputFormat::Json => output::print_json(&snaps),
        OutputFormat::Text => {
            if snaps.is_empty() {
                println!("No matching snaps for \"{query}\"");
                return Ok(());
            }
            let mut table = Table::new(&["Name", "Version", "Publisher", "Summary"]);
            for snap in &snaps {
                table.row(vec![
                    color::header(&snap.name),
                    snap.version.clone(),
                    or_dash(snap.publisher_name()),
                    snap.summary.clone(),
                ]);
            }
            print!("{}", table.render());
            Ok(())
        }
    }
}

pub async fn install(ctx: &Context, name: &str, channel: Option<String>, classic: bool) -> Result<()> {
    let mut action = SnapAction::install(name).classic(classic);
    if let Some(channel) = channel {
        action = action.channel(channel);
    }
    let change = ctx.client.call(action, ctx.change_options()).await?;
    report(ctx, &change, &format!("{name} installed"))
}

pub async fn remove(ctx: &Context, name: &str, purge: bool) -> Result<()> {
    let change = ctx.client.call(SnapAction::remove(name).purge(purge), ctx.change_options()).await?;
    report(ctx, &change, &format!("{name} removed"))
}

pub async fn refresh(ctx: &Context, name: &str, channel: Option<String>) -> Result<()> {
    let mut action = SnapAction::refresh(name);
    if let Some(channel) = channel {
        action = action.channel(channel);
    }
    let change = ctx.client.call(action, ctx.change_options()).await?;
    report(ctx, &change, &format!("{name} refreshed"))
}

pub async fn prefer(ctx: &Context, name: &str) -> Result<()> {
    let change = ctx.client.call(Prefer::new(name), ctx.change_options()).await?;
    report(ctx, &change, &format!("{name} aliases now take precedence"))
}

fn report(ctx: &Context, change: &Change, done: &str) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => output::print_json(change),
        OutputFormat::Text => {
            println!("{done}");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "snaps_tests.rs"]
mod tests;
