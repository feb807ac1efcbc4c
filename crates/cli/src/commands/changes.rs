// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change history and aborts.

use anyhow::Result;
use snapd_client::endpoints::{ChangeFilter, GetChanges};
use snapd_core::Change;

use super::Context;
use crate::color;
use crate::output::{self, format_time, OutputFormat, Table};

pub async fn list(ctx: &Context, snap: Option<&str>) -> Result<()> {
    let mut endpoint = GetChanges::new(ChangeFilter::All);
    if let Some(snap) = snap {
        endpoint = endpoint.snap(snap);
    }
    let mut changes = ctx.client.call(endpoint, ctx.options()).await?;
    changes.sort_by_key(|change| change.spawn_time);
    match ctx.format {
        OutputFormat::Json => output::print_json(&changes),
        OutputFormat::Text => {
            if changes.is_empty() {
                println!("No changes found");
                return Ok(());
            }
            print!("{}", changes_table(&changes).render());
            Ok(())
        }
    }
}

pub(crate) fn changes_table(changes: &[Change]) -> Table {
    let mut table = Table::new(&["ID", "Status", "Spawn", "Ready", "Summary"]);
    for change in changes {
        table.row(vec![
            change.id.clone(),
            color::status(&change.status),
            format_time(change.spawn_time),
            format_time(change.ready_time),
            change.summary.clone(),
        ]);
    }
    table
}

pub async fn show(ctx: &Context, id: &str) -> Result<()> {
    let change = ctx.client.get_change(id).await?;
    match ctx.format {
        OutputFormat::Json => output::print_json(&change),
        OutputFormat::Text => {
            print!("{}", tasks_table(&change).render());
            if let Some(error) = change.error() {
                println!("\n{error}");
            }
            Ok(())
        }
    }
}

pub(crate) fn tasks_table(change: &Change) -> Table {
    let mut table = Table::new(&["Status", "Spawn", "Ready", "Summary"]);
    for task in &change.tasks {
        table.row(vec![
            color::status(&task.status),
            format_time(task.spawn_time),
            format_time(task.ready_time),
            task.summary.clone(),
        ]);
    }
    table
}

pub async fn abort(ctx: &Context, id: &str) -> Result<()> {
    let change = ctx.client.abort_change(id).await?;
    match ctx.format {
        OutputFormat::Json => output::print_json(&change),
        OutputFormat::Text => {
            println!("Change {} ({}) is {}", change.id, change.summary, change.status);
            Ok(())
        }
    }
}
