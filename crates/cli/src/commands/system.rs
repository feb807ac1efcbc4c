// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Version, assertions and notices.

use anyhow::{bail, Result};
use serde_json::json;
use snapd_client::endpoints::{GetAssertions, GetNotices};
use snapd_client::ClientError;
use snapd_core::{Assertion, SystemInfo};

use super::Context;
use crate::output::{self, format_time, OutputFormat, Table};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SNAPC_GIT_HASH"), ")");

/// Client version always; daemon details when snapd answers.
pub async fn version(ctx: &Context) -> Result<()> {
    let info = match ctx.client.system_info().await {
        Ok(info) => Some(info),
        Err(ClientError::Connect { .. }) => None,
        Err(e) => return Err(e.into()),
    };
    match ctx.format {
        OutputFormat::Json => output::print_json(&json!({"snapc": VERSION, "snapd": info})),
        OutputFormat::Text => {
            print!("{}", version_text(info.as_ref()));
            Ok(())
        }
    }
}

fn version_text(info: Option<&SystemInfo>) -> String {
    let mut rows = vec![("snapc", VERSION.to_string())];
    match info {
        Some(info) => {
            rows.push(("snapd", info.version.clone()));
            rows.push(("series", info.series.clone()));
            if !info.os_release.id.is_empty() {
                rows.push(("os", format!("{} {}", info.os_release.id, info.os_release.version_id).trim().to_string()));
            }
            if !info.kernel_version.is_empty() {
                rows.push(("kernel", info.kernel_version.clone()));
            }
        }
        None => rows.push(("snapd", "unavailable".to_string())),
    }
    rows.iter().map(|(key, value)| format!("{key:<8} {value}\n")).collect()
}

pub async fn known(ctx: &Context, assertion_type: &str, filters: &[String]) -> Result<()> {
    let mut endpoint = GetAssertions::new(assertion_type);
    for filter in filters {
        let Some((header, value)) = filter.split_once('=') else {
            bail!("invalid filter {filter:?}, expected header=value");
        };
        endpoint = endpoint.filter(header, value);
    }
    let assertions = ctx.client.call(endpoint, ctx.options()).await?;
    match ctx.format {
        OutputFormat::Json => {
            let headers: Vec<_> = assertions.iter().map(|a| &a.headers).collect();
            output::print_json(&headers)
        }
        OutputFormat::Text => {
            let rendered: Vec<String> = assertions.iter().map(render_assertion).collect();
            print!("{}", rendered.join("\n"));
            Ok(())
        }
    }
}

/// Headers, body and signature in the daemon's text encoding.
fn render_assertion(assertion: &Assertion) -> String {
    let mut out = String::new();
    for (name, value) in &assertion.headers {
        if value.contains('\n') {
            out.push_str(&format!("{name}:\n"));
            for line in value.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        } else {
            out.push_str(&format!("{name}: {value}\n"));
        }
    }
    if !assertion.body.is_empty() {
        out.push('\n');
        out.push_str(&String::from_utf8_lossy(&assertion.body));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&assertion.signature);
    out.push('\n');
    out
}

pub async fn notices(ctx: &Context) -> Result<()> {
    let notices = ctx.client.notices(GetNotices::new()).await?;
    match ctx.format {
        OutputFormat::Json => output::print_json(&notices),
        OutputFormat::Text => {
            if notices.is_empty() {
                println!("No notices");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "Type", "Key", "Last", "Count"]);
            for notice in &notices {
                table.row(vec![
                    notice.id.clone(),
                    notice.notice_type.clone(),
                    notice.key.clone(),
                    format_time(notice.last_occurred),
                    notice.occurrences.to_string(),
                ]);
            }
            print!("{}", table.render());
            Ok(())
        }
    }
}
