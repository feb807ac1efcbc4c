// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;
use snapd_core::Change;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Left-aligned columns separated by two spaces. The last column is not
/// padded.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self { headers: headers.to_vec(), rows: Vec::new() }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        let mut out = render_line(&header, &widths);
        out = crate::color::header(&out);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&render_line(row, &widths));
            out.push('\n');
        }
        out
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    let line: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(cell.chars().count());
            if i == last {
                cell.clone()
            } else {
                format!("{cell}{}", " ".repeat(pad))
            }
        })
        .collect();
    line.join("  ")
}

/// One-line progress summary of a change: the first task still running,
/// with its byte/step counter when it has one.
pub fn progress_line(change: &Change) -> String {
    let Some(task) = change.tasks.iter().find(|t| t.status == "Doing").or(change.tasks.last()) else {
        return format!("{} {}", crate::color::status(&change.status), change.summary);
    };
    let label = if task.progress.label.is_empty() { &task.summary } else { &task.progress.label };
    if task.progress.total > 1 {
        let percent = task.progress.done * 100 / task.progress.total;
        format!("{} {} {percent}%", crate::color::status(&task.status), label)
    } else {
        format!("{} {}", crate::color::status(&task.status), label)
    }
}

/// `2024-05-01 10:00` for present times, `-` otherwise.
pub fn format_time(time: Option<chrono::DateTime<chrono::Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_else(|| "-".to_string())
}

/// Empty strings render as `-`.
pub fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
