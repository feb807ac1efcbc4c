// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Changes: long-running daemon operations and their tasks.
//!
//! A change is what snapd hands back instead of a result when an operation
//! (install, remove, refresh, ...) runs in the background. Clients poll it
//! until `ready` is set, at which point `err` tells success from failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a change as returned by `GET /v2/changes/{id}`.
///
/// Equality is structural: two polls that return equal snapshots carry no
/// new information for progress reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Change {
    pub id: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_time: Option<DateTime<Utc>>,
    /// Failure message, set on a ready change that did not succeed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
    /// Operation-specific result payload (e.g. `snap-names`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Change {
    /// The failure message of a ready change, ignoring empty strings.
    pub fn error(&self) -> Option<&str> {
        self.err.as_deref().filter(|message| !message.is_empty())
    }

    /// Sum of task progress, as (done, total).
    pub fn progress(&self) -> (u64, u64) {
        self.tasks.iter().fold((0, 0), |(done, total), task| {
            (done + task.progress.done, total + task.progress.total)
        })
    }
}

/// One step of a change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub progress: TaskProgress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub done: u64,
    #[serde(default)]
    pub total: u64,
}

crate::builder! {
    pub struct ChangeBuilder => Change {
        into {
            id: String = "1",
            kind: String = "install-snap",
            summary: String = "Install \"hello\" snap",
            status: String = "Doing",
        }
        set {
            tasks: Vec<Task> = Vec::new(),
            ready: bool = false,
        }
        option {
            spawn_time: DateTime<Utc> = None,
            ready_time: DateTime<Utc> = None,
            err: String = None,
            data: serde_json::Value = None,
        }
    }
}

crate::builder! {
    pub struct TaskBuilder => Task {
        into {
            id: String = "10",
            kind: String = "download-snap",
            summary: String = "Download snap \"hello\"",
            status: String = "Doing",
        }
        set {
            progress: TaskProgress = TaskProgress::default(),
        }
        option {
            spawn_time: DateTime<Utc> = None,
            ready_time: DateTime<Utc> = None,
        }
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
