// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One journal line streamed by `GET /v2/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    pub timestamp: Option<DateTime<Utc>>,
    pub message: String,
    /// Syslog identifier, usually `snap.<snap>.<app>`.
    pub sid: String,
    pub pid: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(timestamp) = self.timestamp {
            write!(f, "{} ", timestamp.format("%Y-%m-%dT%H:%M:%SZ"))?;
        }
        write!(f, "{}[{}]: {}", self.sid, self.pid, self.message)
    }
}
