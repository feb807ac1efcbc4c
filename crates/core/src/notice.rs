// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An aggregated event recorded by the daemon (`GET /v2/notices`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Notice {
    pub id: String,
    pub user_id: Option<u32>,
    #[serde(rename = "type")]
    pub notice_type: String,
    pub key: String,
    pub first_occurred: Option<DateTime<Utc>>,
    pub last_occurred: Option<DateTime<Utc>>,
    pub last_repeated: Option<DateTime<Utc>>,
    pub occurrences: u64,
    pub last_data: IndexMap<String, String>,
    pub repeat_after: Option<String>,
    pub expire_after: Option<String>,
}
