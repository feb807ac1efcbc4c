// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// State of one alias of one snap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AliasStatus {
    pub command: String,
    pub status: String,
    pub manual: String,
    pub auto: String,
}

/// `GET /v2/aliases`: snap name → alias name → status, in daemon order.
pub type Aliases = IndexMap<String, IndexMap<String, AliasStatus>>;
