// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Result of `GET /v2/system-info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SystemInfo {
    pub series: String,
    pub version: String,
    pub build_id: String,
    pub os_release: OsRelease,
    pub on_classic: bool,
    pub managed: bool,
    pub kernel_version: String,
    pub architecture: String,
    pub confinement: String,
    pub refresh: RefreshInfo,
    pub sandbox_features: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OsRelease {
    pub id: String,
    pub version_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RefreshInfo {
    pub timer: String,
    pub schedule: String,
    pub last: String,
    pub next: String,
    pub hold: String,
}
