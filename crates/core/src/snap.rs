// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snap metadata as returned by `/v2/snaps` and `/v2/find`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Snap {
    pub id: String,
    pub name: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub version: String,
    pub revision: String,
    pub channel: String,
    pub tracking_channel: String,
    pub confinement: String,
    #[serde(rename = "type")]
    pub snap_type: String,
    pub status: String,
    pub base: String,
    pub license: String,
    pub developer: String,
    pub publisher: Option<Publisher>,
    pub installed_size: u64,
    pub download_size: u64,
    pub install_date: Option<DateTime<Utc>>,
    pub devmode: bool,
    pub jailmode: bool,
    pub trymode: bool,
    pub private: bool,
    pub apps: Vec<App>,
}

impl Snap {
    pub fn is_installed(&self) -> bool {
        matches!(self.status.as_str(), "installed" | "active")
    }

    /// Publisher display name, falling back to the developer account.
    pub fn publisher_name(&self) -> &str {
        match &self.publisher {
            Some(publisher) if !publisher.display_name.is_empty() => &publisher.display_name,
            Some(publisher) if !publisher.username.is_empty() => &publisher.username,
            _ => &self.developer,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Publisher {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub validation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct App {
    pub snap: String,
    pub name: String,
    pub desktop_file: String,
    pub daemon: String,
    pub enabled: bool,
    pub active: bool,
    pub common_id: String,
}

crate::builder! {
    pub struct SnapBuilder => Snap {
        into {
            id: String = "",
            name: String = "hello",
            title: String = "",
            summary: String = "The hello snap",
            description: String = "",
            version: String = "2.10",
            revision: String = "38",
            channel: String = "stable",
            tracking_channel: String = "",
            confinement: String = "strict",
            snap_type: String = "app",
            status: String = "active",
            base: String = "",
            license: String = "",
            developer: String = "canonical",
        }
        set {
            installed_size: u64 = 0,
            download_size: u64 = 0,
            devmode: bool = false,
            jailmode: bool = false,
            trymode: bool = false,
            private: bool = false,
            apps: Vec<App> = Vec::new(),
        }
        option {
            publisher: Publisher = None,
            install_date: DateTime<Utc> = None,
        }
    }
}

#[cfg(test)]
#[path = "snap_tests.rs"]
mod tests;
