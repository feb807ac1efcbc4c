// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-wide maintenance notices piggybacked on responses.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaintenanceKind {
    Unknown,
    DaemonRestart,
    SystemRestart,
}

crate::str_enum! {
    MaintenanceKind {
        Unknown => "unknown",
        DaemonRestart => "daemon-restart",
        SystemRestart => "system-restart",
    }
}

impl Serialize for MaintenanceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MaintenanceKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name).unwrap_or(Self::Unknown))
    }
}

/// Pending daemon or system restart announced by snapd.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintenance {
    #[serde(default = "unknown_kind")]
    pub kind: MaintenanceKind,
    #[serde(default)]
    pub message: String,
}

fn unknown_kind() -> MaintenanceKind {
    MaintenanceKind::Unknown
}
