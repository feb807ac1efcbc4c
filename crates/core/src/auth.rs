// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Macaroon credentials sent with authenticated requests.

use serde::{Deserialize, Serialize};

/// A root macaroon and its discharges, as stored in `~/.snap/auth.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    pub macaroon: String,
    #[serde(default)]
    pub discharges: Vec<String>,
}

impl AuthData {
    pub fn new(macaroon: impl Into<String>) -> Self {
        Self { macaroon: macaroon.into(), discharges: Vec::new() }
    }

    pub fn discharge(mut self, discharge: impl Into<String>) -> Self {
        self.discharges.push(discharge.into());
        self
    }

    /// Value of the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        let mut value = format!("Macaroon root=\"{}\"", self.macaroon);
        for discharge in &self.discharges {
            value.push_str(&format!(",discharge=\"{discharge}\""));
        }
        value
    }
}
