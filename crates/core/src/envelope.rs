// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The JSON envelope wrapping every `application/json` response.
//!
//! ```json
//! {"type": "sync",  "status-code": 200, "result": {...}, "maintenance": {...}}
//! {"type": "async", "status-code": 202, "change": "7"}
//! {"type": "error", "status-code": 404, "result": {"kind": "...", "message": "..."}}
//! ```

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::{DaemonError, ErrorResult};
use crate::maintenance::Maintenance;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvelopeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("missing envelope type")]
    MissingType,
    #[error("unknown envelope type {0:?}")]
    UnknownType(String),
    #[error("async response without a change id")]
    MissingChange,
}

/// A decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Sync { status_code: u16, result: Value, maintenance: Option<Maintenance> },
    Async { status_code: u16, change: String, maintenance: Option<Maintenance> },
    Error { error: DaemonError, maintenance: Option<Maintenance> },
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawEnvelope {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    change: Option<String>,
    #[serde(default)]
    maintenance: Option<Maintenance>,
}

impl Envelope {
    /// Decode an envelope. `http_status` fills in a missing `status-code`.
    pub fn parse(body: &[u8], http_status: u16) -> Result<Self, EnvelopeError> {
        let raw: RawEnvelope = serde_json::from_slice(body)
            .map_err(|e| EnvelopeError::InvalidJson(e.to_string()))?;
        let status_code = raw.status_code.unwrap_or(http_status);
        let maintenance = raw.maintenance;

        match raw.kind.as_deref() {
            Some("sync") => Ok(Self::Sync { status_code, result: raw.result, maintenance }),
            Some("async") => {
                let change = raw.change.filter(|id| !id.is_empty()).ok_or(EnvelopeError::MissingChange)?;
                Ok(Self::Async { status_code, change, maintenance })
            }
            Some("error") => {
                // A result that is not an object still yields a daemon error, just without detail.
                let result: ErrorResult = serde_json::from_value(raw.result).unwrap_or_default();
                Ok(Self::Error { error: DaemonError::from_result(result, status_code), maintenance })
            }
            Some(other) => Err(EnvelopeError::UnknownType(other.to_string())),
            None => Err(EnvelopeError::MissingType),
        }
    }

    /// Maintenance carried by a JSON body, without decoding the rest.
    ///
    /// Bodies that are not envelopes carry none.
    pub fn peek_maintenance(body: &[u8]) -> Option<Maintenance> {
        #[derive(Deserialize)]
        struct Peek {
            #[serde(default)]
            maintenance: Option<Maintenance>,
        }
        serde_json::from_slice::<Peek>(body).ok().and_then(|peek| peek.maintenance)
    }

    pub fn maintenance(&self) -> Option<&Maintenance> {
        match self {
            Self::Sync { maintenance, .. }
            | Self::Async { maintenance, .. }
            | Self::Error { maintenance, .. } => maintenance.as_ref(),
        }
    }

    /// The sync result, turning error envelopes into `Err`.
    ///
    /// Async envelopes yield `Ok(None)`.
    pub fn into_result(self) -> Result<Option<Value>, DaemonError> {
        match self {
            Self::Sync { result, .. } => Ok(Some(result)),
            Self::Async { .. } => Ok(None),
            Self::Error { error, .. } => Err(error),
        }
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
