// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors reported by the daemon in `{"type": "error"}` responses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable classification of daemon-reported errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Failed,
    BadRequest,
    PermissionDenied,
    AuthDataRequired,
    AuthDataInvalid,
    TwoFactorRequired,
    TwoFactorInvalid,
    TermsNotAccepted,
    PaymentNotSetup,
    PaymentDeclined,
    AlreadyInstalled,
    NotInstalled,
    NoUpdateAvailable,
    PasswordPolicyError,
    NeedsDevmode,
    NeedsClassic,
    NeedsClassicSystem,
    NotFound,
    BadQuery,
    NetworkTimeout,
    RevisionNotAvailable,
    ChannelNotAvailable,
    ArchitectureNotAvailable,
    ChangeConflict,
    DnsFailure,
    OptionNotFound,
    AuthCancelled,
    InterfacesUnchanged,
    NotASnap,
    SnapLocal,
}

crate::str_enum! {
    ErrorKind {
        Failed => "failed",
        BadRequest => "bad-request",
        PermissionDenied => "permission-denied",
        AuthDataRequired => "login-required",
        AuthDataInvalid => "invalid-auth-data",
        TwoFactorRequired => "two-factor-required",
        TwoFactorInvalid => "two-factor-failed",
        TermsNotAccepted => "terms-not-accepted",
        PaymentNotSetup => "no-payment-methods",
        PaymentDeclined => "payment-declined",
        AlreadyInstalled => "snap-already-installed",
        NotInstalled => "snap-not-installed",
        NoUpdateAvailable => "snap-no-update-available",
        PasswordPolicyError => "password-policy",
        NeedsDevmode => "snap-needs-devmode",
        NeedsClassic => "snap-needs-classic",
        NeedsClassicSystem => "snap-needs-classic-system",
        NotFound => "snap-not-found",
        BadQuery => "bad-query",
        NetworkTimeout => "network-timeout",
        RevisionNotAvailable => "snap-revision-not-available",
        ChannelNotAvailable => "snap-channel-not-available",
        ArchitectureNotAvailable => "snap-architecture-not-available",
        ChangeConflict => "snap-change-conflict",
        DnsFailure => "dns-failure",
        OptionNotFound => "option-not-found",
        AuthCancelled => "auth-cancelled",
        InterfacesUnchanged => "interfaces-unchanged",
        NotASnap => "not-snap",
        SnapLocal => "snap-local",
    }
}

impl ErrorKind {
    /// Classify a daemon error from its `kind` field, falling back to the
    /// HTTP status code when the kind is missing or unknown.
    pub fn classify(kind: Option<&str>, status_code: u16) -> Self {
        let named = kind.and_then(|kind| match kind {
            "app-not-found" => Some(Self::NotFound),
            "bad-request" | "failed" | "permission-denied" => None,
            other => Self::parse(other),
        });
        named.unwrap_or(match status_code {
            400 => Self::BadRequest,
            401 => Self::AuthDataRequired,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            _ => Self::Failed,
        })
    }
}

/// An error response from snapd.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct DaemonError {
    pub kind: ErrorKind,
    pub message: String,
    pub status_code: u16,
    /// Raw `kind` string as sent by the daemon, if any.
    pub raw_kind: Option<String>,
    /// Extra structured detail (`result.value`).
    pub value: Option<serde_json::Value>,
}

/// The `result` object of an error envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ErrorResult {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl DaemonError {
    pub(crate) fn from_result(result: ErrorResult, status_code: u16) -> Self {
        let kind = ErrorKind::classify(result.kind.as_deref(), status_code);
        Self { kind, message: result.message, status_code, raw_kind: result.kind, value: result.value }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
