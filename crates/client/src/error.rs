// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use snapd_core::{DaemonError, EnvelopeError, ErrorKind};
use snapd_wire::FrameError;
use thiserror::Error;

/// Errors delivered to callers of [`crate::Client`].
///
/// Cloneable so one connection failure can complete every request that was
/// waiting on that connection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("cannot connect to {}: {message}", path.display())]
    Connect { path: PathBuf, message: String },

    #[error("cannot send request: {0}")]
    Write(String),

    #[error("connection to snapd lost: {0}")]
    ConnectionLost(String),

    #[error("malformed response: {0}")]
    Frame(#[from] FrameError),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Daemon(#[from] DaemonError),

    #[error("{0}")]
    ChangeFailed(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// The request never got a usable answer because its connection went
    /// away. Framing errors count too: they always tear the connection down.
    ///
    /// A change poll failing this way is retried on a new connection.
    pub fn is_connection_loss(&self) -> bool {
        matches!(self, Self::ConnectionLost(_) | Self::Write(_) | Self::Frame(_))
    }

    /// Daemon-reported error kind, if this is a daemon error.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Daemon(error) => Some(error.kind),
            _ => None,
        }
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(error: EnvelopeError) -> Self {
        Self::Protocol(error.to_string())
    }
}
