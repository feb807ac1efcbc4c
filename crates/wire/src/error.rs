// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Fatal framing errors. Any of these leaves the byte stream in an unknown
/// state, so the connection that produced it must be discarded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),

    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    #[error("invalid content length: {0:?}")]
    InvalidContentLength(String),

    #[error("unsupported transfer encoding: {0}")]
    UnknownEncoding(String),

    #[error("invalid chunk framing: {0}")]
    InvalidChunk(String),

    #[error("invalid json-seq record: {0}")]
    InvalidRecord(String),

    #[error("connection closed before the response was complete")]
    Truncated,
}
