// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that carry a process exit code.
//!
//! Commands return errors instead of calling `std::process::exit()`;
//! `main()` maps them to a code with [`exit_code`].

use snapd_client::ClientError;
use thiserror::Error;

/// Exit code when snapd cannot be reached.
pub const EXIT_UNREACHABLE: i32 = 2;
/// Exit code for Ctrl-C, as a shell reports SIGINT.
pub const EXIT_CANCELLED: i32 = 130;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// The code `main()` exits with for `error`.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(exit) = error.downcast_ref::<ExitError>() {
        return exit.code;
    }
    match error.downcast_ref::<ClientError>() {
        Some(ClientError::Cancelled) => EXIT_CANCELLED,
        Some(ClientError::Connect { .. }) => EXIT_UNREACHABLE,
        _ => 1,
    }
}
