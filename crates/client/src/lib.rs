// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! snapd-client: talk to snapd over its Unix socket.
//!
//! Every call shares one keep-alive connection. Operations the daemon runs
//! in the background return a change, which the client polls until it is
//! ready, reporting progress along the way.

mod blocking;
mod change;
mod client;
mod config;
pub mod endpoint;
pub mod endpoints;
pub mod env;
mod error;
mod language;
mod registry;
mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use blocking::BlockingClient;
pub use change::{ChangeTracker, Outcome};
pub use client::Client;
pub use config::{CallOptions, ClientConfig, ProgressFn};
pub use endpoint::{Endpoint, Reply};
pub use error::ClientError;
pub use language::accept_language;
pub use tokio_util::sync::CancellationToken;
