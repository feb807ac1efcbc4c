// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! snapd-core: data model shared by the snapd client crates

pub mod macros;

pub mod alias;
pub mod assertion;
pub mod auth;
pub mod change;
pub mod envelope;
pub mod error;
pub mod log;
pub mod maintenance;
pub mod notice;
pub mod snap;
pub mod system;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use alias::{AliasStatus, Aliases};
pub use assertion::{Assertion, AssertionError, ASSERTION_CONTENT_TYPE};
pub use auth::AuthData;
#[cfg(any(test, feature = "test-support"))]
pub use change::{ChangeBuilder, TaskBuilder};
pub use change::{Change, Task, TaskProgress};
pub use envelope::{Envelope, EnvelopeError};
pub use error::{DaemonError, ErrorKind};
pub use log::LogEntry;
pub use maintenance::{Maintenance, MaintenanceKind};
pub use notice::Notice;
#[cfg(any(test, feature = "test-support"))]
pub use snap::SnapBuilder;
pub use snap::{App, Publisher, Snap};
pub use system::{OsRelease, RefreshInfo, SystemInfo};
