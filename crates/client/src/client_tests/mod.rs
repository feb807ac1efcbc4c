// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::BlockingClient;
use crate::test_support::{snap_json, FakeDaemon, FakeReply};
use serde_json::json;
use snapd_core::ErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

mod calls;
mod changes;
mod connection;

fn doing(id: &str) -> Change {
    Change::builder().id(id).status("Doing").build()
}

fn done(id: &str) -> Change {
    Change::builder().id(id).status("Done").ready(true).build()
}
