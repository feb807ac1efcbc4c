// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use serde_json::{json, Value};

use crate::change::Change;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for change snapshots.
pub mod strategies {
    use crate::change::{Change, Task, TaskProgress};
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = String> {
        prop_oneof![Just("Do"), Just("Doing"), Just("Done"), Just("Error"), Just("Hold"), Just("Undone")]
            .prop_map(String::from)
    }

    pub fn arb_task() -> impl Strategy<Value = Task> {
        ("[0-9]{1,3}", arb_status(), 0u64..100, 0u64..100).prop_map(|(id, status, done, total)| {
            Task::builder().id(id).status(status).progress(TaskProgress { label: String::new(), done, total }).build()
        })
    }

    pub fn arb_change() -> impl Strategy<Value = Change> {
        (arb_status(), proptest::collection::vec(arb_task(), 0..4), any::<bool>())
            .prop_map(|(status, tasks, ready)| Change::builder().status(status).tasks(tasks).ready(ready).build())
    }
}

// ── Envelope bodies ─────────────────────────────────────────────────────

pub fn sync_body(result: Value) -> Vec<u8> {
    json!({"type": "sync", "status-code": 200, "status": "OK", "result": result}).to_string().into_bytes()
}

pub fn async_body(change: &str) -> Vec<u8> {
    json!({"type": "async", "status-code": 202, "status": "Accepted", "change": change}).to_string().into_bytes()
}

pub fn error_body(status_code: u16, kind: &str, message: &str) -> Vec<u8> {
    json!({
        "type": "error",
        "status-code": status_code,
        "result": {"kind": kind, "message": message},
    })
    .to_string()
    .into_bytes()
}

/// Sync envelope wrapping a change snapshot, as served by `/v2/changes/{id}`.
pub fn change_body(change: &Change) -> Vec<u8> {
    sync_body(serde_json::to_value(change).unwrap_or_default())
}
