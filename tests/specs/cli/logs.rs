// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `logs` over the json-seq stream.

use crate::prelude::*;

fn entry(message: &str) -> serde_json::Value {
    json!({"timestamp": "2024-05-01T10:00:00Z", "message": message, "sid": "snap.hello.hello", "pid": "42"})
}

#[test]
fn logs_print_one_line_per_entry() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/logs", FakeReply::json_seq(vec![entry("started"), entry("listening")]));

    daemon.cli().args(&["logs", "hello", "-n", "2"]).passes().stdout_eq(
        "2024-05-01T10:00:00Z snap.hello.hello[42]: started\n\
         2024-05-01T10:00:00Z snap.hello.hello[42]: listening\n",
    );

    assert_eq!(daemon.requests()[0].target, "/v2/logs?names=hello&n=2");
}

#[test]
fn logs_as_json_lines() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/logs", FakeReply::json_seq(vec![entry("started")]));

    let run = daemon.cli().args(&["logs", "--format", "json"]).passes();

    let line: serde_json::Value = serde_json::from_str(run.stdout().trim()).unwrap();
    assert_eq!(line["message"], "started");
}

#[test]
fn logs_error_envelope_fails() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/logs", FakeReply::error(404, "app-not-found", "snap \"nope\" has no services"));

    daemon.cli().args(&["logs", "nope"]).fails().stderr_has("has no services");
}
