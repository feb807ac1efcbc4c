// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `changes`, `change` and `abort`.

use crate::prelude::*;

#[test]
fn changes_for_a_snap() {
    let daemon = Daemon::start();
    let change = json!({
        "id": "12", "kind": "install-snap", "summary": "Install \"hello\" snap", "status": "Done", "ready": true,
        "spawn-time": "2024-05-01T10:00:00Z", "ready-time": "2024-05-01T10:02:00Z",
    });
    daemon.on("GET", "/v2/changes", FakeReply::sync(json!([change])));

    daemon.cli().args(&["changes", "hello"]).passes().stdout_eq(
        "ID  Status  Spawn             Ready             Summary\n\
         12  Done    2024-05-01 10:00  2024-05-01 10:02  Install \"hello\" snap\n",
    );

    assert_eq!(daemon.requests()[0].target, "/v2/changes?select=all&for=hello");
}

#[test]
fn no_changes() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/changes", FakeReply::sync(json!([])));

    daemon.cli().args(&["changes"]).passes().stdout_eq("No changes found\n");
}

#[test]
fn change_shows_tasks_and_error() {
    let daemon = Daemon::start();
    let change = Change::builder()
        .id("9")
        .status("Error")
        .ready(true)
        .err("cannot install \"hello\": no space left")
        .tasks(vec![
            Task::builder().status("Done").summary("Download snap").build(),
            Task::builder().status("Error").summary("Mount snap").build(),
        ])
        .build();
    daemon.on("GET", "/v2/changes/9", FakeReply::change(&change));

    daemon
        .cli()
        .args(&["change", "9"])
        .passes()
        .stdout_has("Done    -      -      Download snap\n")
        .stdout_has("Error   -      -      Mount snap\n")
        .stdout_has("no space left");
}

#[test]
fn abort_posts_the_abort_action() {
    let daemon = Daemon::start();
    let change = Change::builder().id("9").status("Hold").summary("Install \"hello\" snap").build();
    daemon.on("POST", "/v2/changes/9", FakeReply::change(&change));

    daemon.cli().args(&["abort", "9"]).passes().stdout_has("Change 9 (Install \"hello\" snap) is Hold");

    assert_eq!(daemon.requests()[0].json(), json!({"action": "abort"}));
}

#[test]
fn abort_of_ready_change_reports_daemon_error() {
    let daemon = Daemon::start();
    daemon.on("POST", "/v2/changes/9", FakeReply::error(400, "", "cannot abort change 9 with nothing pending"));

    daemon.cli().args(&["abort", "9"]).fails().code(1).stderr_has("nothing pending");
}
