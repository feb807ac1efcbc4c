// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `list`, `info`, `find` and the snap actions.

use crate::prelude::*;

fn downloading(done: u64) -> Change {
    let progress = TaskProgress { label: "hello".into(), done, total: 100 };
    let task = Task::builder().status("Doing").summary("Download snap \"hello\"").progress(progress).build();
    Change::builder().id("3").tasks(vec![task]).build()
}

fn finished() -> Change {
    let task = Task::builder().status("Done").summary("Download snap \"hello\"").build();
    Change::builder().id("3").status("Done").ready(true).tasks(vec![task]).build()
}

#[test]
fn list_prints_a_table() {
    let daemon = Daemon::start();
    daemon.on(
        "GET",
        "/v2/snaps",
        FakeReply::sync(json!([
            {"name": "core22", "version": "20240111", "revision": "1122", "type": "base", "developer": "canonical"},
            {"name": "hello", "version": "2.10", "revision": "38", "type": "app", "tracking-channel": "latest/stable",
             "publisher": {"display-name": "Canonical"}},
        ])),
    );

    daemon.cli().args(&["list"]).passes().stdout_eq(
        "Name    Version   Rev   Tracking       Publisher  Notes\n\
         core22  20240111  1122  -              canonical  base\n\
         hello   2.10      38    latest/stable  Canonical  -\n",
    );
}

#[test]
fn list_as_json() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/snaps", FakeReply::sync(json!([snap_json("hello")])));

    let run = daemon.cli().args(&["list", "--format", "json"]).passes();
    run.stdout_lacks("Version");

    let snaps: serde_json::Value = serde_json::from_str(run.stdout()).unwrap();
    assert_eq!(snaps[0]["name"], "hello");
}

#[test]
fn empty_list_says_so() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/snaps", FakeReply::sync(json!([])));

    daemon.cli().args(&["list"]).passes().stdout_has("No snaps are installed yet.");
}

#[test]
fn info_shows_details() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/snaps/hello", FakeReply::sync(snap_json("hello")));

    daemon.cli().args(&["info", "hello"]).passes().stdout_has("name:      hello\n").stdout_has("version:   1.0 (1)");
}

#[test]
fn info_of_missing_snap_fails_with_daemon_message() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/snaps/nope", FakeReply::error(404, "snap-not-found", "snap \"nope\" not found"));

    daemon.cli().args(&["info", "nope"]).fails().code(1).stderr_has("snap \"nope\" not found");
}

#[test]
fn find_by_exact_name() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/find", FakeReply::sync(json!([snap_json("hello")])).chunked(16));

    daemon.cli().args(&["find", "hello", "--name"]).passes().stdout_has("The hello snap");

    assert_eq!(daemon.requests()[0].target, "/v2/find?name=hello");
}

#[test]
fn install_prints_progress_then_result() {
    let daemon = Daemon::start();
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("3"))
        .on("GET", "/v2/changes/3", FakeReply::change(&downloading(40)))
        .on("GET", "/v2/changes/3", FakeReply::change(&downloading(40)))
        .on("GET", "/v2/changes/3", FakeReply::change(&finished()));

    daemon
        .cli()
        .args(&["install", "hello", "--channel", "edge"])
        .passes()
        .stdout_eq("Doing hello 40%\nDone Download snap \"hello\"\nhello installed\n");

    assert_eq!(daemon.requests()[0].json(), json!({"action": "install", "channel": "edge"}));
    assert_eq!(daemon.count("GET", "/v2/changes/3"), 3);
}

#[test]
fn failed_install_exits_non_zero() {
    let daemon = Daemon::start();
    let failed = Change::builder().id("4").status("Error").ready(true).err("cannot install \"hello\": boom").build();
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("4"))
        .on("GET", "/v2/changes/4", FakeReply::change(&failed));

    daemon.cli().args(&["install", "hello"]).fails().code(1).stderr_has("cannot install \"hello\": boom");
}

#[test]
fn remove_with_purge() {
    let daemon = Daemon::start();
    daemon
        .on("POST", "/v2/snaps/hello", FakeReply::change_started("5"))
        .on("GET", "/v2/changes/5", FakeReply::change(&Change::builder().id("5").status("Done").ready(true).build()));

    daemon.cli().args(&["remove", "hello", "--purge", "--format", "json"]).passes().stdout_has("\"status\": \"Done\"");

    assert_eq!(daemon.requests()[0].json(), json!({"action": "remove", "purge": true}));
}

#[test]
fn prefer_posts_to_aliases() {
    let daemon = Daemon::start();
    daemon
        .on("POST", "/v2/aliases", FakeReply::change_started("6"))
        .on("GET", "/v2/changes/6", FakeReply::change(&Change::builder().id("6").status("Done").ready(true).build()));

    daemon.cli().args(&["prefer", "hello"]).passes().stdout_has("hello aliases now take precedence");

    assert_eq!(daemon.requests()[0].json()["action"], "prefer");
}

#[test]
fn unreachable_daemon_exits_with_code_two() {
    cli().args(&["--socket", "/nonexistent/snapd.socket", "list"]).fails().code(2).stderr_has("cannot connect");
}
