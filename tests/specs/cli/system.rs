// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `version`, `known` and `notices`.

use crate::prelude::*;

#[test]
fn version_reports_daemon() {
    let daemon = Daemon::start();
    daemon.on(
        "GET",
        "/v2/system-info",
        FakeReply::sync(json!({"series": "16", "version": "2.61.3", "os-release": {"id": "ubuntu", "version-id": "24.04"}})),
    );

    daemon
        .cli()
        .args(&["version"])
        .passes()
        .stdout_has("snapc    0.2")
        .stdout_has("snapd    2.61.3\n")
        .stdout_has("os       ubuntu 24.04\n");
}

#[test]
fn version_without_daemon_still_passes() {
    cli().args(&["--socket", "/nonexistent/snapd.socket", "version"]).passes().stdout_has("snapd    unavailable");
}

#[test]
fn version_sends_common_headers() {
    let daemon = Daemon::start();
    daemon.on("GET", "/v2/system-info", FakeReply::sync(json!({})));

    daemon.cli().args(&["version"]).env("LANG", "de_DE.UTF-8").passes();

    let headers = &daemon.requests()[0].headers;
    assert!(headers.get("User-Agent").is_some_and(|ua| ua.starts_with("snapd-client/")));
    assert_eq!(headers.get("Accept-Language"), Some("de-de, de;q=0.9"));
    assert_eq!(headers.get("X-Allow-Interaction"), Some("true"));
}

#[test]
fn known_prints_assertions() {
    let daemon = Daemon::start();
    let stream = "type: account\naccount-id: abc\ndisplay-name: Example\n\nSIGNATURE\n";
    daemon.on("GET", "/v2/assertions/account", FakeReply::raw(200, "application/x.ubuntu.assertion", stream));

    daemon
        .cli()
        .args(&["known", "account", "account-id=abc"])
        .passes()
        .stdout_eq("type: account\naccount-id: abc\ndisplay-name: Example\n\nSIGNATURE\n");

    assert_eq!(daemon.requests()[0].target, "/v2/assertions/account?account-id=abc");
}

#[test]
fn known_rejects_malformed_filter() {
    cli().args(&["known", "account", "nonsense"]).fails().code(1).stderr_has("expected header=value");
}

#[test]
fn notices_table() {
    let daemon = Daemon::start();
    daemon.on(
        "GET",
        "/v2/notices",
        FakeReply::sync(json!([
            {"id": "1", "type": "change-update", "key": "7", "last-occurred": "2024-05-01T10:00:00Z", "occurrences": 3},
        ])),
    );

    daemon.cli().args(&["notices"]).passes().stdout_eq(
        "ID  Type           Key  Last              Count\n\
         1   change-update  7    2024-05-01 10:00  3\n",
    );
}
