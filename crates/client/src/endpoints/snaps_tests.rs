// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use snapd_wire::Method;

#[yare::parameterized(
    query         = { FindSnaps::query("foo"),                              "/v2/find?q=foo" },
    name          = { FindSnaps::name("hello"),                             "/v2/find?name=hello" },
    section       = { FindSnaps::query("chat").section("social"),           "/v2/find?q=chat&section=social" },
    refresh       = { FindSnaps::default().select("refresh"),               "/v2/find?select=refresh" },
    escaped       = { FindSnaps::query("a b&c"),                            "/v2/find?q=a%20b%26c" },
)]
fn find_targets(endpoint: FindSnaps, target: &str) {
    assert_eq!(endpoint.request().target(), target);
}

#[yare::parameterized(
    all_snaps  = { ListSnaps::new(),                                  "/v2/snaps" },
    named      = { ListSnaps::new().names(["core", "hello"]),         "/v2/snaps?snaps=core%2Chello" },
    revisions  = { ListSnaps::new().all_revisions(true),              "/v2/snaps?select=all" },
)]
fn list_targets(endpoint: ListSnaps, target: &str) {
    assert_eq!(endpoint.request().target(), target);
}

#[test]
fn install_posts_action_body() {
    let request = SnapAction::install("hello").channel("beta").classic(true).request();

    assert_eq!(request.method(), Method::Post);
    assert_eq!(request.target(), "/v2/snaps/hello");
    assert_eq!(request.headers().get("Content-Type"), Some("application/json"));
    let body: Value = serde_json::from_slice(request.body_bytes().unwrap()).unwrap();
    assert_eq!(body, json!({"action": "install", "channel": "beta", "classic": true}));
}

#[test]
fn remove_with_purge() {
    let request = SnapAction::remove("hello").purge(true).request();
    let body: Value = serde_json::from_slice(request.body_bytes().unwrap()).unwrap();

    assert_eq!(body, json!({"action": "remove", "purge": true}));
}

#[test]
fn snap_action_result_is_the_change() {
    let endpoint = SnapAction::refresh("hello");
    let change = Change::builder().id("9").ready(true).build();

    assert!(endpoint.produces_change());
    assert_eq!(endpoint.parse_change(&change).unwrap(), change);
}

#[test]
fn get_snap_escapes_name() {
    assert_eq!(GetSnap::new("a/b").request().target(), "/v2/snaps/a%2Fb");
}
