// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

#[test]
fn get_without_body_has_no_content_length() {
    let request = WireRequest::get("/v2/snaps");
    let encoded = text(request.encode(&Headers::new()));

    assert_eq!(encoded, "GET /v2/snaps HTTP/1.1\r\n\r\n");
}

#[test]
fn common_headers_come_first_in_order() {
    let common: Headers =
        [("Host", ""), ("Connection", "keep-alive"), ("User-Agent", "test/1")].into_iter().collect();
    let request = WireRequest::get("/v2/system-info").header("X-Custom", "yes");

    let encoded = text(request.encode(&common));
    assert_eq!(
        encoded,
        "GET /v2/system-info HTTP/1.1\r\n\
         Host: \r\n\
         Connection: keep-alive\r\n\
         User-Agent: test/1\r\n\
         X-Custom: yes\r\n\
         \r\n"
    );
}

#[test]
fn request_header_overrides_common_header() {
    let common: Headers = [("User-Agent", "default")].into_iter().collect();
    let request = WireRequest::get("/").header("user-agent", "custom");

    let encoded = text(request.encode(&common));
    assert!(encoded.contains("user-agent: custom\r\n"), "{encoded}");
    assert!(!encoded.contains("default"), "{encoded}");
}

#[test]
fn json_body_sets_type_and_length() {
    let request = WireRequest::post("/v2/snaps/hello")
        .json(&serde_json::json!({ "action": "install" }));

    let encoded = text(request.encode(&Headers::new()));
    let body = "{\n  \"action\": \"install\"\n}";
    assert!(encoded.starts_with("POST /v2/snaps/hello HTTP/1.1\r\n"));
    assert!(encoded.contains("Content-Type: application/json\r\n"));
    assert!(encoded.contains(&format!("Content-Length: {}\r\n", body.len())));
    assert!(encoded.ends_with(&format!("\r\n\r\n{body}")));
}

#[test]
fn query_is_percent_encoded() {
    let request = WireRequest::get("/v2/find").query("q", "hello world&more").query("select", "refresh");

    assert_eq!(request.target(), "/v2/find?q=hello%20world%26more&select=refresh");
}

#[test]
fn query_opt_skips_missing_values() {
    let request = WireRequest::get("/v2/changes")
        .query_opt("select", Some("all"))
        .query_opt("for", None::<String>);

    assert_eq!(request.target(), "/v2/changes?select=all");
}

#[yare::parameterized(
    unreserved = { "Az09-._~", "Az09-._~" },
    space      = { "a b",      "a%20b" },
    slash      = { "a/b",      "a%2Fb" },
    comma      = { "a,b",      "a%2Cb" },
    utf8       = { "é",        "%C3%A9" },
)]
fn component_encoding(input: &str, expected: &str) {
    assert_eq!(encode_component(input), expected);
}
