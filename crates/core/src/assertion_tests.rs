// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const ACCOUNT: &str = "type: account\n\
authority-id: canonical\n\
account-id: canonical\n\
display-name: Canonical\n\
\n\
AcLBUgQAAQoABgUCV3ZG\n\
sig-line-two";

const WITH_BODY: &str = "type: snap-declaration\n\
snap-name: hello\n\
body-length: 11\n\
\n\
hello\n\nbody\n\
\n\
SIGNATURE";

#[test]
fn parses_single_assertion() {
    let assertions = Assertion::parse_stream(ACCOUNT.as_bytes()).unwrap();

    assert_eq!(assertions.len(), 1);
    let account = &assertions[0];
    assert_eq!(account.assertion_type(), "account");
    assert_eq!(account.header("display-name"), Some("Canonical"));
    assert!(account.body.is_empty());
    assert_eq!(account.signature, "AcLBUgQAAQoABgUCV3ZG\nsig-line-two");
}

#[test]
fn body_may_contain_blank_lines() {
    let assertions = Assertion::parse_stream(WITH_BODY.as_bytes()).unwrap();

    assert_eq!(assertions[0].body, b"hello\n\nbody");
    assert_eq!(assertions[0].signature, "SIGNATURE");
}

#[test]
fn parses_stream_of_assertions() {
    let stream = format!("{ACCOUNT}\n\n{WITH_BODY}\n");
    let assertions = Assertion::parse_stream(stream.as_bytes()).unwrap();

    let types: Vec<_> = assertions.iter().map(Assertion::assertion_type).collect();
    assert_eq!(types, ["account", "snap-declaration"]);
}

#[test]
fn multi_line_header_values() {
    let text = "type: model\nsnaps:\n  - name: pc\n  - name: core\nseries: 16\n\nSIG";
    let assertions = Assertion::parse_stream(text.as_bytes()).unwrap();

    assert_eq!(assertions[0].header("snaps"), Some("- name: pc\n- name: core"));
    assert_eq!(assertions[0].header("series"), Some("16"));
}

#[test]
fn empty_stream_has_no_assertions() {
    assert_eq!(Assertion::parse_stream(b"\n").unwrap(), Vec::new());
}

#[yare::parameterized(
    unterminated     = { "type: account\nauthority-id: x",                  AssertionError::UnterminatedHeaders },
    bad_header       = { "type account\n\nSIG",                             AssertionError::InvalidHeader("type account".into()) },
    bad_body_length  = { "type: a\nbody-length: many\n\nSIG",               AssertionError::InvalidBodyLength("many".into()) },
    truncated_body   = { "type: a\nbody-length: 40\n\nshort\n\nSIG",       AssertionError::TruncatedBody },
    no_signature     = { "type: a\n\n",                                     AssertionError::MissingSignature },
)]
fn malformed_assertions(text: &str, expected: AssertionError) {
    assert_eq!(Assertion::parse_stream(text.as_bytes()).unwrap_err(), expected);
}
