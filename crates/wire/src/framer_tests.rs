// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::*;
use crate::encode_chunked;

const SYNC_FIND: &[u8] = b"HTTP/1.1 200 OK\r\n\
Content-Type: application/json\r\n\
Content-Length: 46\r\n\
\r\n\
{\"type\":\"sync\",\"result\":[{\"name\":\"foo\"}]}    ";

fn complete(framer: &mut Framer) -> Response {
    match framer.next_event().unwrap() {
        Some(FrameEvent::Complete(response)) => response,
        other => panic!("expected a complete response, got {other:?}"),
    }
}

#[test]
fn headers_wait_for_blank_line() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n");

    assert!(framer.try_extract_headers().unwrap().is_none());
    assert_eq!(framer.buffered(), 36);

    framer.feed(b"\r\n");
    let partial = framer.try_extract_headers().unwrap().unwrap();
    assert_eq!(partial.head().status_code, 200);
    assert_eq!(partial.head().reason, "OK");
    assert_eq!(partial.head().encoding, Encoding::ContentLength(0));
    assert_eq!(framer.buffered(), 0);
}

#[test]
fn content_length_body() {
    let mut framer = Framer::new();
    framer.feed(SYNC_FIND);

    let response = complete(&mut framer);
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type(), "application/json");
    assert_eq!(response.body.len(), 46);
    assert!(framer.next_event().unwrap().is_none());
}

#[test]
fn content_length_body_across_feeds() {
    let mut framer = Framer::new();
    let mut partial = {
        framer.feed(b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nhello");
        framer.try_extract_headers().unwrap().unwrap()
    };

    assert_eq!(framer.try_extract_body(&mut partial).unwrap(), (5, false));
    framer.feed(b"worldEXTRA");
    assert_eq!(framer.try_extract_body(&mut partial).unwrap(), (5, true));
    assert_eq!(partial.body(), b"helloworld");
    assert_eq!(framer.buffered(), 5);
}

#[test]
fn chunked_body() {
    let mut raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n".to_vec();
    raw.extend(encode_chunked(b"{\"type\":\"sync\"}", 4));

    let mut framer = Framer::new();
    framer.feed(&raw);
    let response = complete(&mut framer);
    assert_eq!(response.body, b"{\"type\":\"sync\"}".to_vec());
}

#[test]
fn transfer_encoding_wins_over_content_length() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.1 200 OK\r\nContent-Length: 99\r\nTransfer-Encoding: chunked\r\n\r\n");

    let partial = framer.try_extract_headers().unwrap().unwrap();
    assert_eq!(partial.head().encoding, Encoding::Chunked);
}

#[test]
fn eof_body_completes_on_close() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.0 200 OK\r\nContent-Type: application/octet-stream\r\n\r\nabc");

    assert!(framer.next_event().unwrap().is_none());
    framer.feed(b"def");
    assert!(framer.next_event().unwrap().is_none());

    framer.close();
    let response = complete(&mut framer);
    assert_eq!(response.body, b"abcdef".to_vec());
}

#[test]
fn no_content_has_empty_body() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.1 204 No Content\r\n\r\n");

    let response = complete(&mut framer);
    assert_eq!(response.status_code, 204);
    assert!(response.body.is_empty());
}

#[test]
fn back_to_back_responses() {
    let mut framer = Framer::new();
    framer.feed(SYNC_FIND);
    framer.feed(b"HTTP/1.1 404 Not Found\r\nContent-Length: 2\r\n\r\n{}");

    assert_eq!(complete(&mut framer).status_code, 200);
    assert_eq!(complete(&mut framer).status_code, 404);
    assert!(framer.next_event().unwrap().is_none());
}

#[test]
fn close_mid_body_is_truncated() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nabc");
    framer.close();

    assert_eq!(framer.next_event(), Err(FrameError::Truncated));
}

#[test]
fn close_mid_headers_is_truncated() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.1 200 OK\r\nContent-");
    framer.close();

    assert_eq!(framer.next_event(), Err(FrameError::Truncated));
}

#[test]
fn clean_close_between_responses_is_quiet() {
    let mut framer = Framer::new();
    framer.close();

    assert_eq!(framer.next_event(), Ok(None));
}

#[yare::parameterized(
    not_http        = { "SPDY/3 200 OK" },
    http2           = { "HTTP/2 200 OK" },
    short_code      = { "HTTP/1.1 20 OK" },
    letters_in_code = { "HTTP/1.1 2x0 OK" },
    empty           = { "" },
)]
fn malformed_status_lines(line: &str) {
    let mut framer = Framer::new();
    framer.feed(format!("{line}\r\nContent-Length: 0\r\n\r\n").as_bytes());

    assert!(matches!(framer.try_extract_headers(), Err(FrameError::MalformedStatusLine(_))));
}

#[yare::parameterized(
    no_colon      = { "Content-Length 0" },
    space_in_name = { "Content Length: 0" },
    empty_name    = { ": value" },
)]
fn malformed_header_lines(line: &str) {
    let mut framer = Framer::new();
    framer.feed(format!("HTTP/1.1 200 OK\r\n{line}\r\n\r\n").as_bytes());

    assert!(matches!(framer.try_extract_headers(), Err(FrameError::MalformedHeader(_))));
}

#[test]
fn unknown_transfer_encoding_is_an_error() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: gzip\r\n\r\n");

    assert_eq!(
        framer.try_extract_headers().unwrap_err(),
        FrameError::UnknownEncoding("gzip".to_string())
    );
}

#[test]
fn invalid_content_length_is_an_error() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.1 200 OK\r\nContent-Length: ten\r\n\r\n");

    assert!(matches!(framer.try_extract_headers(), Err(FrameError::InvalidContentLength(_))));
}

#[test]
fn content_type_parameters_are_stripped() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.1 200 OK\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: 0\r\n\r\n");

    assert_eq!(complete(&mut framer).content_type(), "application/json");
}

fn json_seq_head() -> Vec<u8> {
    b"HTTP/1.1 200 OK\r\nContent-Type: application/json-seq\r\nTransfer-Encoding: chunked\r\n\r\n"
        .to_vec()
}

fn chunk(data: &[u8]) -> Vec<u8> {
    let mut out = format!("{:x}\r\n", data.len()).into_bytes();
    out.extend_from_slice(data);
    out.extend_from_slice(b"\r\n");
    out
}

#[test]
fn json_seq_records_are_delivered_before_completion() {
    let mut framer = Framer::new();
    framer.feed(&json_seq_head());
    framer.feed(&chunk(b"\x1e{\"message\":\"one\"}\n"));

    assert_eq!(
        framer.next_event().unwrap(),
        Some(FrameEvent::Records(vec![json!({ "message": "one" })]))
    );
    assert_eq!(framer.next_event().unwrap(), None);

    framer.feed(&chunk(b"\x1e{\"message\":\"two\"}\n\x1e{\"message\":\"three\"}\n"));
    assert_eq!(
        framer.next_event().unwrap(),
        Some(FrameEvent::Records(vec![json!({ "message": "two" }), json!({ "message": "three" })]))
    );

    framer.feed(b"0\r\n\r\n");
    let response = complete(&mut framer);
    assert!(response.body.is_empty());
}

#[test]
fn json_seq_record_split_across_chunks_waits() {
    let mut framer = Framer::new();
    framer.feed(&json_seq_head());
    framer.feed(&chunk(b"\x1e{\"message\":"));

    assert_eq!(framer.next_event().unwrap(), None);

    framer.feed(&chunk(b"\"late\"}\n"));
    assert_eq!(
        framer.next_event().unwrap(),
        Some(FrameEvent::Records(vec![json!({ "message": "late" })]))
    );
}

#[test]
fn json_seq_unterminated_last_record_flushes_at_end() {
    let mut framer = Framer::new();
    framer.feed(&json_seq_head());
    framer.feed(&chunk(b"\x1e{\"n\":1}"));
    assert_eq!(framer.next_event().unwrap(), None);

    framer.feed(b"0\r\n\r\n");
    assert_eq!(framer.next_event().unwrap(), Some(FrameEvent::Records(vec![json!({ "n": 1 })])));
    assert!(matches!(framer.next_event().unwrap(), Some(FrameEvent::Complete(_))));
}

#[test]
fn json_seq_invalid_record_is_an_error() {
    let mut framer = Framer::new();
    framer.feed(&json_seq_head());
    framer.feed(&chunk(b"\x1e{broken\x1e{\"n\":1}\n"));

    assert!(matches!(framer.next_event(), Err(FrameError::InvalidRecord(_))));
}

#[test]
fn json_seq_data_before_separator_is_an_error() {
    let mut framer = Framer::new();
    framer.feed(&json_seq_head());
    framer.feed(&chunk(b"junk\x1e{}\n"));

    assert!(matches!(framer.next_event(), Err(FrameError::InvalidRecord(_))));
}

#[test]
fn json_seq_with_content_length_stops_at_its_length() {
    let body = b"\x1e{\"a\":1}\n\x1e{\"b\":2}\n";
    let mut framer = Framer::new();
    framer.feed(
        format!("HTTP/1.1 200 OK\r\nContent-Type: application/json-seq\r\nContent-Length: {}\r\n\r\n", body.len())
            .as_bytes(),
    );
    framer.feed(&body[..9]);
    assert_eq!(framer.next_event().unwrap(), Some(FrameEvent::Records(vec![json!({ "a": 1 })])));
    assert_eq!(framer.next_event().unwrap(), None);

    framer.feed(&body[9..]);
    framer.feed(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\n\r\n{}");
    assert_eq!(framer.next_event().unwrap(), Some(FrameEvent::Records(vec![json!({ "b": 2 })])));
    assert!(complete(&mut framer).body.is_empty());
    assert_eq!(complete(&mut framer).body, b"{}".to_vec());
}

#[test]
fn oversized_chunk_is_an_error() {
    let mut framer = Framer::new();
    framer.feed(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\nffffffffffffffff\r\nab\r\n");

    assert!(matches!(framer.next_event(), Err(FrameError::InvalidChunk(_))));
}

#[test]
fn json_seq_callback_form() {
    let mut framer = Framer::new();
    framer.feed(&json_seq_head());
    framer.feed(&chunk(b"\x1e1\n\x1e\n\x1e2\n"));
    framer.feed(b"0\r\n\r\n");

    let mut partial = framer.try_extract_headers().unwrap().unwrap();
    framer.try_extract_body(&mut partial).unwrap();

    let mut seen = Vec::new();
    let done = partial.try_extract_json_seq_records(|record| seen.push(record)).unwrap();
    assert!(done);
    assert_eq!(seen, vec![json!(1), json!(2)]);
}
