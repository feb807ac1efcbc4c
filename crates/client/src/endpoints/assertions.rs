// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/v2/assertions`, exchanged in the assertion text format.

use serde_json::Value;
use snapd_core::{Assertion, ASSERTION_CONTENT_TYPE};
use snapd_wire::{encode_component, Response, WireRequest};

use crate::endpoint::{parse_envelope, parse_sync, Endpoint, Reply};
use crate::error::ClientError;

/// `GET /v2/assertions/{type}`, optionally filtered by header values.
#[derive(Debug, Clone)]
pub struct GetAssertions {
    assertion_type: String,
    filters: Vec<(String, String)>,
}

impl GetAssertions {
    pub fn new(assertion_type: impl Into<String>) -> Self {
        Self { assertion_type: assertion_type.into(), filters: Vec::new() }
    }

    /// Only assertions whose `header` equals `value`.
    pub fn filter(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((header.into(), value.into()));
        self
    }
}

impl Endpoint for GetAssertions {
    type Output = Vec<Assertion>;

    fn request(&self) -> WireRequest {
        let request = WireRequest::get(format!("/v2/assertions/{}", encode_component(&self.assertion_type)));
        self.filters.iter().fold(request, |request, (header, value)| request.query(header, value))
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        if response.status_code == 200 && response.content_type().eq_ignore_ascii_case(ASSERTION_CONTENT_TYPE) {
            return Assertion::parse_stream(&response.body)
                .map(Reply::Ready)
                .map_err(|e| ClientError::Protocol(e.to_string()));
        }
        parse_envelope(response)?;
        Err(ClientError::UnexpectedResponse("expected an assertion stream".into()))
    }
}

/// `POST /v2/assertions`: add signed assertions to the system database.
#[derive(Debug, Clone)]
pub struct AddAssertions {
    content: Vec<u8>,
}

impl AddAssertions {
    /// `content` is one or more encoded assertions.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self { content: content.into() }
    }
}

impl Endpoint for AddAssertions {
    type Output = ();

    fn request(&self) -> WireRequest {
        WireRequest::post("/v2/assertions").body(ASSERTION_CONTENT_TYPE, self.content.clone())
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_sync::<Value>(response).map(|_| Reply::Ready(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapd_core::test_support::error_body;
    use snapd_core::ErrorKind;
    use snapd_wire::Headers;

    fn response(status_code: u16, content_type: &str, body: &[u8]) -> Response {
        let headers = [("Content-Type", content_type)].into_iter().collect::<Headers>();
        Response { status_code, reason: String::new(), headers, body: body.to_vec() }
    }

    #[test]
    fn filters_become_query() {
        let request = GetAssertions::new("account").filter("username", "jdoe").request();
        assert_eq!(request.target(), "/v2/assertions/account?username=jdoe");
    }

    #[test]
    fn parses_assertion_stream() {
        let body = b"type: account\naccount-id: a\n\nSIG1\n\ntype: account\naccount-id: b\n\nSIG2\n";
        let reply = GetAssertions::new("account").parse(&response(200, ASSERTION_CONTENT_TYPE, body)).unwrap();

        let Reply::Ready(assertions) = reply else { panic!("expected assertions") };
        let ids: Vec<_> = assertions.iter().filter_map(|a| a.header("account-id")).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn json_error_instead_of_stream() {
        let body = error_body(400, "bad-query", "invalid type");
        let error = GetAssertions::new("nope").parse(&response(400, "application/json", &body)).unwrap_err();

        assert_eq!(error.kind(), Some(ErrorKind::BadQuery));
    }

    #[test]
    fn add_sends_raw_assertions() {
        let request = AddAssertions::new(b"type: account\n\nSIG".to_vec()).request();

        assert_eq!(request.headers().get("content-type"), Some(ASSERTION_CONTENT_TYPE));
        assert_eq!(request.body_bytes(), Some(b"type: account\n\nSIG".as_slice()));
    }
}
