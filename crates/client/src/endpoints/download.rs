// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::{json, Map, Value};
use snapd_wire::{Response, WireRequest};

use crate::endpoint::{parse_envelope, Endpoint, Reply};
use crate::error::ClientError;

const OCTET_STREAM: &str = "application/octet-stream";

/// A snap file fetched through the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedSnap {
    /// File name suggested by `Content-Disposition`, if any.
    pub filename: Option<String>,
    pub data: Vec<u8>,
}

/// `POST /v2/download`
#[derive(Debug, Clone)]
pub struct DownloadSnap {
    name: String,
    channel: Option<String>,
    revision: Option<String>,
}

impl DownloadSnap {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), channel: None, revision: None }
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }
}

impl Endpoint for DownloadSnap {
    type Output = DownloadedSnap;

    fn request(&self) -> WireRequest {
        let mut options = Map::new();
        if let Some(channel) = &self.channel {
            options.insert("channel".into(), json!(channel));
        }
        if let Some(revision) = &self.revision {
            options.insert("revision".into(), json!(revision));
        }
        let mut body = json!({"action": "download", "snap-names": [self.name]});
        if !options.is_empty() {
            body["options"] = Value::Object(options);
        }
        WireRequest::post("/v2/download").json(&body)
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        if response.status_code == 200 && response.content_type().eq_ignore_ascii_case(OCTET_STREAM) {
            let filename = response.headers.get("Content-Disposition").and_then(disposition_filename);
            return Ok(Reply::Ready(DownloadedSnap { filename, data: response.body.clone() }));
        }
        parse_envelope(response)?;
        Err(ClientError::UnexpectedResponse("expected snap file contents".into()))
    }
}

/// `attachment; filename=hello_38.snap` → `hello_38.snap`
fn disposition_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .filter_map(|part| part.trim().strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .find(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapd_wire::Headers;

    #[test]
    fn download_body() {
        let request = DownloadSnap::new("hello").channel("edge").request();
        let body: Value = serde_json::from_slice(request.body_bytes().unwrap()).unwrap();

        assert_eq!(body, json!({"action": "download", "snap-names": ["hello"], "options": {"channel": "edge"}}));
    }

    #[test]
    fn raw_body_and_filename() {
        let headers = [
            ("Content-Type", "application/octet-stream"),
            ("Content-Disposition", "attachment; filename=\"hello_38.snap\""),
        ]
        .into_iter()
        .collect::<Headers>();
        let response = Response { status_code: 200, reason: "OK".into(), headers, body: vec![1, 2, 3] };

        let reply = DownloadSnap::new("hello").parse(&response).unwrap();

        assert_eq!(
            reply,
            Reply::Ready(DownloadedSnap { filename: Some("hello_38.snap".into()), data: vec![1, 2, 3] })
        );
    }

    #[yare::parameterized(
        plain    = { "attachment; filename=a.snap", Some("a.snap") },
        quoted   = { "attachment; filename=\"b.snap\"", Some("b.snap") },
        missing  = { "inline", None },
    )]
    fn filenames(value: &str, expected: Option<&str>) {
        assert_eq!(disposition_filename(value).as_deref(), expected);
    }
}
