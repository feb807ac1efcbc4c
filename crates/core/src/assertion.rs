// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signed assertions in the `application/x.ubuntu.assertion` text format.
//!
//! Each assertion is a header block, an optional body (`body-length` bytes),
//! and a signature, separated by blank lines. A stream is several assertions
//! separated by blank lines.

use indexmap::IndexMap;
use thiserror::Error;

pub const ASSERTION_CONTENT_TYPE: &str = "application/x.ubuntu.assertion";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    #[error("assertion header block is not terminated")]
    UnterminatedHeaders,
    #[error("invalid assertion header line: {0:?}")]
    InvalidHeader(String),
    #[error("invalid body-length: {0:?}")]
    InvalidBodyLength(String),
    #[error("assertion body is truncated")]
    TruncatedBody,
    #[error("assertion has no signature")]
    MissingSignature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    /// Header values; multi-line values keep their inner newlines.
    pub headers: IndexMap<String, String>,
    pub body: Vec<u8>,
    pub signature: String,
}

impl Assertion {
    /// The `type` header.
    pub fn assertion_type(&self) -> &str {
        self.header("type").unwrap_or_default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Parse every assertion in a stream.
    pub fn parse_stream(data: &[u8]) -> Result<Vec<Self>, AssertionError> {
        let mut assertions = Vec::new();
        let mut pos = 0;
        loop {
            while data.get(pos) == Some(&b'\n') {
                pos += 1;
            }
            if pos >= data.len() {
                return Ok(assertions);
            }
            let (assertion, next) = Self::parse_one(data, pos)?;
            assertions.push(assertion);
            pos = next;
        }
    }

    fn parse_one(data: &[u8], start: usize) -> Result<(Self, usize), AssertionError> {
        let headers_len = find(&data[start..], b"\n\n").ok_or(AssertionError::UnterminatedHeaders)?;
        let headers = parse_headers(&String::from_utf8_lossy(&data[start..start + headers_len]))?;

        let mut pos = start + headers_len + 2;
        let body_length = match headers.get("body-length") {
            Some(value) => value.parse::<usize>().map_err(|_| AssertionError::InvalidBodyLength(value.clone()))?,
            None => 0,
        };
        let mut body = Vec::new();
        if body_length > 0 {
            let end = pos + body_length;
            if data.len() < end + 2 || &data[end..end + 2] != b"\n\n" {
                return Err(AssertionError::TruncatedBody);
            }
            body = data[pos..end].to_vec();
            pos = end + 2;
        }

        let signature_len = find(&data[pos..], b"\n\n").unwrap_or(data.len() - pos);
        let signature = String::from_utf8_lossy(&data[pos..pos + signature_len]).trim_end().to_string();
        if signature.is_empty() {
            return Err(AssertionError::MissingSignature);
        }
        Ok((Self { headers, body, signature }, pos + signature_len))
    }
}

fn parse_headers(block: &str) -> Result<IndexMap<String, String>, AssertionError> {
    let mut headers: IndexMap<String, String> = IndexMap::new();
    let mut last: Option<String> = None;
    for line in block.lines() {
        // Continuation of a multi-line value
        if let (Some(rest), Some(name)) = (line.strip_prefix("  "), last.as_ref()) {
            if let Some(value) = headers.get_mut(name) {
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(rest.trim_start());
            }
            continue;
        }
        let (name, value) = line.split_once(':').ok_or_else(|| AssertionError::InvalidHeader(line.to_string()))?;
        if name.is_empty() || name.starts_with(' ') {
            return Err(AssertionError::InvalidHeader(line.to_string()));
        }
        headers.insert(name.to_string(), value.trim().to_string());
        last = Some(name.to_string());
    }
    Ok(headers)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
#[path = "assertion_tests.rs"]
mod tests;
