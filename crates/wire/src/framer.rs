// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental HTTP/1.1 response parser.
//!
//! The framer owns an append-only buffer fed from socket reads and carves
//! it into responses: a head (status line and headers) followed by a body
//! delimited by `Content-Length`, chunked transfer encoding, or the end of
//! the stream. `application/json-seq` bodies are additionally split into
//! records as they arrive so long-lived responses can be consumed live.

use serde_json::Value;

use crate::chunked::{self, find};
use crate::{FrameError, Headers};

/// ASCII record separator that starts every json-seq record.
pub const RECORD_SEPARATOR: u8 = 0x1e;

pub const JSON_SEQ_CONTENT_TYPE: &str = "application/json-seq";

/// How the end of a response body is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    ContentLength(usize),
    Chunked,
    /// Body runs until the peer closes the connection.
    Eof,
}

/// Status line and headers of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status_code: u16,
    pub reason: String,
    pub headers: Headers,
    pub encoding: Encoding,
}

impl ResponseHead {
    /// Media type without parameters, e.g. `application/json`.
    pub fn content_type(&self) -> &str {
        media_type(&self.headers)
    }

    pub fn is_json_seq(&self) -> bool {
        self.content_type().eq_ignore_ascii_case(JSON_SEQ_CONTENT_TYPE)
    }
}

/// A complete response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub reason: String,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Response {
    pub fn content_type(&self) -> &str {
        media_type(&self.headers)
    }
}

fn media_type(headers: &Headers) -> &str {
    headers.get("Content-Type").and_then(|value| value.split(';').next()).unwrap_or_default().trim()
}

/// A response whose head has been parsed and whose body is still arriving.
#[derive(Debug)]
pub struct PartialResponse {
    head: ResponseHead,
    body: Vec<u8>,
    /// Content-Length body bytes taken so far, including records already handed out.
    received: usize,
    complete: bool,
}

impl PartialResponse {
    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    /// Body bytes decoded so far (minus any json-seq records already taken).
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Hand every fully buffered json-seq record to `on_record`.
    ///
    /// Returns true once the transfer is complete and every record has been
    /// delivered.
    pub fn try_extract_json_seq_records(
        &mut self,
        mut on_record: impl FnMut(Value),
    ) -> Result<bool, FrameError> {
        loop {
            let Some(start) = self.body.iter().position(|b| *b == RECORD_SEPARATOR) else {
                if !self.body.iter().all(u8::is_ascii_whitespace) {
                    return Err(FrameError::InvalidRecord("data outside of a record".into()));
                }
                if self.complete {
                    self.body.clear();
                }
                return Ok(self.complete);
            };
            if !self.body[..start].iter().all(u8::is_ascii_whitespace) {
                return Err(FrameError::InvalidRecord("data before record separator".into()));
            }

            let next = self.body[start + 1..]
                .iter()
                .position(|b| *b == RECORD_SEPARATOR)
                .map(|index| start + 1 + index);
            let end = match next {
                Some(end) => end,
                None if self.complete => self.body.len(),
                None => {
                    // RFC 7464 terminates records with LF; accept one early if
                    // it is also a whole document, otherwise wait for more.
                    let record = &self.body[start + 1..];
                    let terminated = record.last() == Some(&b'\n')
                        && serde_json::from_slice::<Value>(record).is_ok();
                    if !terminated {
                        self.body.drain(..start);
                        return Ok(false);
                    }
                    self.body.len()
                }
            };

            let record = &self.body[start + 1..end];
            if !record.iter().all(u8::is_ascii_whitespace) {
                let value = serde_json::from_slice(record)
                    .map_err(|e| FrameError::InvalidRecord(e.to_string()))?;
                on_record(value);
            }
            self.body.drain(..end);
        }
    }

    pub fn into_response(self) -> Response {
        Response {
            status_code: self.head.status_code,
            reason: self.head.reason,
            headers: self.head.headers,
            body: self.body,
        }
    }
}

/// Output of [`Framer::next_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// json-seq records of the response currently being received.
    Records(Vec<Value>),
    /// A response finished.
    Complete(Response),
}

/// Incremental response parser for one connection.
#[derive(Debug, Default)]
pub struct Framer {
    buffer: Vec<u8>,
    current: Option<PartialResponse>,
    closed: bool,
}

impl Framer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// The peer closed the stream; nothing more will be fed.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of undecoded bytes waiting in the buffer.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Parse the next response head, if it is fully buffered.
    pub fn try_extract_headers(&mut self) -> Result<Option<PartialResponse>, FrameError> {
        let Some(end) = find(&self.buffer, b"\r\n\r\n") else {
            return Ok(None);
        };
        let head = parse_head(&self.buffer[..end])?;
        self.buffer.drain(..end + 4);
        Ok(Some(PartialResponse { head, body: Vec::new(), received: 0, complete: false }))
    }

    /// Move as much body as is available into `partial`.
    ///
    /// Returns the number of buffered bytes consumed and whether the body is
    /// now complete.
    pub fn try_extract_body(
        &mut self,
        partial: &mut PartialResponse,
    ) -> Result<(usize, bool), FrameError> {
        if partial.complete {
            return Ok((0, true));
        }
        let consumed = match partial.head.encoding {
            Encoding::ContentLength(length) => {
                let take = (length - partial.received).min(self.buffer.len());
                partial.body.extend(self.buffer.drain(..take));
                partial.received += take;
                partial.complete = partial.received == length;
                take
            }
            Encoding::Chunked => {
                let (consumed, complete) =
                    chunked::decode_available(&mut self.buffer, &mut partial.body)?;
                partial.complete = complete;
                consumed
            }
            Encoding::Eof => {
                let take = self.buffer.len();
                partial.body.append(&mut self.buffer);
                partial.complete = self.closed;
                take
            }
        };
        Ok((consumed, partial.complete))
    }

    /// Advance parsing and report the next thing the caller should act on.
    ///
    /// `Ok(None)` means more bytes are needed. Once the stream is closed, a
    /// response left incomplete is reported as [`FrameError::Truncated`].
    pub fn next_event(&mut self) -> Result<Option<FrameEvent>, FrameError> {
        let mut partial = match self.current.take() {
            Some(partial) => partial,
            None => match self.try_extract_headers()? {
                Some(partial) => partial,
                None if self.closed && !self.buffer.is_empty() => {
                    return Err(FrameError::Truncated)
                }
                None => return Ok(None),
            },
        };

        self.try_extract_body(&mut partial)?;

        if partial.head.is_json_seq() {
            let mut records = Vec::new();
            partial.try_extract_json_seq_records(|record| records.push(record))?;
            if !records.is_empty() {
                self.current = Some(partial);
                return Ok(Some(FrameEvent::Records(records)));
            }
        }

        if partial.complete {
            return Ok(Some(FrameEvent::Complete(partial.into_response())));
        }
        if self.closed {
            return Err(FrameError::Truncated);
        }
        self.current = Some(partial);
        Ok(None)
    }
}

fn parse_head(raw: &[u8]) -> Result<ResponseHead, FrameError> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| FrameError::MalformedHeader("header block is not UTF-8".into()))?;
    let mut lines = text.split("\r\n");
    let status_line = lines.next().unwrap_or_default();
    let (status_code, reason) = parse_status_line(status_line)?;

    let mut headers = Headers::new();
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            return Err(FrameError::MalformedHeader(line.to_string()));
        };
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(FrameError::MalformedHeader(line.to_string()));
        }
        headers.insert(name, value.trim());
    }

    let encoding = select_encoding(status_code, &headers)?;
    Ok(ResponseHead { status_code, reason, headers, encoding })
}

fn parse_status_line(line: &str) -> Result<(u16, String), FrameError> {
    let malformed = || FrameError::MalformedStatusLine(line.to_string());
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/1.") {
        return Err(malformed());
    }
    let code = parts.next().unwrap_or_default();
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let status_code = code.parse().map_err(|_| malformed())?;
    let reason = parts.next().unwrap_or_default().to_string();
    Ok((status_code, reason))
}

fn select_encoding(status_code: u16, headers: &Headers) -> Result<Encoding, FrameError> {
    if let Some(value) = headers.get("Transfer-Encoding") {
        let value = value.trim();
        if value.eq_ignore_ascii_case("chunked") {
            return Ok(Encoding::Chunked);
        }
        if !value.eq_ignore_ascii_case("identity") {
            return Err(FrameError::UnknownEncoding(value.to_string()));
        }
    }
    if let Some(value) = headers.get("Content-Length") {
        let length =
            value.trim().parse().map_err(|_| FrameError::InvalidContentLength(value.to_string()))?;
        return Ok(Encoding::ContentLength(length));
    }
    if (100..200).contains(&status_code) || status_code == 204 || status_code == 304 {
        return Ok(Encoding::ContentLength(0));
    }
    Ok(Encoding::Eof)
}

#[cfg(test)]
#[path = "framer_tests.rs"]
mod tests;
