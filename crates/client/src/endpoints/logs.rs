// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `GET /v2/logs`, streamed as `application/json-seq`.

use serde_json::Value;
use snapd_core::LogEntry;
use snapd_wire::{Response, WireRequest, JSON_SEQ_CONTENT_TYPE};

use crate::endpoint::{decode, parse_envelope, Endpoint, Reply};
use crate::error::ClientError;

type EntrySink = Box<dyn FnMut(LogEntry) + Send>;

/// Journal entries of snap services.
///
/// Entries are collected into the output unless a sink is set with
/// [`GetLogs::on_entry`], in which case each one is handed over as soon as
/// it arrives. With `follow` the call only ends on cancellation or when the
/// daemon ends the stream. Cancelling yields [`ClientError::Cancelled`] and
/// drops whatever was collected, so followers should set a sink.
#[derive(Default)]
pub struct GetLogs {
    names: Vec<String>,
    limit: Option<i64>,
    follow: bool,
    sink: Option<EntrySink>,
    entries: Vec<LogEntry>,
}

impl GetLogs {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { names: names.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    /// Number of past entries; negative means all.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    pub fn on_entry(mut self, sink: impl FnMut(LogEntry) + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }
}

impl Endpoint for GetLogs {
    type Output = Vec<LogEntry>;

    fn request(&self) -> WireRequest {
        let names = (!self.names.is_empty()).then(|| self.names.join(","));
        WireRequest::get("/v2/logs")
            .query_opt("names", names)
            .query_opt("n", self.limit.map(|n| n.to_string()))
            .query_opt("follow", self.follow.then_some("true"))
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        if response.content_type().eq_ignore_ascii_case(JSON_SEQ_CONTENT_TYPE) {
            if response.status_code != 200 {
                return Err(ClientError::UnexpectedResponse(format!(
                    "log stream with status {}",
                    response.status_code
                )));
            }
            return Ok(Reply::Ready(std::mem::take(&mut self.entries)));
        }
        // Errors come back as a regular JSON envelope
        parse_envelope(response)?;
        Err(ClientError::UnexpectedResponse("expected a log stream".into()))
    }

    fn streams(&self) -> bool {
        true
    }

    fn on_record(&mut self, record: Value) -> Result<(), ClientError> {
        let entry: LogEntry = decode(record)?;
        match &mut self.sink {
            Some(sink) => sink(entry),
            None => self.entries.push(entry),
        }
        Ok(())
    }
}
