// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/v2/changes`: the endpoints change tracking is built on.

use serde_json::json;
use snapd_core::Change;
use snapd_wire::{encode_component, Response, WireRequest};

use crate::endpoint::{parse_sync, Endpoint, Reply};
use crate::error::ClientError;

/// `GET /v2/changes/{id}`
#[derive(Debug, Clone)]
pub struct GetChange {
    id: String,
}

impl GetChange {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for GetChange {
    type Output = Change;

    fn request(&self) -> WireRequest {
        WireRequest::get(format!("/v2/changes/{}", encode_component(&self.id)))
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        let change: Change = parse_sync(response)?;
        if change.id != self.id {
            return Err(ClientError::Protocol(format!(
                "asked for change {} but got change {}",
                self.id, change.id
            )));
        }
        Ok(Reply::Ready(change))
    }
}

/// Which changes `GET /v2/changes` lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChangeFilter {
    All,
    #[default]
    InProgress,
    Ready,
}

snapd_core::str_enum! {
    ChangeFilter {
        All => "all",
        InProgress => "in-progress",
        Ready => "ready",
    }
}

/// `GET /v2/changes`
#[derive(Debug, Clone, Default)]
pub struct GetChanges {
    filter: ChangeFilter,
    snap: Option<String>,
}

impl GetChanges {
    pub fn new(filter: ChangeFilter) -> Self {
        Self { filter, snap: None }
    }

    /// Only changes affecting `snap`.
    pub fn snap(mut self, snap: impl Into<String>) -> Self {
        self.snap = Some(snap.into());
        self
    }
}

impl Endpoint for GetChanges {
    type Output = Vec<Change>;

    fn request(&self) -> WireRequest {
        WireRequest::get("/v2/changes").query("select", self.filter.as_str()).query_opt("for", self.snap.as_deref())
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_sync(response).map(Reply::Ready)
    }
}

/// `POST /v2/changes/{id}` with `{"action": "abort"}`
#[derive(Debug, Clone)]
pub struct AbortChange {
    id: String,
}

impl AbortChange {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for AbortChange {
    type Output = Change;

    fn request(&self) -> WireRequest {
        WireRequest::post(format!("/v2/changes/{}", encode_component(&self.id))).json(&json!({"action": "abort"}))
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_sync(response).map(Reply::Ready)
    }
}
