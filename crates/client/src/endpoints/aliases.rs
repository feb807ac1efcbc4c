// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;
use snapd_core::{Aliases, Change};
use snapd_wire::{Response, WireRequest};

use crate::endpoint::{parse_async, parse_sync, Endpoint, Reply};
use crate::error::ClientError;

/// `GET /v2/aliases`
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAliases;

impl Endpoint for GetAliases {
    type Output = Aliases;

    fn request(&self) -> WireRequest {
        WireRequest::get("/v2/aliases")
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_sync(response).map(Reply::Ready)
    }
}

/// `POST /v2/aliases` with `{"action": "prefer"}`: make every alias of a
/// snap point at it, tracked as a change.
#[derive(Debug, Clone)]
pub struct Prefer {
    snap: String,
}

impl Prefer {
    pub fn new(snap: impl Into<String>) -> Self {
        Self { snap: snap.into() }
    }
}

impl Endpoint for Prefer {
    type Output = Change;

    fn request(&self) -> WireRequest {
        WireRequest::post("/v2/aliases").json(&json!({"action": "prefer", "snap": self.snap}))
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_async(response).map(Reply::Change)
    }

    fn produces_change(&self) -> bool {
        true
    }

    fn parse_change(&self, change: &Change) -> Result<Self::Output, ClientError> {
        Ok(change.clone())
    }
}
