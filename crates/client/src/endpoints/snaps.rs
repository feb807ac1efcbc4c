// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/v2/snaps` and `/v2/find`.

use serde_json::{json, Map, Value};
use snapd_core::{Change, Snap};
use snapd_wire::{encode_component, Response, WireRequest};

use crate::endpoint::{parse_async, parse_sync, Endpoint, Reply};
use crate::error::ClientError;

/// `GET /v2/snaps`
#[derive(Debug, Clone, Default)]
pub struct ListSnaps {
    names: Vec<String>,
    all_revisions: bool,
}

impl ListSnaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Include disabled revisions.
    pub fn all_revisions(mut self, all: bool) -> Self {
        self.all_revisions = all;
        self
    }
}

impl Endpoint for ListSnaps {
    type Output = Vec<Snap>;

    fn request(&self) -> WireRequest {
        let names = (!self.names.is_empty()).then(|| self.names.join(","));
        WireRequest::get("/v2/snaps")
            .query_opt("snaps", names)
            .query_opt("select", self.all_revisions.then_some("all"))
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_sync(response).map(Reply::Ready)
    }
}

/// `GET /v2/snaps/{name}`
#[derive(Debug, Clone)]
pub struct GetSnap {
    name: String,
}

impl GetSnap {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Endpoint for GetSnap {
    type Output = Snap;

    fn request(&self) -> WireRequest {
        WireRequest::get(format!("/v2/snaps/{}", encode_component(&self.name)))
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_sync(response).map(Reply::Ready)
    }
}

/// `GET /v2/find`
#[derive(Debug, Clone, Default)]
pub struct FindSnaps {
    query: Option<String>,
    name: Option<String>,
    section: Option<String>,
    select: Option<String>,
}

impl FindSnaps {
    /// Free-text search.
    pub fn query(query: impl Into<String>) -> Self {
        Self { query: Some(query.into()), ..Self::default() }
    }

    /// Exact name match.
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// `refresh` or `private`.
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }
}

impl Endpoint for FindSnaps {
    type Output = Vec<Snap>;

    fn request(&self) -> WireRequest {
        WireRequest::get("/v2/find")
            .query_opt("q", self.query.as_deref())
            .query_opt("name", self.name.as_deref())
            .query_opt("section", self.section.as_deref())
            .query_opt("select", self.select.as_deref())
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_sync(response).map(Reply::Ready)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Remove,
    Refresh,
    Enable,
    Disable,
    Revert,
}

snapd_core::str_enum! {
    Action {
        Install => "install",
        Remove => "remove",
        Refresh => "refresh",
        Enable => "enable",
        Disable => "disable",
        Revert => "revert",
    }
}

/// `POST /v2/snaps/{name}`, tracked as a change.
#[derive(Debug, Clone)]
pub struct SnapAction {
    name: String,
    action: Action,
    channel: Option<String>,
    revision: Option<String>,
    classic: bool,
    devmode: bool,
    purge: bool,
}

impl SnapAction {
    pub fn new(action: Action, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action,
            channel: None,
            revision: None,
            classic: false,
            devmode: false,
            purge: false,
        }
    }

    pub fn install(name: impl Into<String>) -> Self {
        Self::new(Action::Install, name)
    }

    pub fn remove(name: impl Into<String>) -> Self {
        Self::new(Action::Remove, name)
    }

    pub fn refresh(name: impl Into<String>) -> Self {
        Self::new(Action::Refresh, name)
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    pub fn classic(mut self, classic: bool) -> Self {
        self.classic = classic;
        self
    }

    pub fn devmode(mut self, devmode: bool) -> Self {
        self.devmode = devmode;
        self
    }

    pub fn purge(mut self, purge: bool) -> Self {
        self.purge = purge;
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("action".into(), json!(self.action.as_str()));
        if let Some(channel) = &self.channel {
            body.insert("channel".into(), json!(channel));
        }
        if let Some(revision) = &self.revision {
            body.insert("revision".into(), json!(revision));
        }
        for (flag, set) in [("classic", self.classic), ("devmode", self.devmode), ("purge", self.purge)] {
            if set {
                body.insert(flag.into(), json!(true));
            }
        }
        Value::Object(body)
    }
}

impl Endpoint for SnapAction {
    type Output = Change;

    fn request(&self) -> WireRequest {
        WireRequest::post(format!("/v2/snaps/{}", encode_component(&self.name))).json(&self.body())
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

#[cfg(test)]
#[path = "snaps_tests.rs"]
mod tests;
