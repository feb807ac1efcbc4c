// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, SecondsFormat, Utc};
use snapd_core::Notice;
use snapd_wire::{Response, WireRequest};

use crate::endpoint::{parse_sync, Endpoint, Reply};
use crate::error::ClientError;

/// `GET /v2/notices`
#[derive(Debug, Clone, Default)]
pub struct GetNotices {
    types: Vec<String>,
    keys: Vec<String>,
    after: Option<DateTime<Utc>>,
}

impl GetNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn keys(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Only notices that last occurred after `after`.
    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }
}

impl Endpoint for GetNotices {
    type Output = Vec<Notice>;

    fn request(&self) -> WireRequest {
        let joined = |values: &[String]| (!values.is_empty()).then(|| values.join(","));
        WireRequest::get("/v2/notices")
            .query_opt("types", joined(&self.types))
            .query_opt("keys", joined(&self.keys))
            .query_opt("after", self.after.map(|after| after.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_sync(response).map(Reply::Ready)
    }
}
