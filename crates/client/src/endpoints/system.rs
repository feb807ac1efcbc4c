// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use snapd_core::SystemInfo;
use snapd_wire::{Response, WireRequest};

use crate::endpoint::{parse_sync, Endpoint, Reply};
use crate::error::ClientError;

/// `GET /v2/system-info`
#[derive(Debug, Clone, Copy, Default)]
pub struct GetSystemInfo;

impl Endpoint for GetSystemInfo {
    type Output = SystemInfo;

    fn request(&self) -> WireRequest {
        WireRequest::get("/v2/system-info")
    }

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError> {
        parse_sync(response).map(Reply::Ready)
    }
}
