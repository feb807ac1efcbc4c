// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The contract every request type implements, plus the envelope helpers
//! most of them share.

use serde::de::DeserializeOwned;
use serde_json::Value;
use snapd_core::{Change, Envelope};
use snapd_wire::{Response, WireRequest};

use crate::error::ClientError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Parsed first response of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Ready(T),
    /// The daemon started a change; the result comes from polling it.
    Change(String),
}

/// A typed daemon operation.
///
/// The endpoint stays with the caller for the whole call: records and
/// change results are handed back to the same value that built the request.
pub trait Endpoint: Send {
    type Output: Send;

    fn request(&self) -> WireRequest;

    fn parse(&mut self, response: &Response) -> Result<Reply<Self::Output>, ClientError>;

    /// The daemon answers with a change to poll.
    fn produces_change(&self) -> bool {
        false
    }

    /// Final result once the change is ready and succeeded.
    fn parse_change(&self, change: &Change) -> Result<Self::Output, ClientError> {
        Err(ClientError::UnexpectedResponse(format!("change {} for a synchronous request", change.id)))
    }

    /// The response is an `application/json-seq` stream.
    fn streams(&self) -> bool {
        false
    }

    fn on_record(&mut self, _record: Value) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Decode the JSON envelope, turning error envelopes into errors.
pub fn parse_envelope(response: &Response) -> Result<Envelope, ClientError> {
    let content_type = response.content_type();
    if !content_type.eq_ignore_ascii_case(JSON_CONTENT_TYPE) {
        return Err(ClientError::UnexpectedResponse(format!(
            "status {} with content type {content_type:?}",
            response.status_code
        )));
    }
    match Envelope::parse(&response.body, response.status_code)? {
        Envelope::Error { error, .. } => Err(error.into()),
        envelope => Ok(envelope),
    }
}

/// Result of a sync envelope, deserialized.
pub fn parse_sync<T: DeserializeOwned>(response: &Response) -> Result<T, ClientError> {
    match parse_envelope(response)? {
        Envelope::Sync { result, .. } => decode(result),
        Envelope::Async { change, .. } => {
            Err(ClientError::UnexpectedResponse(format!("change {change} for a synchronous request")))
        }
        Envelope::Error { error, .. } => Err(error.into()),
    }
}

/// Change id of an async envelope.
pub fn parse_async(response: &Response) -> Result<String, ClientError> {
    match parse_envelope(response)? {
        Envelope::Async { change, .. } => Ok(change),
        Envelope::Sync { .. } => Err(ClientError::UnexpectedResponse("expected an async response".into())),
        Envelope::Error { error, .. } => Err(error.into()),
    }
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Protocol(format!("unexpected result: {e}")))
}
