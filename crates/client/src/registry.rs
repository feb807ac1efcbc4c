// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bookkeeping for requests that are in flight on the shared connection.
//!
//! Responses carry no request id, so they are matched to requests by write
//! order: the oldest entry on a connection still waiting for its wire
//! response gets the next one. Entries are kept in registration order, which
//! is also write order because writes happen under the connection lock.

use std::sync::Arc;

use serde_json::Value;
use snapd_wire::Response;
use tokio::sync::{mpsc, oneshot, Notify};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::ClientError;

pub(crate) type Completion = oneshot::Sender<Result<Response, ClientError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an entry stands with respect to its wire response.
#[derive(Debug)]
enum WireState {
    Awaiting(Completion),
    /// The caller gave up; the response will still arrive and is swallowed.
    Abandoned,
    /// Response handed over; async entries stay until their change resolves.
    Delivered,
}

/// What a caller supplies when submitting a request.
#[derive(Debug)]
pub(crate) struct Registration {
    pub completion: Completion,
    pub records: Option<mpsc::UnboundedSender<Value>>,
    pub is_async: bool,
    pub cancel: CancellationToken,
    pub wake: Arc<Notify>,
}

#[derive(Debug)]
struct PendingRequest {
    id: RequestId,
    wire: WireState,
    records: Option<mpsc::UnboundedSender<Value>>,
    /// Connection the request bytes went out on.
    generation: Option<u64>,
    is_async: bool,
    change_id: Option<String>,
    cancel: CancellationToken,
    wake: Arc<Notify>,
    abort_sent: bool,
}

impl PendingRequest {
    fn awaiting_wire(&self) -> bool {
        matches!(self.wire, WireState::Awaiting(_) | WireState::Abandoned)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: Vec<PendingRequest>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, registration: Registration) -> RequestId {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.entries.push(PendingRequest {
            id,
            wire: WireState::Awaiting(registration.completion),
            records: registration.records,
            generation: None,
            is_async: registration.is_async,
            change_id: None,
            cancel: registration.cancel,
            wake: registration.wake,
            abort_sent: false,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn set_generation(&mut self, id: RequestId, generation: Option<u64>) {
        if let Some(entry) = self.get_mut(id) {
            entry.generation = generation;
        }
    }

    pub fn find_by_change_id(&self, change_id: &str) -> Option<RequestId> {
        self.entries.iter().find(|entry| entry.change_id.as_deref() == Some(change_id)).map(|entry| entry.id)
    }

    /// The request the next response on `generation` belongs to.
    pub fn oldest_unresolved(&self, generation: u64) -> Option<RequestId> {
        self.entries
            .iter()
            .find(|entry| entry.generation == Some(generation) && entry.awaiting_wire())
            .map(|entry| entry.id)
    }

    /// Forward json-seq records. Records for abandoned or cancelled
    /// requests are dropped.
    pub fn push_records(&mut self, id: RequestId, records: Vec<Value>) {
        let Some(entry) = self.get_mut(id) else {
            return;
        };
        if entry.cancel.is_cancelled() {
            return;
        }
        if let (WireState::Awaiting(_), Some(sink)) = (&entry.wire, &entry.records) {
            for record in records {
                if sink.send(record).is_err() {
                    break;
                }
            }
        }
    }

    /// Deliver the wire response. Returns false if nobody was waiting for it.
    pub fn complete(&mut self, id: RequestId, result: Result<Response, ClientError>) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        match std::mem::replace(&mut self.entries[index].wire, WireState::Delivered) {
            WireState::Awaiting(completion) => {
                if !self.entries[index].is_async {
                    self.entries.remove(index);
                }
                completion.send(result).is_ok()
            }
            WireState::Abandoned => {
                debug!(request = %id, "discarding response of abandoned request");
                self.entries.remove(index);
                false
            }
            WireState::Delivered => false,
        }
    }

    /// Bind an async request to its change. The first id set wins.
    pub fn set_change_id(&mut self, id: RequestId, change_id: &str) {
        if let Some(entry) = self.get_mut(id) {
            if entry.change_id.is_none() {
                entry.change_id = Some(change_id.to_string());
            }
        }
    }

    /// The caller is no longer interested in `id`.
    ///
    /// A request still on the wire stays as a tombstone so that its response
    /// is not mistaken for the next request's.
    pub fn abandon(&mut self, id: RequestId) {
        let Some(index) = self.position(id) else {
            return;
        };
        let entry = &mut self.entries[index];
        if matches!(entry.wire, WireState::Awaiting(_)) && entry.generation.is_some() {
            entry.wire = WireState::Abandoned;
            entry.records = None;
            entry.change_id = None;
        } else {
            self.entries.remove(index);
        }
    }

    /// Record that an abort was sent for `id`. Returns false if one already was.
    pub fn mark_abort_sent(&mut self, id: RequestId) -> bool {
        match self.get_mut(id) {
            Some(entry) if !entry.abort_sent => {
                entry.abort_sent = true;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: RequestId) {
        if let Some(index) = self.position(id) {
            self.entries.remove(index);
        }
    }

    /// Connection `generation` is gone.
    ///
    /// Requests waiting on it fail with `error`. Requests already tracking a
    /// change survive and poll right away.
    pub fn cancel_all(&mut self, generation: u64, error: &ClientError) {
        let mut failed = 0;
        self.entries.retain_mut(|entry| {
            if entry.change_id.is_some() {
                entry.wake.notify_one();
                return true;
            }
            if entry.generation != Some(generation) {
                return true;
            }
            match std::mem::replace(&mut entry.wire, WireState::Delivered) {
                WireState::Awaiting(completion) => {
                    failed += 1;
                    let _ = completion.send(Err(error.clone()));
                    false
                }
                WireState::Abandoned => false,
                WireState::Delivered => true,
            }
        });
        if failed > 0 {
            debug!(generation, failed, "failed requests of lost connection");
        }
    }

    fn position(&self, id: RequestId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn get_mut(&mut self, id: RequestId) -> Option<&mut PendingRequest> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
