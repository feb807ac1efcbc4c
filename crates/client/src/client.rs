// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async client facade.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use snapd_core::{Aliases, Assertion, AuthData, Change, LogEntry, Maintenance, Notice, Snap, SystemInfo};
use snapd_wire::Response;
use tokio::sync::{mpsc, oneshot, Notify};
use tracing::{debug, warn};

use crate::change::{ChangeTracker, Outcome};
use crate::config::{CallOptions, ClientConfig, Settings};
use crate::endpoint::{Endpoint, Reply};
use crate::endpoints::{
    AbortChange, AddAssertions, ChangeFilter, DownloadSnap, DownloadedSnap, FindSnaps, GetAliases, GetAssertions,
    GetChange, GetChanges, GetLogs, GetNotices, GetSnap, GetSystemInfo, ListSnaps, Prefer, SnapAction,
};
use crate::error::ClientError;
use crate::registry::{Registration, RequestId};
use crate::transport::Transport;

/// Handle to snapd. Clones share one connection.
#[derive(Clone)]
pub struct Client {
    transport: Arc<Transport>,
    settings: Arc<Mutex<Settings>>,
    poll_interval: Duration,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: Transport::new(config.socket_path.clone()),
            settings: Arc::new(Mutex::new(Settings::from_config(&config))),
            poll_interval: config.poll_interval,
        }
    }

    /// Client configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    pub fn socket_path(&self) -> &std::path::Path {
        self.transport.socket_path()
    }

    pub fn set_auth_data(&self, auth: Option<AuthData>) {
        self.settings.lock().auth = auth;
    }

    pub fn set_allow_interaction(&self, allow: bool) {
        self.settings.lock().allow_interaction = allow;
    }

    pub fn set_user_agent(&self, user_agent: impl Into<String>) {
        self.settings.lock().user_agent = user_agent.into();
    }

    /// Maintenance reported by the most recent JSON response.
    pub fn maintenance(&self) -> Option<Maintenance> {
        self.transport.maintenance()
    }

    /// Requests currently registered, including abandoned ones whose
    /// response has not arrived yet.
    pub fn pending_requests(&self) -> usize {
        self.transport.registry().lock().len()
    }

    /// Run `endpoint` to completion, following its change if it starts one.
    pub async fn call<E: Endpoint>(&self, mut endpoint: E, options: CallOptions) -> Result<E::Output, ClientError> {
        let (reply, pending) = self.exchange(&mut endpoint, &options).await?;
        match reply {
            Reply::Ready(output) => Ok(output),
            Reply::Change(change_id) if endpoint.produces_change() => {
                self.follow_change(&mut endpoint, &pending, &change_id, &options).await
            }
            Reply::Change(change_id) => {
                Err(ClientError::UnexpectedResponse(format!("change {change_id} for a synchronous request")))
            }
        }
    }

    /// Submit one request and wait for its wire response.
    ///
    /// The returned guard keeps async requests registered until dropped.
    async fn exchange<E: Endpoint>(
        &self,
        endpoint: &mut E,
        options: &CallOptions,
    ) -> Result<(Reply<E::Output>, Pending), ClientError> {
        if options.cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        let is_async = endpoint.produces_change();
        let (completion, mut response_rx) = oneshot::channel();
        let (records, mut records_rx) = if endpoint.streams() {
            let (tx, rx) = mpsc::unbounded_channel();
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };
        let wake = Arc::new(Notify::new());
        let registration =
            Registration { completion, records, is_async, cancel: options.cancel.clone(), wake: Arc::clone(&wake) };

        let request = endpoint.request();
        let common = self.settings.lock().common_headers();
        let id = self.transport.submit(&request, &common, registration).await?;
        let pending = Pending { transport: Arc::clone(&self.transport), id, wake };

        let result = loop {
            tokio::select! {
                biased;
                // Async requests wait for their change id so the change can be aborted
                _ = options.cancel.cancelled(), if !is_async => return Err(ClientError::Cancelled),
                Some(record) = next_record(&mut records_rx) => endpoint.on_record(record)?,
                result = &mut response_rx => break result,
            }
        };
        let response: Response =
            result.unwrap_or_else(|_| Err(ClientError::ConnectionLost("request dropped".into())))?;
        if let Some(rx) = records_rx.as_mut() {
            while let Ok(record) = rx.try_recv() {
                endpoint.on_record(record)?;
            }
        }
        Ok((endpoint.parse(&response)?, pending))
    }

    async fn follow_change<E: Endpoint>(
        &self,
        endpoint: &mut E,
        pending: &Pending,
        change_id: &str,
        options: &CallOptions,
    ) -> Result<E::Output, ClientError> {
        debug!(request = %pending.id, change = change_id, "following change");
        self.transport.registry().lock().set_change_id(pending.id, change_id);
        if options.cancel.is_cancelled() {
            self.send_abort(pending.id, change_id).await;
            return Err(ClientError::Cancelled);
        }

        let mut tracker = ChangeTracker::new(options.progress.clone());
        loop {
            tokio::select! {
                biased;
                _ = options.cancel.cancelled() => {
                    self.send_abort(pending.id, change_id).await;
                    return Err(ClientError::Cancelled);
                }
                _ = pending.wake.notified() => debug!(change = change_id, "polling early after reconnect"),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            let change = match self.poll(change_id).await {
                Ok(change) => change,
                Err(e) if e.is_connection_loss() => {
                    debug!(change = change_id, error = %e, "change poll lost its connection");
                    continue;
                }
                Err(e) => return Err(e),
            };
            tracker.observe(&change);
            match ChangeTracker::outcome(&change, options.cancel.is_cancelled()) {
                Outcome::Pending => {}
                Outcome::Cancelled => return Err(ClientError::Cancelled),
                Outcome::Failed(message) => return Err(ClientError::ChangeFailed(message)),
                Outcome::Ready => return endpoint.parse_change(&change),
            }
        }
    }

    async fn poll(&self, change_id: &str) -> Result<Change, ClientError> {
        let (reply, _pending) = self.exchange(&mut GetChange::new(change_id), &CallOptions::default()).await?;
        match reply {
            Reply::Ready(change) => Ok(change),
            Reply::Change(_) => Err(ClientError::UnexpectedResponse("change poll returned a change".into())),
        }
    }

    /// Best-effort abort, at most once per request.
    async fn send_abort(&self, id: RequestId, change_id: &str) {
        if !self.transport.registry().lock().mark_abort_sent(id) {
            return;
        }
        debug!(change = change_id, "aborting change");
        if let Err(e) = self.exchange(&mut AbortChange::new(change_id), &CallOptions::default()).await {
            warn!(change = change_id, error = %e, "failed to abort change");
        }
    }

    // ── Endpoints ───────────────────────────────────────────────────────

    pub async fn system_info(&self) -> Result<SystemInfo, ClientError> {
        self.call(GetSystemInfo, CallOptions::default()).await
    }

    pub async fn list_snaps(&self) -> Result<Vec<Snap>, ClientError> {
        self.call(ListSnaps::new(), CallOptions::default()).await
    }

    pub async fn get_snap(&self, name: &str) -> Result<Snap, ClientError> {
        self.call(GetSnap::new(name), CallOptions::default()).await
    }

    pub async fn find(&self, query: &str) -> Result<Vec<Snap>, ClientError> {
        self.call(FindSnaps::query(query), CallOptions::default()).await
    }

    pub async fn install(&self, name: &str, options: CallOptions) -> Result<Change, ClientError> {
        self.call(SnapAction::install(name), options).await
    }

    pub async fn remove(&self, name: &str, options: CallOptions) -> Result<Change, ClientError> {
        self.call(SnapAction::remove(name), options).await
    }

    pub async fn refresh(&self, name: &str, options: CallOptions) -> Result<Change, ClientError> {
        self.call(SnapAction::refresh(name), options).await
    }

    pub async fn get_change(&self, id: &str) -> Result<Change, ClientError> {
        self.call(GetChange::new(id), CallOptions::default()).await
    }

    pub async fn get_changes(&self, filter: ChangeFilter, snap: Option<&str>) -> Result<Vec<Change>, ClientError> {
        let endpoint = match snap {
            Some(snap) => GetChanges::new(filter).snap(snap),
            None => GetChanges::new(filter),
        };
        self.call(endpoint, CallOptions::default()).await
    }

    /// Abort a change. A call of this client following the same change will
    /// not send a second abort when it is cancelled.
    pub async fn abort_change(&self, id: &str) -> Result<Change, ClientError> {
        {
            let mut registry = self.transport.registry().lock();
            if let Some(request) = registry.find_by_change_id(id) {
                registry.mark_abort_sent(request);
            }
        }
        self.call(AbortChange::new(id), CallOptions::default()).await
    }

    pub async fn aliases(&self) -> Result<Aliases, ClientError> {
        self.call(GetAliases, CallOptions::default()).await
    }

    pub async fn prefer(&self, snap: &str, options: CallOptions) -> Result<Change, ClientError> {
        self.call(Prefer::new(snap), options).await
    }

    pub async fn logs(&self, logs: GetLogs, options: CallOptions) -> Result<Vec<LogEntry>, ClientError> {
        self.call(logs, options).await
    }

    pub async fn assertions(&self, assertion_type: &str) -> Result<Vec<Assertion>, ClientError> {
        self.call(GetAssertions::new(assertion_type), CallOptions::default()).await
    }

    pub async fn add_assertions(&self, content: impl Into<Vec<u8>>) -> Result<(), ClientError> {
        self.call(AddAssertions::new(content), CallOptions::default()).await
    }

    pub async fn notices(&self, notices: GetNotices) -> Result<Vec<Notice>, ClientError> {
        self.call(notices, CallOptions::default()).await
    }

    pub async fn download(&self, download: DownloadSnap, options: CallOptions) -> Result<DownloadedSnap, ClientError> {
        self.call(download, options).await
    }
}

/// Keeps a submitted request registered; dropping it gives the request up.
struct Pending {
    transport: Arc<Transport>,
    id: RequestId,
    wake: Arc<Notify>,
}

impl Drop for Pending {
    fn drop(&mut self) {
        self.transport.registry().lock().abandon(self.id);
    }
}

async fn next_record(rx: &mut Option<mpsc::UnboundedReceiver<Value>>) -> Option<Value> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "client_tests/mod.rs"]
mod tests;
