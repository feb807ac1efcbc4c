// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single snapd connection shared by every call of a client.
//!
//! Requests are written under the connection lock, so write order equals
//! registration order. One reader task per connection parses responses and
//! hands each to the oldest request still waiting on that connection.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use snapd_core::{Envelope, Maintenance};
use snapd_wire::{FrameEvent, Framer, Headers, Response, WireRequest};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::endpoint::JSON_CONTENT_TYPE;
use crate::error::ClientError;
use crate::registry::{Registration, Registry, RequestId};

const READ_CHUNK: usize = 8192;

struct Connection {
    writer: OwnedWriteHalf,
    generation: u64,
    /// At least one request was written; a failed write may mean the daemon
    /// dropped an idle keep-alive connection.
    used: bool,
    reader: JoinHandle<()>,
}

pub(crate) struct Transport {
    socket_path: PathBuf,
    connection: tokio::sync::Mutex<Option<Connection>>,
    registry: Mutex<Registry>,
    maintenance: Mutex<Option<Maintenance>>,
    generations: AtomicU64,
}

impl Transport {
    pub fn new(socket_path: PathBuf) -> Arc<Self> {
        Arc::new(Self {
            socket_path,
            connection: tokio::sync::Mutex::new(None),
            registry: Mutex::new(Registry::new()),
            maintenance: Mutex::new(None),
            generations: AtomicU64::new(0),
        })
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    pub fn registry(&self) -> &Mutex<Registry> {
        &self.registry
    }

    pub fn maintenance(&self) -> Option<Maintenance> {
        self.maintenance.lock().clone()
    }

    /// Register and write a request, connecting first if needed.
    pub async fn submit(
        self: &Arc<Self>,
        request: &WireRequest,
        common: &Headers,
        registration: Registration,
    ) -> Result<RequestId, ClientError> {
        let bytes = request.encode(common);
        let mut slot = self.connection.lock().await;
        let mut connection = match slot.take() {
            Some(connection) => connection,
            None => self.connect().await?,
        };
        let id = self.registry.lock().register(registration);
        let mut retried = false;

        loop {
            self.registry.lock().set_generation(id, Some(connection.generation));
            let error = match connection.writer.write_all(&bytes).await {
                Ok(()) => {
                    debug!(request = %id, method = %request.method(), target = %request.target(), generation = connection.generation, "sent request");
                    connection.used = true;
                    *slot = Some(connection);
                    return Ok(id);
                }
                Err(error) => error,
            };

            // Whatever else was in flight on this connection is lost with it
            self.registry.lock().set_generation(id, None);
            connection.reader.abort();
            let lost = ClientError::ConnectionLost(error.to_string());
            self.registry.lock().cancel_all(connection.generation, &lost);

            if retried || !connection.used || !is_stale_connection(&error) {
                self.registry.lock().remove(id);
                return Err(ClientError::Write(error.to_string()));
            }
            info!(generation = connection.generation, error = %error, "connection went stale, reconnecting");
            retried = true;
            connection = match self.connect().await {
                Ok(connection) => connection,
                Err(error) => {
                    self.registry.lock().remove(id);
                    return Err(error);
                }
            };
        }
    }

    async fn connect(self: &Arc<Self>) -> Result<Connection, ClientError> {
        let stream = UnixStream::connect(&self.socket_path).await.map_err(|e| ClientError::Connect {
            path: self.socket_path.clone(),
            message: e.to_string(),
        })?;
        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let (read_half, writer) = stream.into_split();
        let reader = tokio::spawn(read_loop(Arc::downgrade(self), read_half, generation));
        info!(generation, socket = %self.socket_path.display(), "connected to snapd");
        Ok(Connection { writer, generation, used: false, reader })
    }

    fn dispatch(&self, generation: u64, event: FrameEvent) {
        match event {
            FrameEvent::Records(records) => {
                let mut registry = self.registry.lock();
                match registry.oldest_unresolved(generation) {
                    Some(id) => registry.push_records(id, records),
                    None => warn!(generation, count = records.len(), "dropping records with no pending request"),
                }
            }
            FrameEvent::Complete(response) => {
                if response.content_type().eq_ignore_ascii_case(JSON_CONTENT_TYPE) {
                    self.update_maintenance(&response);
                }
                debug!(generation, status = response.status_code, bytes = response.body.len(), "received response");
                let mut registry = self.registry.lock();
                match registry.oldest_unresolved(generation) {
                    Some(id) => {
                        registry.complete(id, Ok(response));
                    }
                    None => warn!(generation, status = response.status_code, "dropping unmatched response"),
                }
            }
        }
    }

    fn update_maintenance(&self, response: &Response) {
        let maintenance = Envelope::peek_maintenance(&response.body);
        if let Some(maintenance) = &maintenance {
            debug!(kind = %maintenance.kind, message = %maintenance.message, "daemon maintenance");
        }
        *self.maintenance.lock() = maintenance;
    }

    async fn connection_lost(&self, generation: u64, error: ClientError) {
        {
            let mut slot = self.connection.lock().await;
            if slot.as_ref().is_some_and(|connection| connection.generation == generation) {
                *slot = None;
            }
        }
        info!(generation, error = %error, "connection to snapd closed");
        self.registry.lock().cancel_all(generation, &error);
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.get_mut().take() {
            connection.reader.abort();
        }
    }
}

/// Broken-pipe class errors: the peer went away before we wrote.
fn is_stale_connection(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
    )
}

async fn read_loop(transport: Weak<Transport>, mut reader: OwnedReadHalf, generation: u64) {
    let mut framer = Framer::new();
    let mut buffer = vec![0u8; READ_CHUNK];

    let reason = 'read: loop {
        match reader.read(&mut buffer).await {
            Ok(0) => framer.close(),
            Ok(n) => framer.feed(&buffer[..n]),
            Err(e) => break 'read ClientError::ConnectionLost(e.to_string()),
        }
        let Some(driver) = transport.upgrade() else {
            return;
        };
        loop {
            match framer.next_event() {
                Ok(Some(event)) => driver.dispatch(generation, event),
                Ok(None) => break,
                Err(e) => {
                    warn!(generation, error = %e, "protocol error, closing connection");
                    break 'read ClientError::Frame(e);
                }
            }
        }
        if framer.is_closed() {
            break 'read ClientError::ConnectionLost("closed by snapd".into());
        }
    };

    if let Some(driver) = transport.upgrade() {
        driver.connection_lost(generation, reason).await;
    }
}
