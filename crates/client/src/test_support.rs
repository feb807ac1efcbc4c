// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A scripted snapd for tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

#![allow(clippy::expect_used)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{json, Value};
use snapd_core::test_support::{async_body, change_body, error_body, sync_body};
use snapd_core::Change;
use snapd_wire::{encode_chunked, Headers, RECORD_SEPARATOR};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::Client;

/// A request as the fake daemon received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_default()
    }
}

/// What the fake daemon does with one request.
#[derive(Clone)]
pub struct FakeReply {
    status: u16,
    content_type: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    chunk_size: Option<usize>,
    delay: Option<Duration>,
    records: Option<Vec<Value>>,
    gate: Option<Arc<Notify>>,
    close: bool,
    hang_up: bool,
}

impl FakeReply {
    pub fn raw(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.to_string(),
            headers: Vec::new(),
            body: body.into(),
            chunk_size: None,
            delay: None,
            records: None,
            gate: None,
            close: false,
            hang_up: false,
        }
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self::raw(status, "application/json", body.to_string())
    }

    pub fn sync(result: Value) -> Self {
        Self::raw(200, "application/json", sync_body(result))
    }

    pub fn change_started(change_id: &str) -> Self {
        Self::raw(202, "application/json", async_body(change_id))
    }

    pub fn change(change: &Change) -> Self {
        Self::raw(200, "application/json", change_body(change))
    }

    pub fn error(status: u16, kind: &str, message: &str) -> Self {
        Self::raw(status, "application/json", error_body(status, kind, message))
    }

    /// A chunked `application/json-seq` stream of `records`.
    pub fn json_seq(records: Vec<Value>) -> Self {
        let mut reply = Self::raw(200, "application/json-seq", Vec::new());
        reply.records = Some(records);
        reply
    }

    /// Close the connection without answering.
    pub fn hang_up() -> Self {
        let mut reply = Self::raw(0, "", Vec::new());
        reply.hang_up = true;
        reply
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn chunked(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// For json-seq: send the records, then wait for `gate` before ending.
    pub fn hold_until(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Close the connection after answering.
    pub fn close_after(mut self) -> Self {
        self.close = true;
        self
    }

    fn head(&self, framing: &str) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status, reason(self.status));
        head.push_str(&format!("Content-Type: {}\r\n", self.content_type));
        for (name, value) in &self.headers {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        head.push_str(framing);
        head.push_str("\r\n");
        head.into_bytes()
    }

    fn encode(&self) -> Vec<u8> {
        match self.chunk_size {
            Some(size) => {
                let mut bytes = self.head("Transfer-Encoding: chunked\r\n");
                bytes.extend(encode_chunked(&self.body, size));
                bytes
            }
            None => {
                let mut bytes = self.head(&format!("Content-Length: {}\r\n", self.body.len()));
                bytes.extend_from_slice(&self.body);
                bytes
            }
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        202 => "Accepted",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}

#[derive(Default)]
struct DaemonState {
    /// "METHOD /path" → replies; the last one repeats.
    routes: HashMap<String, VecDeque<FakeReply>>,
    requests: Vec<RecordedRequest>,
    connections: usize,
}

impl DaemonState {
    fn route(&mut self, request: RecordedRequest) -> FakeReply {
        let key = format!("{} {}", request.method, request.path());
        self.requests.push(request);
        match self.routes.get_mut(&key) {
            Some(replies) if replies.len() > 1 => replies.pop_front().unwrap_or_else(not_found),
            Some(replies) => replies.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }
}

fn not_found() -> FakeReply {
    FakeReply::error(404, "", "not found")
}

/// A snapd stand-in listening on a socket in a temporary directory.
pub struct FakeDaemon {
    _dir: TempDir,
    socket: PathBuf,
    state: Arc<Mutex<DaemonState>>,
    accept: JoinHandle<()>,
}

impl FakeDaemon {
    /// Bind and start accepting. Must be called inside a tokio runtime.
    pub async fn start() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let socket = dir.path().join("snapd.socket");
        let listener = UnixListener::bind(&socket).expect("bind fake snapd socket");
        let state = Arc::new(Mutex::new(DaemonState::default()));

        let accept_state = Arc::clone(&state);
        let accept = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                accept_state.lock().connections += 1;
                tokio::spawn(serve(stream, Arc::clone(&accept_state)));
            }
        });
        Self { _dir: dir, socket, state, accept }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket
    }

    /// Client settings pointed at this daemon, with fast polling.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::from_env()
            .socket_path(self.socket.clone())
            .user_agent("snapd-client-test")
            .accept_language("en")
            .poll_interval(Duration::from_millis(10))
    }

    pub fn client(&self) -> Client {
        Client::new(self.config())
    }

    /// Queue a reply for `method path`. The last queued reply repeats.
    pub fn on(&self, method: &str, path: &str, reply: FakeReply) -> &Self {
        self.state.lock().routes.entry(format!("{method} {path}")).or_default().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Number of requests received for `method path`.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.state.lock().requests.iter().filter(|r| r.method == method && r.path() == path).count()
    }

    pub fn connections(&self) -> usize {
        self.state.lock().connections
    }
}

impl Drop for FakeDaemon {
    fn drop(&mut self) {
        self.accept.abort();
    }
}

async fn serve(mut stream: UnixStream, state: Arc<Mutex<DaemonState>>) {
    let mut buffer = Vec::new();
    while let Some(request) = read_request(&mut stream, &mut buffer).await {
        let reply = state.lock().route(request);
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        if reply.hang_up {
            return;
        }
        let written = match &reply.records {
            Some(records) => write_stream(&mut stream, &reply, records).await,
            None => stream.write_all(&reply.encode()).await,
        };
        if written.is_err() || reply.close {
            return;
        }
    }
}

async fn write_stream(stream: &mut UnixStream, reply: &FakeReply, records: &[Value]) -> std::io::Result<()> {
    stream.write_all(&reply.head("Transfer-Encoding: chunked\r\n")).await?;
    for record in records {
        let mut data = vec![RECORD_SEPARATOR];
        data.extend(record.to_string().into_bytes());
        data.push(b'\n');
        stream.write_all(format!("{:x}\r\n", data.len()).as_bytes()).await?;
        stream.write_all(&data).await?;
        stream.write_all(b"\r\n").await?;
    }
    stream.flush().await?;
    if let Some(gate) = &reply.gate {
        gate.notified().await;
    }
    stream.write_all(b"0\r\n\r\n").await
}

async fn read_request(stream: &mut UnixStream, buffer: &mut Vec<u8>) -> Option<RecordedRequest> {
    let end = loop {
        if let Some(end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break end;
        }
        read_more(stream, buffer).await?;
    };
    let head = String::from_utf8_lossy(&buffer[..end]).to_string();
    buffer.drain(..end + 4);

    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let headers: Headers = lines.filter_map(|line| line.split_once(':')).map(|(n, v)| (n, v.trim())).collect();

    let length: usize = headers.get("Content-Length").and_then(|v| v.parse().ok()).unwrap_or(0);
    while buffer.len() < length {
        read_more(stream, buffer).await?;
    }
    let body = buffer.drain(..length).collect();
    Some(RecordedRequest { method, target, headers, body })
}

async fn read_more(stream: &mut UnixStream, buffer: &mut Vec<u8>) -> Option<()> {
    let mut chunk = [0u8; 4096];
    match stream.read(&mut chunk).await {
        Ok(0) | Err(_) => None,
        Ok(n) => {
            buffer.extend_from_slice(&chunk[..n]);
            Some(())
        }
    }
}

/// A snap result entry as `/v2/find` returns it.
pub fn snap_json(name: &str) -> Value {
    json!({"name": name, "version": "1.0", "revision": "1", "summary": format!("The {name} snap"), "type": "app"})
}
