// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking facade over [`Client`].

use snapd_core::{Change, Maintenance, Snap, SystemInfo};
use tokio::runtime::{Builder, Runtime};

use crate::client::Client;
use crate::config::{CallOptions, ClientConfig};
use crate::endpoint::Endpoint;
use crate::error::ClientError;

/// Runs each call to completion on a private current-thread runtime.
///
/// Must not be used from inside an async context or from a progress
/// callback: blocking on the shared connection from there deadlocks.
pub struct BlockingClient {
    client: Client,
    runtime: Runtime,
}

impl BlockingClient {
    pub fn new(config: ClientConfig) -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { client: Client::new(config), runtime })
    }

    /// The async client sharing this client's connection state.
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn maintenance(&self) -> Option<Maintenance> {
        self.client.maintenance()
    }

    pub fn call<E: Endpoint>(&self, endpoint: E, options: CallOptions) -> Result<E::Output, ClientError> {
        self.runtime.block_on(self.client.call(endpoint, options))
    }

    pub fn system_info(&self) -> Result<SystemInfo, ClientError> {
        self.runtime.block_on(self.client.system_info())
    }

    pub fn list_snaps(&self) -> Result<Vec<Snap>, ClientError> {
        self.runtime.block_on(self.client.list_snaps())
    }

    pub fn find(&self, query: &str) -> Result<Vec<Snap>, ClientError> {
        self.runtime.block_on(self.client.find(query))
    }

    pub fn install(&self, name: &str, options: CallOptions) -> Result<Change, ClientError> {
        self.runtime.block_on(self.client.install(name, options))
    }

    pub fn remove(&self, name: &str, options: CallOptions) -> Result<Change, ClientError> {
        self.runtime.block_on(self.client.remove(name, options))
    }

    pub fn get_change(&self, id: &str) -> Result<Change, ClientError> {
        self.runtime.block_on(self.client.get_change(id))
    }
}
