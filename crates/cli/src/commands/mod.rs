// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use snapd_client::{CallOptions, CancellationToken, Client};

use crate::output::{self, OutputFormat};

pub mod changes;
pub mod logs;
pub mod snaps;
pub mod system;

/// What every command handler gets.
pub struct Context {
    pub client: Client,
    pub format: OutputFormat,
    /// Cancelled on Ctrl-C.
    pub cancel: CancellationToken,
}

impl Context {
    /// Options for a call that may start a change: cancellable, and in text
    /// mode printing a line whenever the change moves.
    pub fn change_options(&self) -> CallOptions {
        let options = CallOptions::new().cancel(self.cancel.clone());
        match self.format {
            OutputFormat::Text => options.on_progress(|change| println!("{}", output::progress_line(change))),
            OutputFormat::Json => options,
        }
    }

    pub fn options(&self) -> CallOptions {
        CallOptions::new().cancel(self.cancel.clone())
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show client and snapd versions
    Version,
    /// List installed snaps
    List {
        /// Only these snaps
        snaps: Vec<String>,
        /// Include disabled revisions
        #[arg(long)]
        all: bool,
    },
    /// Show details of an installed snap
    Info {
        snap: String,
    },
    /// Search the store
    Find {
        query: String,
        /// Match the snap name exactly
        #[arg(long)]
        name: bool,
    },
    /// Install a snap
    Install {
        snap: String,
        #[arg(long)]
        channel: Option<String>,
        /// Allow classic confinement
        #[arg(long)]
        classic: bool,
    },
    /// Remove a snap
    Remove {
        snap: String,
        /// Do not keep a snapshot of the snap's data
        #[arg(long)]
        purge: bool,
    },
    /// Refresh a snap
    Refresh {
        snap: String,
        #[arg(long)]
        channel: Option<String>,
    },
    /// Make a snap's aliases take precedence over conflicting ones
    Prefer {
        snap: String,
    },
    /// List changes
    Changes {
        /// Only changes affecting this snap
        snap: Option<String>,
    },
    /// Show the tasks of a change
    Change {
        id: String,
    },
    /// Abort a change that is still running
    Abort {
        id: String,
    },
    /// Show service logs
    Logs {
        /// Snap or snap.app names; all services when empty
        names: Vec<String>,
        /// Number of past lines to show (-1 for all)
        #[arg(short = 'n', long, default_value = "10", allow_negative_numbers = true)]
        lines: i64,
        /// Keep streaming new lines
        #[arg(short, long)]
        follow: bool,
    },
    /// Print assertions of a type
    Known {
        assertion_type: String,
        /// header=value filters
        filters: Vec<String>,
    },
    /// List recent notices
    Notices,
}

pub async fn handle(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Version => system::version(ctx).await,
        Command::List { snaps, all } => snaps::list(ctx, snaps, all).await,
        Command::Info { snap } => snaps::info(ctx, &snap).await,
        Command::Find { query, name } => snaps::find(ctx, &query, name).await,
        Command::Install { snap, channel, classic } => snaps::install(ctx, &snap, channel, classic).await,
        Command::Remove { snap, purge } => snaps::remove(ctx, &snap, purge).await,
        Command::Refresh { snap, channel } => snaps::refresh(ctx, &snap, channel).await,
        Command::Prefer { snap } => snaps::prefer(ctx, &snap).await,
        Command::Changes { snap } => changes::list(ctx, snap.as_deref()).await,
        Command::Change { id } => changes::show(ctx, &id).await,
        Command::Abort { id } => changes::abort(ctx, &id).await,
        Command::Logs { names, lines, follow } => logs::logs(ctx, names, lines, follow).await,
        Command::Known { assertion_type, filters } => system::known(ctx, &assertion_type, &filters).await,
        Command::Notices => system::notices(ctx).await,
    }
}
