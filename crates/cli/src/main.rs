// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! snapc: a small command-line front end for snapd.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod exit_error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use snapd_client::{CancellationToken, Client, ClientConfig};
use tracing::debug;

use crate::commands::{Command, Context};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "snapc", version, about = "Talk to snapd", styles = color::styles())]
struct Cli {
    /// snapd socket (default: $SNAPD_SOCKET or /run/snapd.socket)
    #[arg(long, global = true)]
    socket: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> ExitCode {
    // Default to WARN so command output stays clean; RUST_LOG=debug shows traffic
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: cannot start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = ClientConfig::from_env();
    if let Some(socket) = cli.socket {
        config = config.socket_path(socket);
    }
    let ctx = Context { client: Client::new(config), format: cli.format, cancel: CancellationToken::new() };

    let result = runtime.block_on(async {
        let cancel = ctx.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupted");
                cancel.cancel();
            }
        });
        commands::handle(command, &ctx).await
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            let code = exit_error::exit_code(&e);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
