// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and usage output.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("install")
        .stdout_has("changes")
        .stdout_has("logs")
        .stdout_has("--socket");
}

#[test]
fn install_help_shows_flags() {
    cli().args(&["install", "--help"]).passes().stdout_has("--channel").stdout_has("--classic");
}

#[test]
fn version_flag_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unknown_command_fails() {
    cli().args(&["frobnicate"]).fails().code(2).stderr_has("frobnicate");
}
