// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: run `snapc` against a scripted daemon and assert on
//! its output.

use std::path::PathBuf;
use std::sync::OnceLock;

pub use serde_json::json;
pub use snapd_client::test_support::{snap_json, FakeDaemon, FakeReply, RecordedRequest};
pub use snapd_core::{Change, Task, TaskProgress};

/// Path to the `snapc` binary, building it if this test run did not.
///
/// Test executables live in `target/<profile>/deps`; workspace binaries sit
/// one level up.
fn snapc_bin() -> PathBuf {
    static BIN: OnceLock<PathBuf> = OnceLock::new();
    BIN.get_or_init(|| {
        let exe = std::env::current_exe().expect("locate test executable");
        let mut dir = exe.parent().expect("test executable directory").to_path_buf();
        if dir.ends_with("deps") {
            dir.pop();
        }
        let path = dir.join(format!("snapc{}", std::env::consts::EXE_SUFFIX));
        if !path.exists() {
            let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
            let mut build = std::process::Command::new(cargo);
            build.args(["build", "--quiet", "-p", "snapc", "--bin", "snapc"]);
            if dir.ends_with("release") {
                build.arg("--release");
            }
            let status = build.status().expect("run cargo build");
            assert!(status.success(), "building snapc failed");
        }
        path
    })
    .clone()
}

/// A `snapc` invocation with no daemon behind it.
pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::new(snapc_bin());
    cmd.env("NO_COLOR", "1").env_remove("COLOR").env_remove("SNAPD_SOCKET").env_remove("RUST_LOG");
    for locale in ["LANGUAGE", "LC_ALL", "LC_MESSAGES"] {
        cmd.env_remove(locale);
    }
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn run(mut self) -> RunAssert {
        let output = self.cmd.output().expect("run snapc");
        RunAssert {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert_eq!(run.code, Some(0), "snapc failed\nstdout:\n{}\nstderr:\n{}", run.stdout, run.stderr);
        run
    }

    /// Run and require a non-zero exit code.
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert_ne!(run.code, Some(0), "snapc unexpectedly passed\nstdout:\n{}", run.stdout);
        run
    }
}

pub struct RunAssert {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl RunAssert {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(&self, needle: &str) -> &Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_eq(&self, expected: &str) -> &Self {
        similar_asserts::assert_eq!(self.stdout.as_str(), expected);
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn code(&self, expected: i32) -> &Self {
        assert_eq!(self.code, Some(expected), "stderr:\n{}", self.stderr);
        self
    }
}

/// A fake snapd served from its own runtime while `snapc` runs as a child
/// process.
pub struct Daemon {
    fake: FakeDaemon,
    _runtime: tokio::runtime::Runtime,
}

impl Daemon {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("build runtime");
        let fake = runtime.block_on(FakeDaemon::start());
        Self { fake, _runtime: runtime }
    }

    pub fn on(&self, method: &str, path: &str, reply: FakeReply) -> &Self {
        self.fake.on(method, path, reply);
        self
    }

    /// `snapc --socket <this daemon>`.
    pub fn cli(&self) -> CliBuilder {
        let socket = self.fake.socket_path().display().to_string();
        cli().args(&["--socket", &socket]).env("SNAPD_CLIENT_POLL_MS", "5")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.fake.requests()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.fake.count(method, path)
    }
}
