// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the client crate.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SOCKET: &str = "/run/snapd.socket";

/// Default `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("snapd-client/", env!("CARGO_PKG_VERSION"));

/// Socket path: `SNAPD_SOCKET` > `/run/snapd.socket`
pub fn socket_path() -> PathBuf {
    std::env::var("SNAPD_SOCKET")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOCKET))
}

/// Change poll interval (default 100ms, configurable via `SNAPD_CLIENT_POLL_MS`).
pub fn poll_interval() -> Duration {
    std::env::var("SNAPD_CLIENT_POLL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(100))
}

/// Preferred message locales, colon-separated.
///
/// `LANGUAGE` > `LC_ALL` > `LC_MESSAGES` > `LANG`; the first non-empty wins.
pub fn language_names() -> String {
    ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn socket_path_defaults_and_overrides() {
        std::env::remove_var("SNAPD_SOCKET");
        assert_eq!(socket_path(), PathBuf::from(DEFAULT_SOCKET));

        std::env::set_var("SNAPD_SOCKET", "/tmp/test.socket");
        assert_eq!(socket_path(), PathBuf::from("/tmp/test.socket"));
        std::env::remove_var("SNAPD_SOCKET");
    }

    #[test]
    #[serial]
    fn bad_poll_interval_falls_back() {
        std::env::set_var("SNAPD_CLIENT_POLL_MS", "fast");
        assert_eq!(poll_interval(), Duration::from_millis(100));

        std::env::set_var("SNAPD_CLIENT_POLL_MS", "25");
        assert_eq!(poll_interval(), Duration::from_millis(25));
        std::env::remove_var("SNAPD_CLIENT_POLL_MS");
    }

    #[test]
    #[serial]
    fn language_skips_empty_variables() {
        std::env::set_var("LANGUAGE", "");
        std::env::remove_var("LC_ALL");
        std::env::set_var("LC_MESSAGES", "fr_FR.UTF-8");
        std::env::set_var("LANG", "en_US.UTF-8");

        assert_eq!(language_names(), "fr_FR.UTF-8");
        std::env::remove_var("LANGUAGE");
        std::env::remove_var("LC_MESSAGES");
    }
}
