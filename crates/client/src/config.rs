// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client construction settings and per-call options.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use snapd_core::{AuthData, Change};
use snapd_wire::Headers;
use tokio_util::sync::CancellationToken;

use crate::{env, language};

/// Settings a [`crate::Client`] is built from.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub socket_path: PathBuf,
    pub user_agent: String,
    pub accept_language: String,
    pub allow_interaction: bool,
    pub poll_interval: Duration,
    pub auth: Option<AuthData>,
}

impl ClientConfig {
    /// Defaults, overridden by `SNAPD_SOCKET`, `SNAPD_CLIENT_POLL_MS` and the
    /// locale variables.
    pub fn from_env() -> Self {
        Self {
            socket_path: env::socket_path(),
            user_agent: env::USER_AGENT.to_string(),
            accept_language: language::accept_language(&env::language_names()),
            allow_interaction: true,
            poll_interval: env::poll_interval(),
            auth: None,
        }
    }

    snapd_core::setters! {
        into {
            socket_path: PathBuf,
            user_agent: String,
            accept_language: String,
        }
        set {
            allow_interaction: bool,
            poll_interval: Duration,
        }
        option {
            auth: AuthData,
        }
    }
}

/// The mutable part of the configuration, shared by every clone of a client.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub user_agent: String,
    pub accept_language: String,
    pub allow_interaction: bool,
    pub auth: Option<AuthData>,
}

impl Settings {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            allow_interaction: config.allow_interaction,
            auth: config.auth.clone(),
        }
    }

    /// Headers sent ahead of every request's own headers.
    pub fn common_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Host", "");
        headers.insert("Connection", "keep-alive");
        if !self.user_agent.is_empty() {
            headers.insert("User-Agent", self.user_agent.as_str());
        }
        headers.insert("Accept-Language", self.accept_language.as_str());
        if self.allow_interaction {
            headers.insert("X-Allow-Interaction", "true");
        }
        if let Some(auth) = &self.auth {
            headers.insert("Authorization", auth.authorization_header());
        }
        headers
    }
}

/// Called with each new snapshot of a change being tracked.
pub type ProgressFn = Arc<dyn Fn(&Change) + Send + Sync>;

/// Per-call cancellation and progress reporting.
#[derive(Clone, Default)]
pub struct CallOptions {
    pub cancel: CancellationToken,
    pub progress: Option<ProgressFn>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn on_progress(mut self, progress: impl Fn(&Change) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }
}

impl std::fmt::Debug for CallOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallOptions")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::from_env().user_agent("test/1.0").accept_language("en-gb, en;q=0.9")
    }

    #[test]
    fn common_headers_in_order() {
        let config = config().auth(AuthData::new("m").discharge("d"));
        let headers = Settings::from_config(&config).common_headers();

        let names: Vec<_> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            ["Host", "Connection", "User-Agent", "Accept-Language", "X-Allow-Interaction", "Authorization"]
        );
        assert_eq!(headers.get("host"), Some(""));
        assert_eq!(headers.get("authorization"), Some(r#"Macaroon root="m",discharge="d""#));
    }

    #[test]
    fn interaction_and_auth_are_optional() {
        let headers = Settings::from_config(&config().allow_interaction(false)).common_headers();

        assert!(!headers.contains("X-Allow-Interaction"));
        assert!(!headers.contains("Authorization"));
        assert_eq!(headers.get("User-Agent"), Some("test/1.0"));
    }
}
