// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress de-duplication and resolution for tracked changes.

use snapd_core::Change;

use crate::config::ProgressFn;

/// What to do with a freshly polled change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not ready yet; poll again.
    Pending,
    Cancelled,
    /// Ready with a daemon-reported error.
    Failed(String),
    Ready,
}

/// Remembers the last snapshot of one change and reports only real
/// differences to the progress callback.
#[derive(Default)]
pub struct ChangeTracker {
    last: Option<Change>,
    progress: Option<ProgressFn>,
}

impl ChangeTracker {
    pub fn new(progress: Option<ProgressFn>) -> Self {
        Self { last: None, progress }
    }

    /// Record a snapshot. Returns true, after notifying progress, if it
    /// differs from the previous one.
    pub fn observe(&mut self, change: &Change) -> bool {
        if self.last.as_ref() == Some(change) {
            return false;
        }
        if let Some(progress) = &self.progress {
            progress(change);
        }
        self.last = Some(change.clone());
        true
    }

    pub fn last(&self) -> Option<&Change> {
        self.last.as_ref()
    }

    /// Cancellation beats a daemon error, which beats success.
    pub fn outcome(change: &Change, cancelled: bool) -> Outcome {
        if !change.ready {
            return Outcome::Pending;
        }
        if cancelled {
            return Outcome::Cancelled;
        }
        match change.error() {
            Some(message) => Outcome::Failed(message.to_string()),
            None => Outcome::Ready,
        }
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
