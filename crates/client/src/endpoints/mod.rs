// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed daemon endpoints.

mod aliases;
mod assertions;
mod changes;
mod download;
mod logs;
mod notices;
mod snaps;
mod system;

pub use aliases::{GetAliases, Prefer};
pub use assertions::{AddAssertions, GetAssertions};
pub use changes::{AbortChange, ChangeFilter, GetChange, GetChanges};
pub use download::{DownloadSnap, DownloadedSnap};
pub use logs::GetLogs;
pub use notices::GetNotices;
pub use snaps::{Action, FindSnaps, GetSnap, ListSnaps, SnapAction};
pub use system::GetSystemInfo;
