// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod changes;
mod help;
mod logs;
mod snaps;
mod system;
