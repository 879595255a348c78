// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobsync-storage: reference scheduler storage
//!
//! An in-memory [`SchedulerAdapter`](jobsync_core::SchedulerAdapter) with
//! JSON snapshot persistence, used by the CLI and by tests.

mod memory;
mod snapshot;
mod state;

pub use memory::MemoryScheduler;
pub use snapshot::{load_snapshot, save_snapshot, StorageError};
pub use state::SchedulerState;
