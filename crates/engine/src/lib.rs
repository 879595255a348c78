// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobsync engine: applies scheduling documents to a live scheduler
//!
//! ```text
//! text → Processor::process → LoadedDocument
//!      → Processor::schedule → pre-processing deletes → reconcile
//! ```

mod config;
mod error;
mod preprocess;
mod processor;
mod reconcile;

pub use config::{ConfigError, ProcessorConfig};
pub use error::{EntityKind, ProcessError};
pub use preprocess::{run_pre_processing, NeverDelete, PreProcessReport};
pub use processor::{LoadedDocument, Processor, ScheduleReport};
pub use reconcile::{reconcile, ReconcileReport};
