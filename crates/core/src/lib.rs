// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobsync-core: the job/trigger model shared by every jobsync crate
//!
//! This crate provides:
//! - Keys, job details, triggers and their data maps
//! - Misfire instruction tables
//! - The scheduler trait the processor drives, and the type loader trait
//! - A clock abstraction

pub mod clock;
pub mod job;
pub mod job_type;
pub mod key;
pub mod misfire;
pub mod scheduler;
pub mod trigger;

pub use clock::{Clock, FakeClock, SystemClock};
pub use job::{JobDataMap, JobDetail, JobType};
pub use job_type::{AnyTypeLoader, JobTypeRegistry, TypeLoadError, TypeLoader};
pub use key::{JobKey, Key, TriggerKey, ALL_GROUPS, DEFAULT_GROUP};
pub use scheduler::{SchedulerAdapter, SchedulerError};
pub use trigger::{RepeatCount, Trigger, TriggerKind, TriggerSchedule};
