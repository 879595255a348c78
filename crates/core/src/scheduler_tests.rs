// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    job_exists = { SchedulerError::JobAlreadyExists(JobKey::new("a", "g")), "job already exists: g.a" },
    trigger_exists = { SchedulerError::TriggerAlreadyExists(TriggerKey::new("t", "g")), "trigger already exists: g.t" },
    job_missing = { SchedulerError::JobNotFound(JobKey::new("a", "g")), "job not found: g.a" },
    storage = { SchedulerError::Storage("disk full".to_string()), "scheduler storage error: disk full" },
)]
fn error_messages_name_the_key(err: SchedulerError, expected: &str) {
    assert_eq!(err.to_string(), expected);
}
