// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The live scheduler as seen by the document processor.
//!
//! Storage, locking and trigger firing all happen behind this trait. The
//! processor only issues the calls below, one at a time.

use crate::job::JobDetail;
use crate::key::{JobKey, TriggerKey};
use crate::trigger::Trigger;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from scheduler operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("job already exists: {0}")]
    JobAlreadyExists(JobKey),
    #[error("trigger already exists: {0}")]
    TriggerAlreadyExists(TriggerKey),
    #[error("job not found: {0}")]
    JobNotFound(JobKey),
    #[error("scheduler storage error: {0}")]
    Storage(String),
}

/// Operations the document processor drives on a scheduler
#[async_trait]
pub trait SchedulerAdapter: Clone + Send + Sync + 'static {
    async fn get_job(&self, key: &JobKey) -> Result<Option<JobDetail>, SchedulerError>;

    async fn get_trigger(&self, key: &TriggerKey) -> Result<Option<Trigger>, SchedulerError>;

    async fn get_triggers_of_job(&self, key: &JobKey) -> Result<Vec<Trigger>, SchedulerError>;

    /// Store a job without scheduling it.
    ///
    /// Fails with `JobAlreadyExists` when the key is taken and `replace` is
    /// false. A non-durable job may only be stored this way with `replace`.
    async fn add_job(&self, job: JobDetail, replace: bool) -> Result<(), SchedulerError>;

    /// Store a new job together with its first trigger, atomically
    async fn schedule_job_with_trigger(
        &self,
        job: JobDetail,
        trigger: Trigger,
    ) -> Result<(), SchedulerError>;

    /// Store a trigger for a job that already exists
    async fn schedule_trigger(&self, trigger: Trigger) -> Result<(), SchedulerError>;

    /// Replace the trigger stored under `key`.
    ///
    /// Returns false when no trigger is stored under `key`.
    async fn reschedule_trigger(
        &self,
        key: &TriggerKey,
        trigger: Trigger,
    ) -> Result<bool, SchedulerError>;

    /// Delete a job and all its triggers. Returns false if it did not exist.
    async fn delete_job(&self, key: &JobKey) -> Result<bool, SchedulerError>;

    /// Remove a trigger. Returns false if it did not exist.
    async fn unschedule_trigger(&self, key: &TriggerKey) -> Result<bool, SchedulerError>;

    async fn job_group_names(&self) -> Result<Vec<String>, SchedulerError>;

    async fn job_keys(&self, group: &str) -> Result<Vec<JobKey>, SchedulerError>;

    async fn trigger_group_names(&self) -> Result<Vec<String>, SchedulerError>;

    async fn trigger_keys(&self, group: &str) -> Result<Vec<TriggerKey>, SchedulerError>;
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
