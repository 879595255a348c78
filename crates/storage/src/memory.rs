// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory scheduler

use crate::state::SchedulerState;
use async_trait::async_trait;
use jobsync_core::{
    JobDetail, JobKey, SchedulerAdapter, SchedulerError, Trigger, TriggerKey,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// Scheduler backed by a shared [`SchedulerState`].
///
/// Clones share the same state, so a clone can be handed to a processor and
/// the original inspected afterwards.
#[derive(Clone, Default)]
pub struct MemoryScheduler {
    inner: Arc<Mutex<SchedulerState>>,
}

impl MemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: SchedulerState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> SchedulerState {
        self.lock().clone()
    }

    /// Run `f` against the state while holding the lock
    pub fn with_state<R>(&self, f: impl FnOnce(&mut SchedulerState) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SchedulerAdapter for MemoryScheduler {
    async fn get_job(&self, key: &JobKey) -> Result<Option<JobDetail>, SchedulerError> {
        Ok(self.lock().job(key).cloned())
    }

    async fn get_trigger(&self, key: &TriggerKey) -> Result<Option<Trigger>, SchedulerError> {
        Ok(self.lock().trigger(key).cloned())
    }

    async fn get_triggers_of_job(&self, key: &JobKey) -> Result<Vec<Trigger>, SchedulerError> {
        Ok(self.lock().triggers_of_job(key))
    }

    async fn add_job(&self, job: JobDetail, replace: bool) -> Result<(), SchedulerError> {
        self.lock().add_job(job, replace)
    }

    async fn schedule_job_with_trigger(
        &self,
        job: JobDetail,
        trigger: Trigger,
    ) -> Result<(), SchedulerError> {
        self.lock().add_job_with_trigger(job, trigger)
    }

    async fn schedule_trigger(&self, trigger: Trigger) -> Result<(), SchedulerError> {
        self.lock().add_trigger(trigger)
    }

    async fn reschedule_trigger(
        &self,
        key: &TriggerKey,
        trigger: Trigger,
    ) -> Result<bool, SchedulerError> {
        self.lock().replace_trigger(key, trigger)
    }

    async fn delete_job(&self, key: &JobKey) -> Result<bool, SchedulerError> {
        Ok(self.lock().remove_job(key))
    }

    async fn unschedule_trigger(&self, key: &TriggerKey) -> Result<bool, SchedulerError> {
        Ok(self.lock().remove_trigger(key))
    }

    async fn job_group_names(&self) -> Result<Vec<String>, SchedulerError> {
        Ok(self.lock().job_group_names())
    }

    async fn job_keys(&self, group: &str) -> Result<Vec<JobKey>, SchedulerError> {
        Ok(self.lock().job_keys(group))
    }

    async fn trigger_group_names(&self) -> Result<Vec<String>, SchedulerError> {
        Ok(self.lock().trigger_group_names())
    }

    async fn trigger_keys(&self, group: &str) -> Result<Vec<TriggerKey>, SchedulerError> {
        Ok(self.lock().trigger_keys(group))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
