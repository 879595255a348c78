// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake scheduler for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use jobsync_core::{JobDetail, JobKey, SchedulerAdapter, SchedulerError, Trigger, TriggerKey};
use jobsync_storage::{MemoryScheduler, SchedulerState};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded scheduler call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerCall {
    GetJob(JobKey),
    GetTrigger(TriggerKey),
    GetTriggersOfJob(JobKey),
    AddJob { job: JobKey, replace: bool },
    ScheduleJobWithTrigger { job: JobKey, trigger: TriggerKey },
    ScheduleTrigger(TriggerKey),
    RescheduleTrigger(TriggerKey),
    DeleteJob(JobKey),
    UnscheduleTrigger(TriggerKey),
    JobGroupNames,
    JobKeys(String),
    TriggerGroupNames,
    TriggerKeys(String),
}

impl SchedulerCall {
    /// True for calls that change scheduler contents
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            SchedulerCall::AddJob { .. }
                | SchedulerCall::ScheduleJobWithTrigger { .. }
                | SchedulerCall::ScheduleTrigger(_)
                | SchedulerCall::RescheduleTrigger(_)
                | SchedulerCall::DeleteJob(_)
                | SchedulerCall::UnscheduleTrigger(_)
        )
    }
}

/// What a simulated peer node stores just before our add lands
#[derive(Debug, Clone)]
struct PeerInsert {
    job: Option<JobDetail>,
    trigger: Option<Trigger>,
}

#[derive(Default)]
struct Interference {
    inserts: HashMap<TriggerKey, VecDeque<PeerInsert>>,
    removals: HashMap<TriggerKey, usize>,
}

/// Fake scheduler for testing.
///
/// Stores into a [`MemoryScheduler`] and records every call. Peer nodes
/// can be simulated by queueing interference that fires between the
/// processor's existence check and its write.
#[derive(Clone, Default)]
pub struct FakeScheduler {
    store: MemoryScheduler,
    calls: Arc<Mutex<Vec<SchedulerCall>>>,
    interference: Arc<Mutex<Interference>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake seeded with existing contents
    pub fn with_state(state: SchedulerState) -> Self {
        Self {
            store: MemoryScheduler::from_state(state),
            ..Self::default()
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SchedulerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded calls that change scheduler contents
    pub fn mutations(&self) -> Vec<SchedulerCall> {
        self.calls()
            .into_iter()
            .filter(SchedulerCall::is_mutation)
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Copy of the stored jobs and triggers
    pub fn snapshot(&self) -> SchedulerState {
        self.store.snapshot()
    }

    pub fn store(&self) -> &MemoryScheduler {
        &self.store
    }

    /// Before the next add of `trigger.key`, a peer stores `trigger` (and
    /// `job`, when given) so the add fails with an already-exists error.
    pub fn race_add(&self, job: Option<JobDetail>, trigger: Trigger) {
        self.queue_insert(
            trigger.key.clone(),
            PeerInsert {
                job,
                trigger: Some(trigger),
            },
        );
    }

    /// Before the next add of `before`, a peer stores `job`, together with
    /// `trigger` when given. The add then fails only on the job.
    pub fn race_add_job(&self, before: TriggerKey, job: JobDetail, trigger: Option<Trigger>) {
        self.queue_insert(
            before,
            PeerInsert {
                job: Some(job),
                trigger,
            },
        );
    }

    fn queue_insert(&self, before: TriggerKey, insert: PeerInsert) {
        self.interference
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .inserts
            .entry(before)
            .or_default()
            .push_back(insert);
    }

    /// Before the next reschedule of `key`, a peer unschedules it
    pub fn race_reschedule(&self, key: TriggerKey) {
        *self
            .interference
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .removals
            .entry(key)
            .or_default() += 1;
    }

    fn record(&self, call: SchedulerCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn interfere_with_add(&self, key: &TriggerKey) -> Result<(), SchedulerError> {
        let insert = self
            .interference
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .inserts
            .get_mut(key)
            .and_then(VecDeque::pop_front);
        let Some(peer) = insert else {
            return Ok(());
        };
        self.store.with_state(|state| {
            if let Some(job) = peer.job {
                state.add_job(job, true)?;
            }
            match peer.trigger {
                Some(trigger) => state.add_trigger(trigger),
                None => Ok(()),
            }
        })
    }

    fn interfere_with_reschedule(&self, key: &TriggerKey) {
        let fire = {
            let mut interference = self.interference.lock().unwrap_or_else(|e| e.into_inner());
            match interference.removals.get_mut(key) {
                Some(n) if *n > 0 => {
                    *n -= 1;
                    true
                }
                _ => false,
            }
        };
        if fire {
            self.store.with_state(|state| state.remove_trigger(key));
        }
    }
}

#[async_trait]
impl SchedulerAdapter for FakeScheduler {
    async fn get_job(&self, key: &JobKey) -> Result<Option<JobDetail>, SchedulerError> {
        self.record(SchedulerCall::GetJob(key.clone()));
        self.store.get_job(key).await
    }

    async fn get_trigger(&self, key: &TriggerKey) -> Result<Option<Trigger>, SchedulerError> {
        self.record(SchedulerCall::GetTrigger(key.clone()));
        self.store.get_trigger(key).await
    }

    async fn get_triggers_of_job(&self, key: &JobKey) -> Result<Vec<Trigger>, SchedulerError> {
        self.record(SchedulerCall::GetTriggersOfJob(key.clone()));
        self.store.get_triggers_of_job(key).await
    }

    async fn add_job(&self, job: JobDetail, replace: bool) -> Result<(), SchedulerError> {
        self.record(SchedulerCall::AddJob {
            job: job.key.clone(),
            replace,
        });
        self.store.add_job(job, replace).await
    }

    async fn schedule_job_with_trigger(
        &self,
        job: JobDetail,
        trigger: Trigger,
    ) -> Result<(), SchedulerError> {
        self.record(SchedulerCall::ScheduleJobWithTrigger {
            job: job.key.clone(),
            trigger: trigger.key.clone(),
        });
        self.interfere_with_add(&trigger.key)?;
        self.store.schedule_job_with_trigger(job, trigger).await
    }

    async fn schedule_trigger(&self, trigger: Trigger) -> Result<(), SchedulerError> {
        self.record(SchedulerCall::ScheduleTrigger(trigger.key.clone()));
        self.interfere_with_add(&trigger.key)?;
        self.store.schedule_trigger(trigger).await
    }

    async fn reschedule_trigger(
        &self,
        key: &TriggerKey,
        trigger: Trigger,
    ) -> Result<bool, SchedulerError> {
        self.record(SchedulerCall::RescheduleTrigger(key.clone()));
        self.interfere_with_reschedule(key);
        self.store.reschedule_trigger(key, trigger).await
    }

    async fn delete_job(&self, key: &JobKey) -> Result<bool, SchedulerError> {
        self.record(SchedulerCall::DeleteJob(key.clone()));
        self.store.delete_job(key).await
    }

    async fn unschedule_trigger(&self, key: &TriggerKey) -> Result<bool, SchedulerError> {
        self.record(SchedulerCall::UnscheduleTrigger(key.clone()));
        self.store.unschedule_trigger(key).await
    }

    async fn job_group_names(&self) -> Result<Vec<String>, SchedulerError> {
        self.record(SchedulerCall::JobGroupNames);
        self.store.job_group_names().await
    }

    async fn job_keys(&self, group: &str) -> Result<Vec<JobKey>, SchedulerError> {
        self.record(SchedulerCall::JobKeys(group.to_string()));
        self.store.job_keys(group).await
    }

    async fn trigger_group_names(&self) -> Result<Vec<String>, SchedulerError> {
        self.record(SchedulerCall::TriggerGroupNames);
        self.store.trigger_group_names().await
    }

    async fn trigger_keys(&self, group: &str) -> Result<Vec<TriggerKey>, SchedulerError> {
        self.record(SchedulerCall::TriggerKeys(group.to_string()));
        self.store.trigger_keys(group).await
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
