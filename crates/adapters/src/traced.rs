// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced scheduler wrapper for consistent observability

use async_trait::async_trait;
use jobsync_core::{JobDetail, JobKey, SchedulerAdapter, SchedulerError, Trigger, TriggerKey};
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds tracing to any SchedulerAdapter
#[derive(Clone)]
pub struct TracedScheduler<S> {
    inner: S,
}

impl<S> TracedScheduler<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[async_trait]
impl<S: SchedulerAdapter> SchedulerAdapter for TracedScheduler<S> {
    async fn get_job(&self, key: &JobKey) -> Result<Option<JobDetail>, SchedulerError> {
        let result = self.inner.get_job(key).await;
        tracing::trace!(job = %key, found = ?result.as_ref().map(Option::is_some).ok(), "looked up job");
        result
    }

    async fn get_trigger(&self, key: &TriggerKey) -> Result<Option<Trigger>, SchedulerError> {
        let result = self.inner.get_trigger(key).await;
        tracing::trace!(trigger = %key, found = ?result.as_ref().map(Option::is_some).ok(), "looked up trigger");
        result
    }

    async fn get_triggers_of_job(&self, key: &JobKey) -> Result<Vec<Trigger>, SchedulerError> {
        let result = self.inner.get_triggers_of_job(key).await;
        tracing::trace!(job = %key, count = ?result.as_ref().map(Vec::len).ok(), "listed job triggers");
        result
    }

    async fn add_job(&self, job: JobDetail, replace: bool) -> Result<(), SchedulerError> {
        let span = tracing::info_span!("scheduler.add_job", job = %job.key, replace);
        async move {
            tracing::debug!(durable = job.durable, job_type = job.job_type.name(), "starting");
            let start = Instant::now();
            let result = self.inner.add_job(job, replace).await;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed_ms(start), "job stored"),
                Err(e) => tracing::error!(elapsed_ms = elapsed_ms(start), error = %e, "add_job failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn schedule_job_with_trigger(
        &self,
        job: JobDetail,
        trigger: Trigger,
    ) -> Result<(), SchedulerError> {
        let span = tracing::info_span!(
            "scheduler.schedule_job",
            job = %job.key,
            trigger = %trigger.key,
        );
        async move {
            tracing::debug!(kind = %trigger.kind(), "starting");
            let start = Instant::now();
            let result = self.inner.schedule_job_with_trigger(job, trigger).await;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed_ms(start), "job scheduled"),
                // Already-exists is the race signal the processor retries on
                Err(e @ (SchedulerError::JobAlreadyExists(_)
                | SchedulerError::TriggerAlreadyExists(_))) => {
                    tracing::warn!(elapsed_ms = elapsed_ms(start), error = %e, "schedule lost race")
                }
                Err(e) => tracing::error!(elapsed_ms = elapsed_ms(start), error = %e, "schedule failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn schedule_trigger(&self, trigger: Trigger) -> Result<(), SchedulerError> {
        let span = tracing::info_span!(
            "scheduler.schedule_trigger",
            trigger = %trigger.key,
            job = %trigger.job_key,
        );
        async move {
            tracing::debug!(kind = %trigger.kind(), "starting");
            let start = Instant::now();
            let result = self.inner.schedule_trigger(trigger).await;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed_ms(start), "trigger scheduled"),
                Err(e @ SchedulerError::TriggerAlreadyExists(_)) => {
                    tracing::warn!(elapsed_ms = elapsed_ms(start), error = %e, "schedule lost race")
                }
                Err(e) => tracing::error!(elapsed_ms = elapsed_ms(start), error = %e, "schedule failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn reschedule_trigger(
        &self,
        key: &TriggerKey,
        trigger: Trigger,
    ) -> Result<bool, SchedulerError> {
        let span = tracing::info_span!("scheduler.reschedule_trigger", trigger = %key);
        async move {
            let start = Instant::now();
            let result = self.inner.reschedule_trigger(key, trigger).await;
            match &result {
                Ok(true) => tracing::info!(elapsed_ms = elapsed_ms(start), "trigger replaced"),
                Ok(false) => tracing::warn!(elapsed_ms = elapsed_ms(start), "trigger vanished"),
                Err(e) => tracing::error!(elapsed_ms = elapsed_ms(start), error = %e, "reschedule failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn delete_job(&self, key: &JobKey) -> Result<bool, SchedulerError> {
        let span = tracing::info_span!("scheduler.delete_job", job = %key);
        async move {
            let result = self.inner.delete_job(key).await;
            // Deleting an absent job is expected during pre-processing
            match &result {
                Ok(existed) => tracing::info!(existed, "deleted"),
                Err(e) => tracing::error!(error = %e, "delete failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn unschedule_trigger(&self, key: &TriggerKey) -> Result<bool, SchedulerError> {
        let span = tracing::info_span!("scheduler.unschedule_trigger", trigger = %key);
        async move {
            let result = self.inner.unschedule_trigger(key).await;
            match &result {
                Ok(existed) => tracing::info!(existed, "unscheduled"),
                Err(e) => tracing::error!(error = %e, "unschedule failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn job_group_names(&self) -> Result<Vec<String>, SchedulerError> {
        let result = self.inner.job_group_names().await;
        tracing::trace!(groups = ?result.as_ref().ok(), "listed job groups");
        result
    }

    async fn job_keys(&self, group: &str) -> Result<Vec<JobKey>, SchedulerError> {
        let result = self.inner.job_keys(group).await;
        tracing::trace!(group, count = ?result.as_ref().map(Vec::len).ok(), "listed jobs");
        result
    }

    async fn trigger_group_names(&self) -> Result<Vec<String>, SchedulerError> {
        let result = self.inner.trigger_group_names().await;
        tracing::trace!(groups = ?result.as_ref().ok(), "listed trigger groups");
        result
    }

    async fn trigger_keys(&self, group: &str) -> Result<Vec<TriggerKey>, SchedulerError> {
        let result = self.inner.trigger_keys(group).await;
        tracing::trace!(group, count = ?result.as_ref().map(Vec::len).ok(), "listed triggers");
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
