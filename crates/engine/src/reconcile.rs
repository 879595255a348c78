// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation: applies declared jobs and triggers to a live scheduler.
//!
//! Jobs are applied in document order. Each job consumes the triggers that
//! target it; triggers left over afterwards (for jobs the document does not
//! define, or for jobs skipped as duplicates) are applied last, in document
//! order.
//!
//! Each trigger runs through a small state machine:
//!
//! ```text
//! CheckExisting ──found──▶ Reschedule ──replaced──▶ Done
//!      │                       │
//!      │                  vanished (retry)
//!      │                       ▼
//!      └──absent──▶ AddNew ──added──▶ Done
//!                     │
//!             lost race (retry) ──▶ CheckExisting
//! ```
//!
//! A combined job and trigger add that finds the job already stored by a
//! peer replaces the job, then retries the trigger on its own. Retry edges
//! are bounded by `max_race_retries` with linear backoff.

use crate::config::ProcessorConfig;
use crate::error::{EntityKind, ProcessError};
use jobsync_core::{JobDetail, SchedulerAdapter, SchedulerError, Trigger, TriggerKey};
use jobsync_document::Directives;
use std::collections::HashMap;

/// Outcome of a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub jobs_added: usize,
    pub jobs_skipped: usize,
    pub triggers_scheduled: usize,
    pub triggers_rescheduled: usize,
    pub triggers_skipped: usize,
    pub race_retries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    CheckExisting,
    AddNew,
    Reschedule,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Applied {
    Stored,
    Skipped,
}

/// Apply `jobs` and `triggers` to the scheduler under the given policy
pub async fn reconcile<S: SchedulerAdapter>(
    jobs: &[JobDetail],
    triggers: &[Trigger],
    directives: Directives,
    config: &ProcessorConfig,
    scheduler: &S,
) -> Result<ReconcileReport, ProcessError> {
    tracing::info!("adding {} jobs, {} triggers", jobs.len(), triggers.len());

    let mut reconciler = Reconciler {
        scheduler,
        directives,
        config,
        report: ReconcileReport::default(),
    };

    // Pending triggers are slots; applying one takes it
    let mut pending: Vec<Option<&Trigger>> = triggers.iter().map(Some).collect();
    let mut by_job: HashMap<String, Vec<usize>> = HashMap::new();
    for (slot, trigger) in triggers.iter().enumerate() {
        by_job
            .entry(trigger.job_key.fully_qualified_name())
            .or_default()
            .push(slot);
    }

    for job in jobs {
        let slots: Vec<usize> = by_job
            .get(&job.key.fully_qualified_name())
            .map(|slots| {
                slots
                    .iter()
                    .copied()
                    .filter(|&slot| pending[slot].is_some())
                    .collect()
            })
            .unwrap_or_default();
        reconciler.apply_job(job, &slots, &mut pending).await?;
    }

    for slot in pending.iter_mut() {
        if let Some(trigger) = slot.take() {
            reconciler.apply_trigger(trigger, None).await?;
        }
    }

    let report = reconciler.report;
    tracing::info!(
        jobs_added = report.jobs_added,
        jobs_skipped = report.jobs_skipped,
        triggers_scheduled = report.triggers_scheduled,
        triggers_rescheduled = report.triggers_rescheduled,
        triggers_skipped = report.triggers_skipped,
        race_retries = report.race_retries,
        "reconciled"
    );
    Ok(report)
}

struct Reconciler<'a, S> {
    scheduler: &'a S,
    directives: Directives,
    config: &'a ProcessorConfig,
    report: ReconcileReport,
}

impl<S: SchedulerAdapter> Reconciler<'_, S> {
    async fn apply_job<'t>(
        &mut self,
        job: &JobDetail,
        slots: &[usize],
        pending: &mut [Option<&'t Trigger>],
    ) -> Result<(), ProcessError> {
        let existing = self.scheduler.get_job(&job.key).await?;

        if existing.is_some() && !self.directives.overwrite_existing_data {
            if self.directives.ignore_duplicates {
                // Triggers stay pending and are applied against the stored job
                tracing::info!(job = %job.key, "not overwriting existing job");
                self.report.jobs_skipped += 1;
                return Ok(());
            }
            return Err(ProcessError::AlreadyExists {
                kind: EntityKind::Job,
                key: job.key.0.clone(),
            });
        }

        if !job.durable && slots.is_empty() {
            match &existing {
                None => {
                    return Err(ProcessError::Invariant(format!(
                        "non-durable job {} has no triggers",
                        job.key
                    )));
                }
                Some(stored) if stored.durable => {
                    if self.scheduler.get_triggers_of_job(&job.key).await?.is_empty() {
                        return Err(ProcessError::Invariant(format!(
                            "durable job {} has no triggers and cannot be redefined as non-durable without any",
                            job.key
                        )));
                    }
                }
                Some(_) => {}
            }
        }

        let triggers: Vec<&Trigger> = slots
            .iter()
            .filter_map(|&slot| pending[slot].take())
            .collect();

        if existing.is_some() || job.durable {
            tracing::info!(job = %job.key, replace = existing.is_some(), "storing job");
            self.scheduler.add_job(job.clone(), true).await?;
            self.report.jobs_added += 1;
            for trigger in triggers {
                self.apply_trigger(trigger, None).await?;
            }
            return Ok(());
        }

        // New non-durable job: it is stored together with its first trigger
        // that actually gets scheduled
        let mut carried = Some(job);
        for trigger in triggers {
            if self.apply_trigger(trigger, carried).await? == Applied::Stored {
                carried = None;
            }
        }
        if let Some(job) = carried {
            tracing::warn!(job = %job.key, "job not stored: every trigger was skipped");
        }
        Ok(())
    }

    /// Apply one trigger, storing `job` alongside it when given
    async fn apply_trigger(
        &mut self,
        trigger: &Trigger,
        mut job: Option<&JobDetail>,
    ) -> Result<Applied, ProcessError> {
        let mut step = Step::CheckExisting;
        let mut raced = false;
        let mut attempts = 0u32;

        loop {
            step = match step {
                Step::CheckExisting => match self.scheduler.get_trigger(&trigger.key).await? {
                    // A peer that beat us stored the same definition, so a
                    // lost race always resolves by replacing
                    Some(existing) if raced || self.directives.overwrite_existing_data => {
                        if existing.job_key != trigger.job_key {
                            tracing::warn!(
                                trigger = %trigger.key,
                                existing_job = %existing.job_key,
                                job = %trigger.job_key,
                                "replacing trigger that belongs to a different job"
                            );
                        }
                        Step::Reschedule
                    }
                    Some(_) if self.directives.ignore_duplicates => {
                        tracing::info!(trigger = %trigger.key, "not overwriting existing trigger");
                        self.report.triggers_skipped += 1;
                        return Ok(Applied::Skipped);
                    }
                    Some(_) => {
                        return Err(ProcessError::AlreadyExists {
                            kind: EntityKind::Trigger,
                            key: trigger.key.0.clone(),
                        });
                    }
                    None => Step::AddNew,
                },
                Step::AddNew => {
                    let result = match job {
                        Some(job) => {
                            self.scheduler
                                .schedule_job_with_trigger(job.clone(), trigger.clone())
                                .await
                        }
                        None => self.scheduler.schedule_trigger(trigger.clone()).await,
                    };
                    match result {
                        Ok(()) => {
                            if job.is_some() {
                                self.report.jobs_added += 1;
                            }
                            self.report.triggers_scheduled += 1;
                            Step::Done
                        }
                        Err(SchedulerError::TriggerAlreadyExists(_)) => {
                            self.back_off(&trigger.key, &mut attempts).await?;
                            raced = true;
                            Step::CheckExisting
                        }
                        // We saw no job before the combined add, so a peer stored it.
                        // Store ours over it and retry the trigger on its own.
                        Err(SchedulerError::JobAlreadyExists(_)) if job.is_some() => {
                            self.back_off(&trigger.key, &mut attempts).await?;
                            if let Some(carried) = job.take() {
                                self.scheduler.add_job(carried.clone(), true).await?;
                                self.report.jobs_added += 1;
                            }
                            raced = true;
                            Step::CheckExisting
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                Step::Reschedule => {
                    if let Some(carried) = job.take() {
                        self.scheduler.add_job(carried.clone(), true).await?;
                        self.report.jobs_added += 1;
                    }
                    if self
                        .scheduler
                        .reschedule_trigger(&trigger.key, trigger.clone())
                        .await?
                    {
                        self.report.triggers_rescheduled += 1;
                        Step::Done
                    } else {
                        // Removed by a peer between our lookup and the replace
                        self.back_off(&trigger.key, &mut attempts).await?;
                        Step::CheckExisting
                    }
                }
                Step::Done => return Ok(Applied::Stored),
            };
        }
    }

    async fn back_off(&mut self, key: &TriggerKey, attempts: &mut u32) -> Result<(), ProcessError> {
        *attempts += 1;
        self.report.race_retries += 1;
        if *attempts > self.config.max_race_retries {
            tracing::error!(trigger = %key, attempts = *attempts, "race retries exhausted");
            return Err(ProcessError::RaceRetriesExhausted { key: key.clone() });
        }
        tracing::warn!(trigger = %key, attempt = *attempts, "lost race with another scheduler, retrying");
        let delay = self.config.race_backoff * *attempts;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
