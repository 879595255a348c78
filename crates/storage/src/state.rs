// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs and triggers held by the in-memory scheduler

use jobsync_core::{JobDetail, JobKey, SchedulerError, Trigger, TriggerKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Stored scheduler contents.
///
/// A non-durable job lives only as long as it has triggers: removing its
/// last trigger removes the job too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Snapshot", into = "Snapshot")]
pub struct SchedulerState {
    jobs: BTreeMap<JobKey, JobDetail>,
    triggers: BTreeMap<TriggerKey, Trigger>,
}

/// Serialized form; JSON object keys must be strings, so keys stay inside
/// the records
#[derive(Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    jobs: Vec<JobDetail>,
    #[serde(default)]
    triggers: Vec<Trigger>,
}

impl From<Snapshot> for SchedulerState {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            jobs: snapshot
                .jobs
                .into_iter()
                .map(|j| (j.key.clone(), j))
                .collect(),
            triggers: snapshot
                .triggers
                .into_iter()
                .map(|t| (t.key.clone(), t))
                .collect(),
        }
    }
}

impl From<SchedulerState> for Snapshot {
    fn from(state: SchedulerState) -> Self {
        Self {
            jobs: state.jobs.into_values().collect(),
            triggers: state.triggers.into_values().collect(),
        }
    }
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(&self, key: &JobKey) -> Option<&JobDetail> {
        self.jobs.get(key)
    }

    pub fn trigger(&self, key: &TriggerKey) -> Option<&Trigger> {
        self.triggers.get(key)
    }

    pub fn jobs(&self) -> impl Iterator<Item = &JobDetail> {
        self.jobs.values()
    }

    pub fn triggers(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.values()
    }

    pub fn triggers_of_job(&self, key: &JobKey) -> Vec<Trigger> {
        self.triggers
            .values()
            .filter(|t| &t.job_key == key)
            .cloned()
            .collect()
    }

    pub fn add_job(&mut self, job: JobDetail, replace: bool) -> Result<(), SchedulerError> {
        if !job.durable && !replace {
            return Err(SchedulerError::Storage(format!(
                "jobs added with no trigger must be durable: {}",
                job.key
            )));
        }
        if !replace && self.jobs.contains_key(&job.key) {
            return Err(SchedulerError::JobAlreadyExists(job.key));
        }
        self.jobs.insert(job.key.clone(), job);
        Ok(())
    }

    pub fn add_job_with_trigger(
        &mut self,
        job: JobDetail,
        trigger: Trigger,
    ) -> Result<(), SchedulerError> {
        if trigger.job_key != job.key {
            return Err(SchedulerError::Storage(format!(
                "trigger {} references job {}, not {}",
                trigger.key, trigger.job_key, job.key
            )));
        }
        if self.jobs.contains_key(&job.key) {
            return Err(SchedulerError::JobAlreadyExists(job.key));
        }
        if self.triggers.contains_key(&trigger.key) {
            return Err(SchedulerError::TriggerAlreadyExists(trigger.key));
        }
        self.jobs.insert(job.key.clone(), job);
        self.triggers.insert(trigger.key.clone(), trigger);
        Ok(())
    }

    pub fn add_trigger(&mut self, trigger: Trigger) -> Result<(), SchedulerError> {
        if self.triggers.contains_key(&trigger.key) {
            return Err(SchedulerError::TriggerAlreadyExists(trigger.key));
        }
        if !self.jobs.contains_key(&trigger.job_key) {
            return Err(SchedulerError::JobNotFound(trigger.job_key));
        }
        self.triggers.insert(trigger.key.clone(), trigger);
        Ok(())
    }

    /// Replace the trigger under `key`; false when there is none
    pub fn replace_trigger(
        &mut self,
        key: &TriggerKey,
        trigger: Trigger,
    ) -> Result<bool, SchedulerError> {
        if !self.triggers.contains_key(key) {
            return Ok(false);
        }
        if !self.jobs.contains_key(&trigger.job_key) {
            return Err(SchedulerError::JobNotFound(trigger.job_key));
        }
        if &trigger.key != key && self.triggers.contains_key(&trigger.key) {
            return Err(SchedulerError::TriggerAlreadyExists(trigger.key));
        }
        let new_job = trigger.job_key.clone();
        let old = self.triggers.remove(key);
        self.triggers.insert(trigger.key.clone(), trigger);
        if let Some(old) = old {
            if old.job_key != new_job {
                self.remove_orphan(&old.job_key);
            }
        }
        Ok(true)
    }

    /// Remove a job and its triggers
    pub fn remove_job(&mut self, key: &JobKey) -> bool {
        self.triggers.retain(|_, t| &t.job_key != key);
        self.jobs.remove(key).is_some()
    }

    /// Remove a trigger, and its job if that leaves a non-durable job bare
    pub fn remove_trigger(&mut self, key: &TriggerKey) -> bool {
        match self.triggers.remove(key) {
            Some(trigger) => {
                self.remove_orphan(&trigger.job_key);
                true
            }
            None => false,
        }
    }

    fn remove_orphan(&mut self, key: &JobKey) {
        let durable = self.jobs.get(key).map_or(true, |j| j.durable);
        if !durable && !self.triggers.values().any(|t| &t.job_key == key) {
            self.jobs.remove(key);
        }
    }

    pub fn job_group_names(&self) -> Vec<String> {
        let groups: BTreeSet<&str> = self.jobs.keys().map(JobKey::group).collect();
        groups.into_iter().map(String::from).collect()
    }

    pub fn job_keys(&self, group: &str) -> Vec<JobKey> {
        self.jobs
            .keys()
            .filter(|k| k.group() == group)
            .cloned()
            .collect()
    }

    pub fn trigger_group_names(&self) -> Vec<String> {
        let groups: BTreeSet<&str> = self.triggers.keys().map(TriggerKey::group).collect();
        groups.into_iter().map(String::from).collect()
    }

    pub fn trigger_keys(&self, group: &str) -> Vec<TriggerKey> {
        self.triggers
            .keys()
            .filter(|k| k.group() == group)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
