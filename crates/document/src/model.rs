// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized model extracted from a scheduling document

use jobsync_core::{JobDetail, JobKey, Trigger, TriggerKey};

/// Processing policy flags declared by a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directives {
    /// Replace jobs and triggers that already exist in the scheduler
    pub overwrite_existing_data: bool,
    /// When not overwriting, silently skip existing jobs and triggers
    /// instead of failing
    pub ignore_duplicates: bool,
}

impl Default for Directives {
    fn default() -> Self {
        Self {
            overwrite_existing_data: true,
            ignore_duplicates: false,
        }
    }
}

/// Delete commands run against the scheduler before any job is added.
///
/// A group of `"*"` stands for every group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreProcessCommands {
    pub job_groups_to_delete: Vec<String>,
    pub trigger_groups_to_delete: Vec<String>,
    pub jobs_to_delete: Vec<JobKey>,
    pub triggers_to_delete: Vec<TriggerKey>,
}

impl PreProcessCommands {
    pub fn is_empty(&self) -> bool {
        self.job_groups_to_delete.is_empty()
            && self.trigger_groups_to_delete.is_empty()
            && self.jobs_to_delete.is_empty()
            && self.triggers_to_delete.is_empty()
    }
}

/// Everything a document declares, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub commands: PreProcessCommands,
    pub directives: Directives,
    pub jobs: Vec<JobDetail>,
    pub triggers: Vec<Trigger>,
}
