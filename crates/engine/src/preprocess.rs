// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-processing: delete commands run before any job is added

use crate::error::ProcessError;
use jobsync_core::{SchedulerAdapter, ALL_GROUPS};
use jobsync_document::PreProcessCommands;
use std::collections::BTreeSet;

/// Groups that delete commands must never touch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeverDelete {
    pub job_groups: BTreeSet<String>,
    pub trigger_groups: BTreeSet<String>,
}

/// Outcome of a pre-processing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreProcessReport {
    pub jobs_deleted: usize,
    pub triggers_unscheduled: usize,
    /// Group or key deletions skipped because the group is protected
    pub protected: usize,
}

/// Run delete commands against the scheduler.
///
/// Job groups, then trigger groups, then single jobs, then single triggers.
/// Deleting something that is already gone is not an error.
pub async fn run_pre_processing<S: SchedulerAdapter>(
    commands: &PreProcessCommands,
    never_delete: &NeverDelete,
    scheduler: &S,
) -> Result<PreProcessReport, ProcessError> {
    let mut report = PreProcessReport::default();

    for requested in &commands.job_groups_to_delete {
        let groups = if requested == ALL_GROUPS {
            scheduler.job_group_names().await?
        } else {
            vec![requested.clone()]
        };
        for group in groups {
            if never_delete.job_groups.contains(&group) {
                tracing::debug!(group = %group, "job group is protected from deletion");
                report.protected += 1;
                continue;
            }
            for key in scheduler.job_keys(&group).await? {
                if scheduler.delete_job(&key).await? {
                    tracing::info!(job = %key, "deleted job");
                    report.jobs_deleted += 1;
                }
            }
        }
    }

    for requested in &commands.trigger_groups_to_delete {
        let groups = if requested == ALL_GROUPS {
            scheduler.trigger_group_names().await?
        } else {
            vec![requested.clone()]
        };
        for group in groups {
            if never_delete.trigger_groups.contains(&group) {
                tracing::debug!(group = %group, "trigger group is protected from deletion");
                report.protected += 1;
                continue;
            }
            for key in scheduler.trigger_keys(&group).await? {
                if scheduler.unschedule_trigger(&key).await? {
                    tracing::info!(trigger = %key, "unscheduled trigger");
                    report.triggers_unscheduled += 1;
                }
            }
        }
    }

    for key in &commands.jobs_to_delete {
        if never_delete.job_groups.contains(key.group()) {
            tracing::debug!(job = %key, "job is in a protected group");
            report.protected += 1;
            continue;
        }
        if scheduler.delete_job(key).await? {
            tracing::info!(job = %key, "deleted job");
            report.jobs_deleted += 1;
        }
    }

    for key in &commands.triggers_to_delete {
        if never_delete.trigger_groups.contains(key.group()) {
            tracing::debug!(trigger = %key, "trigger is in a protected group");
            report.protected += 1;
            continue;
        }
        if scheduler.unschedule_trigger(key).await? {
            tracing::info!(trigger = %key, "unscheduled trigger");
            report.triggers_unscheduled += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "preprocess_tests.rs"]
mod tests;
