// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use jobsync_engine::{LoadedDocument, ScheduleReport};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TriggerSummary {
    pub key: String,
    pub job: String,
    pub kind: String,
}

/// What a valid document declares
#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub document: String,
    pub overwrite_existing_data: bool,
    pub ignore_duplicates: bool,
    pub delete_commands: usize,
    pub jobs: Vec<String>,
    pub triggers: Vec<TriggerSummary>,
}

impl DocumentSummary {
    pub fn new(document: impl Into<String>, loaded: &LoadedDocument) -> Self {
        let commands = loaded.commands();
        Self {
            document: document.into(),
            overwrite_existing_data: loaded.directives().overwrite_existing_data,
            ignore_duplicates: loaded.directives().ignore_duplicates,
            delete_commands: commands.job_groups_to_delete.len()
                + commands.trigger_groups_to_delete.len()
                + commands.jobs_to_delete.len()
                + commands.triggers_to_delete.len(),
            jobs: loaded.jobs().iter().map(|j| j.key.to_string()).collect(),
            triggers: loaded
                .triggers()
                .iter()
                .map(|t| TriggerSummary {
                    key: t.key.to_string(),
                    job: t.job_key.to_string(),
                    kind: t.kind().to_string(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} is valid", self.document)?;
        writeln!(
            f,
            "  overwrite: {}, ignore duplicates: {}",
            self.overwrite_existing_data, self.ignore_duplicates
        )?;
        writeln!(f, "  delete commands: {}", self.delete_commands)?;
        writeln!(f, "  jobs: {}", self.jobs.len())?;
        for job in &self.jobs {
            writeln!(f, "    {}", job)?;
        }
        writeln!(f, "  triggers: {}", self.triggers.len())?;
        for t in &self.triggers {
            writeln!(f, "    {} -> {} ({})", t.key, t.job, t.kind)?;
        }
        Ok(())
    }
}

/// Outcome of an apply run
#[derive(Debug, Serialize)]
pub struct ApplySummary {
    pub document: String,
    pub state: String,
    pub jobs_deleted: usize,
    pub triggers_unscheduled: usize,
    pub jobs_added: usize,
    pub jobs_skipped: usize,
    pub triggers_scheduled: usize,
    pub triggers_rescheduled: usize,
    pub triggers_skipped: usize,
}

impl ApplySummary {
    pub fn new(document: impl Into<String>, state: impl Into<String>, report: &ScheduleReport) -> Self {
        Self {
            document: document.into(),
            state: state.into(),
            jobs_deleted: report.pre_process.jobs_deleted,
            triggers_unscheduled: report.pre_process.triggers_unscheduled,
            jobs_added: report.reconcile.jobs_added,
            jobs_skipped: report.reconcile.jobs_skipped,
            triggers_scheduled: report.reconcile.triggers_scheduled,
            triggers_rescheduled: report.reconcile.triggers_rescheduled,
            triggers_skipped: report.reconcile.triggers_skipped,
        }
    }
}

impl fmt::Display for ApplySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Applied {} to {}", self.document, self.state)?;
        writeln!(
            f,
            "  jobs: {} added, {} skipped, {} deleted",
            self.jobs_added, self.jobs_skipped, self.jobs_deleted
        )?;
        writeln!(
            f,
            "  triggers: {} scheduled, {} rescheduled, {} skipped, {} unscheduled",
            self.triggers_scheduled,
            self.triggers_rescheduled,
            self.triggers_skipped,
            self.triggers_unscheduled
        )
    }
}
