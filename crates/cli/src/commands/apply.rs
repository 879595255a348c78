// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jobsync apply` - Apply a document to a scheduler state file

use crate::error::JobsyncError;
use crate::output::{self, ApplySummary, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use jobsync_adapters::TracedScheduler;
use jobsync_engine::{Processor, ProcessorConfig};
use jobsync_storage::{load_snapshot, save_snapshot, MemoryScheduler};
use std::path::PathBuf;

#[derive(Args)]
pub struct ApplyArgs {
    /// Document to apply
    pub document: PathBuf,

    /// Scheduler state file (JSON); created if missing
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,

    /// Processor config file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Job types the scheduler knows; when given, other types are errors
    #[arg(long = "job-type", value_name = "NAME")]
    pub job_types: Vec<String>,

    /// Job group that delete commands must not touch
    #[arg(long = "never-delete-job-group", value_name = "GROUP")]
    pub never_delete_job_groups: Vec<String>,

    /// Trigger group that delete commands must not touch
    #[arg(long = "never-delete-trigger-group", value_name = "GROUP")]
    pub never_delete_trigger_groups: Vec<String>,

    /// Override the document's overwrite-existing-data directive
    #[arg(long, value_name = "BOOL")]
    pub overwrite: Option<bool>,

    /// Override the document's ignore-duplicates directive
    #[arg(long, value_name = "BOOL")]
    pub ignore_duplicates: Option<bool>,
}

pub async fn apply(args: ApplyArgs, format: OutputFormat) -> Result<()> {
    let name = args.document.display().to_string();

    let config = match &args.config {
        Some(path) => ProcessorConfig::load(path)?,
        None => ProcessorConfig::default(),
    };
    let mut processor = Processor::new(super::type_loader(&args.job_types)).with_config(config);
    for group in args.never_delete_job_groups {
        processor.add_job_group_to_never_delete(group);
    }
    for group in args.never_delete_trigger_groups {
        processor.add_trigger_group_to_never_delete(group);
    }

    let mut loaded = processor
        .process_file(&args.document)
        .map_err(|e| JobsyncError::from_process(&name, e))?;
    loaded
        .check_validation()
        .map_err(|e| JobsyncError::from_process(&name, e))?;
    if let Some(overwrite) = args.overwrite {
        loaded.set_overwrite_existing_data(overwrite);
    }
    if let Some(ignore) = args.ignore_duplicates {
        loaded.set_ignore_duplicates(ignore);
    }

    let state = load_snapshot(&args.state)
        .with_context(|| format!("failed to load state from {}", args.state.display()))?;
    let scheduler = TracedScheduler::new(MemoryScheduler::from_state(state));

    // Work applied before a failure stays applied, so the state is saved either way
    let result = processor.schedule(&loaded, &scheduler).await;
    save_snapshot(&args.state, &scheduler.inner().snapshot())
        .with_context(|| format!("failed to save state to {}", args.state.display()))?;
    let report = result.map_err(|e| JobsyncError::from_process(&name, e))?;

    output::print(
        &ApplySummary::new(name, args.state.display().to_string(), &report),
        format,
    );
    Ok(())
}
