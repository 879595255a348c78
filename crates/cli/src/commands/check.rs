// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jobsync check` - Validate a document

use crate::error::JobsyncError;
use crate::output::{self, DocumentSummary, OutputFormat};
use anyhow::Result;
use clap::Args;
use jobsync_engine::Processor;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Document to check
    pub document: PathBuf,

    /// Job types the scheduler knows; when given, other types are errors
    #[arg(long = "job-type", value_name = "NAME")]
    pub job_types: Vec<String>,
}

pub fn check(args: CheckArgs, format: OutputFormat) -> Result<()> {
    let name = args.document.display().to_string();
    let processor = Processor::new(super::type_loader(&args.job_types));

    let loaded = processor
        .process_file(&args.document)
        .map_err(|e| JobsyncError::from_process(&name, e))?;
    loaded
        .check_validation()
        .map_err(|e| JobsyncError::from_process(&name, e))?;

    output::print(&DocumentSummary::new(name, &loaded), format);
    Ok(())
}
