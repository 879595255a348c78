// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod apply;
pub mod check;

use jobsync_core::{AnyTypeLoader, JobTypeRegistry, TypeLoader};

/// Loader for `--job-type` names; any name passes when none are given
pub fn type_loader(job_types: &[String]) -> Box<dyn TypeLoader> {
    if job_types.is_empty() {
        Box::new(AnyTypeLoader)
    } else {
        Box::new(job_types.iter().cloned().collect::<JobTypeRegistry>())
    }
}
