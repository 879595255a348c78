// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON snapshot files for [`SchedulerState`]

use crate::state::SchedulerState;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a snapshot. A missing file is an empty scheduler.
pub fn load_snapshot(path: &Path) -> Result<SchedulerState, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SchedulerState::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

/// Write a snapshot, creating parent directories as needed
pub fn save_snapshot(path: &Path, state: &SchedulerState) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(state)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
