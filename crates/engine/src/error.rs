// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for document processing

use jobsync_core::{Key, SchedulerError, TriggerKey, TypeLoadError};
use jobsync_document::{ExtractError, ParseError, ValidationErrors};
use std::fmt;
use thiserror::Error;

/// Which kind of entity a key names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Job,
    Trigger,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Job => write!(f, "job"),
            EntityKind::Trigger => write!(f, "trigger"),
        }
    }
}

/// Errors that can occur while processing or scheduling a document
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("configuration error: {0}")]
    Config(ExtractError),
    #[error(transparent)]
    TypeLoad(#[from] TypeLoadError),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{kind} already exists: {key}")]
    AlreadyExists { kind: EntityKind, key: Key },
    #[error("invariant violated: {0}")]
    Invariant(String),
    #[error("gave up scheduling trigger {key}: kept racing with another scheduler")]
    RaceRetriesExhausted { key: TriggerKey },
    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),
}

impl From<ExtractError> for ProcessError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::TypeLoad(e) => ProcessError::TypeLoad(e),
            other => ProcessError::Config(other),
        }
    }
}

impl From<ParseError> for ProcessError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Toml(e) => ProcessError::Config(ExtractError::Toml(e)),
            ParseError::Io { path, source } => ProcessError::Io { path, source },
        }
    }
}
