// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use jobsync_engine::{EntityKind, ProcessError};
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct JobsyncError {
    /// What went wrong
    pub message: String,
    /// Details, one per line
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl JobsyncError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for JobsyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for JobsyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl JobsyncError {
    /// Explain a processing failure for `document`
    pub fn from_process(document: &str, err: ProcessError) -> Self {
        match err {
            ProcessError::Validation(errors) => {
                let mut out = JobsyncError::new(format!(
                    "{} has {} validation error(s)",
                    document,
                    errors.violations.len()
                ));
                for violation in &errors.violations {
                    out = out.with_context(violation.to_string());
                }
                out
            }
            ProcessError::TypeLoad(e) => {
                let name = e.name.clone();
                JobsyncError::new(format!("unknown job type '{}'", name))
                    .with_suggestion(format!("Register it with: --job-type {}", name))
                    .with_source(e)
            }
            ProcessError::AlreadyExists { kind, key } => {
                JobsyncError::new(format!("{} {} already exists", kind, key))
                    .with_context("The document does not allow overwriting existing data")
                    .with_suggestion(
                        "Set overwrite-existing-data = true in [[processing-directives]]",
                    )
                    .with_suggestion(match kind {
                        EntityKind::Job => "Or set ignore-duplicates = true to keep existing jobs",
                        EntityKind::Trigger => {
                            "Or set ignore-duplicates = true to keep existing triggers"
                        }
                    })
            }
            ProcessError::Invariant(message) => JobsyncError::new(message)
                .with_context("A job that is not durable must keep at least one trigger")
                .with_suggestion("Declare a trigger for the job")
                .with_suggestion("Or mark the job with durability = true"),
            ProcessError::RaceRetriesExhausted { key } => {
                JobsyncError::new(format!("trigger {} kept changing underneath us", key))
                    .with_context("Another scheduler is writing the same trigger concurrently")
                    .with_suggestion("Retry the apply")
                    .with_suggestion("Or raise max-race-retries in the processor config")
            }
            other => JobsyncError::new(other.to_string()).with_source(other),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
