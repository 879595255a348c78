// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document processor: parse, validate, extract, then schedule

use crate::config::ProcessorConfig;
use crate::error::ProcessError;
use crate::preprocess::{run_pre_processing, NeverDelete, PreProcessReport};
use crate::reconcile::{reconcile, ReconcileReport};
use jobsync_core::{Clock, JobDetail, SchedulerAdapter, SystemClock, Trigger, TypeLoader};
use jobsync_document::{
    check_violations, extract_document, parse_document, read_document_file, validate_document,
    validate_tree, Directives, Document, ExtractError, PreProcessCommands, ValidationErrors,
    Violation,
};
use std::collections::BTreeSet;
use std::path::Path;

/// Result of processing one document.
///
/// Owned by the caller, so one [`Processor`] can serve concurrent runs.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    document: Document,
    violations: Vec<Violation>,
}

impl LoadedDocument {
    pub fn commands(&self) -> &PreProcessCommands {
        &self.document.commands
    }

    pub fn directives(&self) -> Directives {
        self.document.directives
    }

    pub fn jobs(&self) -> &[JobDetail] {
        &self.document.jobs
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.document.triggers
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Override the document's overwrite directive for this run
    pub fn set_overwrite_existing_data(&mut self, overwrite: bool) {
        self.document.directives.overwrite_existing_data = overwrite;
    }

    /// Override the document's ignore-duplicates directive for this run
    pub fn set_ignore_duplicates(&mut self, ignore: bool) {
        self.document.directives.ignore_duplicates = ignore;
    }

    /// Fail if validation collected any violation
    pub fn check_validation(&self) -> Result<(), ProcessError> {
        Ok(check_violations(&self.violations)?)
    }
}

/// Combined outcome of [`Processor::schedule`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    pub pre_process: PreProcessReport,
    pub reconcile: ReconcileReport,
}

/// Loads scheduling documents and applies them to a scheduler.
///
/// Holds configuration only: the type loader, clock, tunables, and the
/// groups delete commands must not touch.
pub struct Processor<L, C = SystemClock> {
    loader: L,
    clock: C,
    config: ProcessorConfig,
    never_delete: NeverDelete,
}

impl<L: TypeLoader> Processor<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            clock: SystemClock,
            config: ProcessorConfig::default(),
            never_delete: NeverDelete::default(),
        }
    }
}

impl<L: TypeLoader, C: Clock> Processor<L, C> {
    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    /// Clock used for triggers without a start time
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Processor<L, C2> {
        Processor {
            loader: self.loader,
            clock,
            config: self.config,
            never_delete: self.never_delete,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Protect a job group from delete commands. Returns false if already protected.
    pub fn add_job_group_to_never_delete(&mut self, group: impl Into<String>) -> bool {
        self.never_delete.job_groups.insert(group.into())
    }

    pub fn remove_job_group_from_never_delete(&mut self, group: &str) -> bool {
        self.never_delete.job_groups.remove(group)
    }

    pub fn job_groups_to_never_delete(&self) -> &BTreeSet<String> {
        &self.never_delete.job_groups
    }

    /// Protect a trigger group from delete commands. Returns false if already protected.
    pub fn add_trigger_group_to_never_delete(&mut self, group: impl Into<String>) -> bool {
        self.never_delete.trigger_groups.insert(group.into())
    }

    pub fn remove_trigger_group_from_never_delete(&mut self, group: &str) -> bool {
        self.never_delete.trigger_groups.remove(group)
    }

    pub fn trigger_groups_to_never_delete(&self) -> &BTreeSet<String> {
        &self.never_delete.trigger_groups
    }

    /// Validate document text without extracting it
    pub fn check_validation(&self, content: &str) -> Result<(), ProcessError> {
        Ok(check_violations(&validate_document(content))?)
    }

    /// Parse, validate and extract a document.
    ///
    /// Violations are collected but do not fail the call; see
    /// [`LoadedDocument::check_validation`]. If extraction fails on a
    /// document that also has violations, the violations are reported
    /// instead, since they usually explain the failure.
    pub fn process(&self, content: &str) -> Result<LoadedDocument, ProcessError> {
        let root = parse_document(content)?;

        let violations = if self.config.validate {
            validate_tree(&root)
        } else {
            Vec::new()
        };
        if !violations.is_empty() {
            tracing::warn!(count = violations.len(), "document has validation errors");
        }

        let document = match extract_document(&root, &self.loader, &self.clock) {
            Ok(document) => document,
            Err(e @ ExtractError::TypeLoad(_)) => return Err(e.into()),
            Err(e) if !violations.is_empty() => {
                tracing::debug!(error = %e, "extraction failed on an invalid document");
                return Err(ValidationErrors { violations }.into());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            jobs = document.jobs.len(),
            triggers = document.triggers.len(),
            "document processed"
        );
        Ok(LoadedDocument {
            document,
            violations,
        })
    }

    pub fn process_file(&self, path: &Path) -> Result<LoadedDocument, ProcessError> {
        tracing::info!(path = %path.display(), "processing document");
        let content = read_document_file(path)?;
        self.process(&content)
    }

    /// Run the document's delete commands, then reconcile its jobs and triggers
    pub async fn schedule<S: SchedulerAdapter>(
        &self,
        loaded: &LoadedDocument,
        scheduler: &S,
    ) -> Result<ScheduleReport, ProcessError> {
        let pre_process =
            run_pre_processing(loaded.commands(), &self.never_delete, scheduler).await?;
        let reconcile = reconcile(
            loaded.jobs(),
            loaded.triggers(),
            loaded.directives(),
            &self.config,
            scheduler,
        )
        .await?;
        Ok(ScheduleReport {
            pre_process,
            reconcile,
        })
    }

    /// Process a document and, if it is valid, schedule it
    pub async fn process_and_schedule<S: SchedulerAdapter>(
        &self,
        content: &str,
        scheduler: &S,
    ) -> Result<ScheduleReport, ProcessError> {
        let loaded = self.process(content)?;
        loaded.check_validation()?;
        self.schedule(&loaded, scheduler).await
    }

    pub async fn process_file_and_schedule<S: SchedulerAdapter>(
        &self,
        path: &Path,
        scheduler: &S,
    ) -> Result<ScheduleReport, ProcessError> {
        let loaded = self.process_file(path)?;
        loaded.check_validation()?;
        self.schedule(&loaded, scheduler).await
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
