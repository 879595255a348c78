// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of job-type names to job code handles

use crate::job::JobType;
use std::collections::BTreeSet;
use thiserror::Error;

/// Failure to resolve a job-type name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job type: {name}")]
pub struct TypeLoadError {
    pub name: String,
}

/// Resolves a job-type name from a document to an opaque [`JobType`]
pub trait TypeLoader: Send + Sync {
    fn load_type(&self, name: &str) -> Result<JobType, TypeLoadError>;
}

/// Type loader backed by a fixed set of registered names
#[derive(Debug, Clone, Default)]
pub struct JobTypeRegistry {
    names: BTreeSet<String>,
}

impl JobTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>) -> &mut Self {
        self.names.insert(name.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.register(name);
        self
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for JobTypeRegistry {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl TypeLoader for JobTypeRegistry {
    fn load_type(&self, name: &str) -> Result<JobType, TypeLoadError> {
        if self.names.contains(name) {
            Ok(JobType::new(name))
        } else {
            Err(TypeLoadError {
                name: name.to_string(),
            })
        }
    }
}

/// Loader that accepts every name; for tooling that only inspects documents
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyTypeLoader;

impl TypeLoader for AnyTypeLoader {
    fn load_type(&self, name: &str) -> Result<JobType, TypeLoadError> {
        Ok(JobType::new(name))
    }
}

impl<T: TypeLoader + ?Sized> TypeLoader for Box<T> {
    fn load_type(&self, name: &str) -> Result<JobType, TypeLoadError> {
        (**self).load_type(name)
    }
}

#[cfg(test)]
#[path = "job_type_tests.rs"]
mod tests;
