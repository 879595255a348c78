// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job definitions

use crate::key::JobKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered string pairs attached to a job or trigger.
///
/// Duplicate keys are kept in insertion order; `get` returns the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobDataMap {
    entries: Vec<(String, String)>,
}

impl JobDataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JobDataMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Opaque handle for resolved job code, produced by a [`TypeLoader`](crate::TypeLoader)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobType(String);

impl JobType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A job as declared in a document and as stored in a scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetail {
    pub key: JobKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub job_type: JobType,
    #[serde(default)]
    pub volatile: bool,
    /// A durable job may exist without any trigger bound to it
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub request_recovery: bool,
    #[serde(default, skip_serializing_if = "JobDataMap::is_empty")]
    pub data: JobDataMap,
}

impl JobDetail {
    pub fn new(key: JobKey, job_type: JobType) -> Self {
        Self {
            key,
            description: None,
            job_type,
            volatile: false,
            durable: false,
            request_recovery: false,
            data: JobDataMap::new(),
        }
    }

    pub fn durable(mut self, durable: bool) -> Self {
        self.durable = durable;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
