// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger definitions

use crate::job::JobDataMap;
use crate::key::{JobKey, TriggerKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How many times a simple trigger repeats after its first firing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum RepeatCount {
    Times(u32),
    Indefinite,
}

impl RepeatCount {
    /// Reserved integer standing for "repeat forever"
    pub const INDEFINITE: i32 = -1;

    pub fn as_i32(self) -> i32 {
        match self {
            RepeatCount::Times(n) => i32::try_from(n).unwrap_or(i32::MAX),
            RepeatCount::Indefinite => Self::INDEFINITE,
        }
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::Times(0)
    }
}

impl From<RepeatCount> for i32 {
    fn from(count: RepeatCount) -> Self {
        count.as_i32()
    }
}

impl TryFrom<i32> for RepeatCount {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            Self::INDEFINITE => Ok(RepeatCount::Indefinite),
            n if n >= 0 => Ok(RepeatCount::Times(n as u32)),
            n => Err(format!("invalid repeat count: {}", n)),
        }
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatCount::Times(n) => write!(f, "{}", n),
            RepeatCount::Indefinite => f.write_str("indefinite"),
        }
    }
}

/// Kind-specific part of a trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerSchedule {
    Simple {
        repeat_count: RepeatCount,
        #[serde(with = "humantime_serde")]
        repeat_interval: Duration,
    },
    Cron {
        expression: String,
        /// Canonical IANA name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
}

impl TriggerSchedule {
    pub fn kind(&self) -> TriggerKind {
        match self {
            TriggerSchedule::Simple { .. } => TriggerKind::Simple,
            TriggerSchedule::Cron { .. } => TriggerKind::Cron,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Simple,
    Cron,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Simple => f.write_str("simple"),
            TriggerKind::Cron => f.write_str("cron"),
        }
    }
}

/// A trigger as declared in a document and as stored in a scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub key: TriggerKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub job_key: JobKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_name: Option<String>,
    #[serde(default)]
    pub volatile: bool,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Resolved misfire code, see [`crate::misfire`]
    #[serde(default)]
    pub misfire_instruction: i32,
    #[serde(default, skip_serializing_if = "JobDataMap::is_empty")]
    pub data: JobDataMap,
    pub schedule: TriggerSchedule,
}

impl Trigger {
    /// Trigger with default metadata; fields are public for further tweaks
    pub fn new(
        key: TriggerKey,
        job_key: JobKey,
        start_time: DateTime<Utc>,
        schedule: TriggerSchedule,
    ) -> Self {
        Self {
            key,
            description: None,
            job_key,
            calendar_name: None,
            volatile: false,
            start_time,
            end_time: None,
            misfire_instruction: crate::misfire::SMART_POLICY,
            data: JobDataMap::new(),
            schedule,
        }
    }

    pub fn simple(
        key: TriggerKey,
        job_key: JobKey,
        start_time: DateTime<Utc>,
        repeat_count: RepeatCount,
        repeat_interval: Duration,
    ) -> Self {
        Self::new(
            key,
            job_key,
            start_time,
            TriggerSchedule::Simple {
                repeat_count,
                repeat_interval,
            },
        )
    }

    pub fn cron(
        key: TriggerKey,
        job_key: JobKey,
        start_time: DateTime<Utc>,
        expression: impl Into<String>,
    ) -> Self {
        Self::new(
            key,
            job_key,
            start_time,
            TriggerSchedule::Cron {
                expression: expression.into(),
                timezone: None,
            },
        )
    }

    pub fn kind(&self) -> TriggerKind {
        self.schedule.kind()
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
