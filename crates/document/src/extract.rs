// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Model extraction: walks a parsed document tree and builds the
//! normalized [`Document`].
//!
//! String values are trimmed and blank strings count as absent. Scalars of
//! other TOML types are accepted where text is expected, so `3` and `"3"`
//! read the same.

use crate::model::{Directives, Document, PreProcessCommands};
use crate::validator::{join, parse_bool};
use chrono::{DateTime, Utc};
use jobsync_core::{
    misfire, Clock, JobDataMap, JobDetail, JobKey, RepeatCount, Trigger, TriggerKey, TriggerKind,
    TriggerSchedule, TypeLoadError, TypeLoader, DEFAULT_GROUP,
};
use std::time::Duration;
use thiserror::Error;
use toml::value::Table;
use toml::Value;

/// Malformed or unusable document content
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("document syntax error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
    #[error("unknown trigger type at {0}: expected exactly one of [simple] or [cron]")]
    UnknownTriggerType(String),
    #[error("unknown misfire instruction '{name}' for {kind} trigger at {field}")]
    UnknownMisfireInstruction {
        field: String,
        name: String,
        kind: TriggerKind,
    },
    #[error("invalid time zone '{zone}' at {field}")]
    InvalidTimezone { field: String, zone: String },
    #[error(transparent)]
    TypeLoad(#[from] TypeLoadError),
}

/// Extract the model from a parsed document.
///
/// Order: pre-processing commands, directives, jobs, triggers. Jobs and
/// triggers keep document order across all `schedule` blocks.
pub fn extract_document<L, C>(root: &Value, loader: &L, clock: &C) -> Result<Document, ExtractError>
where
    L: TypeLoader + ?Sized,
    C: Clock,
{
    let root = root
        .as_table()
        .ok_or_else(|| ExtractError::InvalidFormat("document root must be a table".to_string()))?;

    let extractor = Extractor { loader, clock };
    let commands = extractor.commands(root)?;
    let directives = extractor.directives(root)?;

    let schedules = elements(root, "schedule", "")?;
    let mut jobs = Vec::new();
    for (path, schedule) in &schedules {
        for (job_path, job) in elements(schedule, "job", path)? {
            jobs.push(extractor.job(job, &job_path)?);
        }
    }
    let mut triggers = Vec::new();
    for (path, schedule) in &schedules {
        for (trigger_path, trigger) in elements(schedule, "trigger", path)? {
            triggers.push(extractor.trigger(trigger, &trigger_path)?);
        }
    }

    tracing::debug!(
        jobs = jobs.len(),
        triggers = triggers.len(),
        "document extracted"
    );

    Ok(Document {
        commands,
        directives,
        jobs,
        triggers,
    })
}

struct Extractor<'a, L: ?Sized, C> {
    loader: &'a L,
    clock: &'a C,
}

impl<L: TypeLoader + ?Sized, C: Clock> Extractor<'_, L, C> {
    fn commands(&self, root: &Table) -> Result<PreProcessCommands, ExtractError> {
        let mut commands = PreProcessCommands::default();
        for (path, block) in elements(root, "pre-processing-commands", "")? {
            commands
                .job_groups_to_delete
                .extend(text_list(block, "delete-jobs-in-group", &path)?);
            commands
                .trigger_groups_to_delete
                .extend(text_list(block, "delete-triggers-in-group", &path)?);
            for (ref_path, key_ref) in elements(block, "delete-job", &path)? {
                let (name, group) = key_ref_fields(key_ref, &ref_path)?;
                commands.jobs_to_delete.push(JobKey::new(name, group));
            }
            for (ref_path, key_ref) in elements(block, "delete-trigger", &path)? {
                let (name, group) = key_ref_fields(key_ref, &ref_path)?;
                commands.triggers_to_delete.push(TriggerKey::new(name, group));
            }
        }
        Ok(commands)
    }

    fn directives(&self, root: &Table) -> Result<Directives, ExtractError> {
        let blocks = elements(root, "processing-directives", "")?;
        let mut directives = Directives::default();
        let Some((path, first)) = blocks.first() else {
            return Ok(directives);
        };
        if blocks.len() > 1 {
            tracing::debug!(
                ignored = blocks.len() - 1,
                "only the first processing-directives block is honored"
            );
        }
        if let Some(overwrite) = bool_field(first, "overwrite-existing-data", path)? {
            directives.overwrite_existing_data = overwrite;
        }
        if let Some(ignore) = bool_field(first, "ignore-duplicates", path)? {
            directives.ignore_duplicates = ignore;
        }
        Ok(directives)
    }

    fn job(&self, table: &Table, path: &str) -> Result<JobDetail, ExtractError> {
        let name = required_text(table, "name", path)?;
        let group = text(table, "group", path)?.unwrap_or_else(|| DEFAULT_GROUP.to_string());
        let type_name = required_text(table, "job-type", path)?;
        let job_type = self.loader.load_type(&type_name)?;

        let job = JobDetail {
            key: JobKey::new(name, group),
            description: text(table, "description", path)?,
            job_type,
            volatile: bool_field(table, "volatility", path)?.unwrap_or(false),
            durable: bool_field(table, "durability", path)?.unwrap_or(false),
            request_recovery: bool_field(table, "recover", path)?.unwrap_or(false),
            data: data_map(table, path)?,
        };
        tracing::debug!(job = %job.key, job_type = %job.job_type, durable = job.durable, "parsed job");
        Ok(job)
    }

    fn trigger(&self, table: &Table, path: &str) -> Result<Trigger, ExtractError> {
        let name = required_text(table, "name", path)?;
        let group = text(table, "group", path)?.unwrap_or_else(|| DEFAULT_GROUP.to_string());
        let job_name = required_text(table, "job-name", path)?;
        let job_group =
            text(table, "job-group", path)?.unwrap_or_else(|| DEFAULT_GROUP.to_string());

        let start_time = self.start_time(table, path)?;
        let end_time = text(table, "end-time", path)?
            .map(|raw| timestamp(&raw, &join(path, "end-time")))
            .transpose()?;
        if let Some(end) = end_time {
            if end < start_time {
                return Err(ExtractError::InvalidValue {
                    field: join(path, "end-time"),
                    message: "end time is before start time".to_string(),
                });
            }
        }

        let schedule = schedule(table, path)?;
        let kind = schedule.kind();
        let misfire_instruction = match text(table, "misfire-instruction", path)? {
            Some(name) => misfire::resolve(kind, &name).ok_or_else(|| {
                ExtractError::UnknownMisfireInstruction {
                    field: join(path, "misfire-instruction"),
                    name,
                    kind,
                }
            })?,
            None => misfire::SMART_POLICY,
        };

        let trigger = Trigger {
            key: TriggerKey::new(name, group),
            description: text(table, "description", path)?,
            job_key: JobKey::new(job_name, job_group),
            calendar_name: text(table, "calendar-name", path)?,
            volatile: bool_field(table, "volatility", path)?.unwrap_or(false),
            start_time,
            end_time,
            misfire_instruction,
            data: data_map(table, path)?,
            schedule,
        };
        tracing::debug!(trigger = %trigger.key, job = %trigger.job_key, kind = %kind, "parsed trigger");
        Ok(trigger)
    }

    fn start_time(&self, table: &Table, path: &str) -> Result<DateTime<Utc>, ExtractError> {
        if let Some(raw) = text(table, "start-time", path)? {
            return timestamp(&raw, &join(path, "start-time"));
        }
        let field = join(path, "start-time-seconds-in-future");
        match text(table, "start-time-seconds-in-future", path)? {
            Some(raw) => {
                let secs: u32 = raw.parse().map_err(|_| ExtractError::InvalidValue {
                    field,
                    message: format!("'{}' is not a number of seconds", raw),
                })?;
                Ok(self.clock.now() + chrono::Duration::seconds(i64::from(secs)))
            }
            None => Ok(self.clock.now()),
        }
    }
}

fn schedule(table: &Table, path: &str) -> Result<TriggerSchedule, ExtractError> {
    let simple = sub_table(table, "simple", path)?;
    let cron = sub_table(table, "cron", path)?;
    match (simple, cron) {
        (Some(simple), None) => {
            let simple_path = join(path, "simple");
            Ok(TriggerSchedule::Simple {
                repeat_count: repeat_count(simple, &simple_path)?,
                repeat_interval: repeat_interval(simple, &simple_path)?,
            })
        }
        (None, Some(cron)) => {
            let cron_path = join(path, "cron");
            let expression = required_text(cron, "cron-expression", &cron_path)?;
            let timezone = text(cron, "time-zone", &cron_path)?
                .map(|zone| {
                    zone.parse::<chrono_tz::Tz>()
                        .map(|tz| tz.name().to_string())
                        .map_err(|_| ExtractError::InvalidTimezone {
                            field: join(&cron_path, "time-zone"),
                            zone,
                        })
                })
                .transpose()?;
            Ok(TriggerSchedule::Cron {
                expression,
                timezone,
            })
        }
        _ => Err(ExtractError::UnknownTriggerType(path.to_string())),
    }
}

fn repeat_count(table: &Table, path: &str) -> Result<RepeatCount, ExtractError> {
    let Some(raw) = text(table, "repeat-count", path)? else {
        return Ok(RepeatCount::default());
    };
    if raw.eq_ignore_ascii_case("indefinite") {
        return Ok(RepeatCount::Indefinite);
    }
    let invalid = || ExtractError::InvalidValue {
        field: join(path, "repeat-count"),
        message: format!("'{}' is neither an integer nor 'indefinite'", raw),
    };
    let count: i32 = raw.parse().map_err(|_| invalid())?;
    RepeatCount::try_from(count).map_err(|_| invalid())
}

fn repeat_interval(table: &Table, path: &str) -> Result<Duration, ExtractError> {
    match text(table, "repeat-interval", path)? {
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ExtractError::InvalidValue {
                field: join(path, "repeat-interval"),
                message: format!("'{}' is not a millisecond count", raw),
            }),
        None => Ok(Duration::ZERO),
    }
}

fn timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>, ExtractError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ExtractError::InvalidValue {
            field: field.to_string(),
            message: format!("'{}' is not an RFC 3339 timestamp: {}", raw, e),
        })
}

fn data_map(table: &Table, path: &str) -> Result<JobDataMap, ExtractError> {
    let mut data = JobDataMap::new();
    let Some(map) = sub_table(table, "job-data-map", path)? else {
        return Ok(data);
    };
    for (entry_path, entry) in elements(map, "entry", &join(path, "job-data-map"))? {
        let key = required_text(entry, "key", &entry_path)?;
        let value = text(entry, "value", &entry_path)?.unwrap_or_default();
        data.push(key, value);
    }
    Ok(data)
}

fn key_ref_fields(table: &Table, path: &str) -> Result<(String, String), ExtractError> {
    let name = required_text(table, "name", path)?;
    let group = text(table, "group", path)?.unwrap_or_else(|| DEFAULT_GROUP.to_string());
    Ok((name, group))
}

/// Repeatable element: absent, a single table, or an array of tables
fn elements<'v>(
    table: &'v Table,
    key: &str,
    path: &str,
) -> Result<Vec<(String, &'v Table)>, ExtractError> {
    let field = join(path, key);
    match table.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Table(t)) => Ok(vec![(field, t)]),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_path = format!("{}[{}]", field, i);
                item.as_table().map(|t| (item_path.clone(), t)).ok_or_else(|| {
                    ExtractError::InvalidFormat(format!("{} must be a table", item_path))
                })
            })
            .collect(),
        Some(other) => Err(ExtractError::InvalidFormat(format!(
            "{} must be a table or array of tables, found {}",
            field,
            other.type_str()
        ))),
    }
}

fn sub_table<'v>(table: &'v Table, key: &str, path: &str) -> Result<Option<&'v Table>, ExtractError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Table(t)) => Ok(Some(t)),
        Some(other) => Err(ExtractError::InvalidFormat(format!(
            "{} must be a table, found {}",
            join(path, key),
            other.type_str()
        ))),
    }
}

/// Trimmed scalar text; blank is absent
fn text(table: &Table, key: &str, path: &str) -> Result<Option<String>, ExtractError> {
    let raw = match table.get(key) {
        None => return Ok(None),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Integer(i)) => i.to_string(),
        Some(Value::Float(f)) => f.to_string(),
        Some(Value::Boolean(b)) => b.to_string(),
        Some(Value::Datetime(d)) => d.to_string(),
        Some(other) => {
            return Err(ExtractError::InvalidValue {
                field: join(path, key),
                message: format!("expected a value, found {}", other.type_str()),
            })
        }
    };
    let trimmed = raw.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn required_text(table: &Table, key: &str, path: &str) -> Result<String, ExtractError> {
    text(table, key, path)?.ok_or_else(|| ExtractError::MissingField(join(path, key)))
}

fn text_list(table: &Table, key: &str, path: &str) -> Result<Vec<String>, ExtractError> {
    let values: Vec<&Value> = match table.get(key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(value) => vec![value],
    };
    let mut out = Vec::new();
    for (i, value) in values.into_iter().enumerate() {
        let field = format!("{}[{}]", join(path, key), i);
        match value.as_str().map(str::trim) {
            Some("") => {}
            Some(s) => out.push(s.to_string()),
            None => {
                return Err(ExtractError::InvalidValue {
                    field,
                    message: format!("expected a string, found {}", value.type_str()),
                })
            }
        }
    }
    Ok(out)
}

fn bool_field(table: &Table, key: &str, path: &str) -> Result<Option<bool>, ExtractError> {
    if let Some(Value::Boolean(b)) = table.get(key) {
        return Ok(Some(*b));
    }
    match text(table, key, path)? {
        None => Ok(None),
        Some(raw) => parse_bool(&raw).map(Some).ok_or_else(|| ExtractError::InvalidValue {
            field: join(path, key),
            message: format!("'{}' is not a boolean", raw),
        }),
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
