// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schema validation for scheduling documents.
//!
//! Validation never stops at the first problem: every violation found in
//! the tree is collected and returned. Turning a non-empty list into an
//! error is a separate, explicit step ([`check_violations`]).

use crate::parser::parse_document;
use crate::schema::{Element, Field, Kind, DOCUMENT};
use jobsync_core::{misfire, TriggerKind};
use std::fmt;
use toml::value::Table;
use toml::Value;

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The text is not valid TOML
    Syntax { message: String },
    /// Key not allowed in this element
    UnknownKey { path: String, key: String },
    /// Required key absent (or blank)
    MissingRequired { path: String, field: &'static str },
    /// Value of the wrong TOML type
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Value of the right type that cannot be interpreted
    InvalidValue {
        path: String,
        value: String,
        expected: &'static str,
    },
    /// Trigger without exactly one of `simple` / `cron`
    TriggerPayload { path: String, found: usize },
    /// Misfire name not defined for the trigger kind
    UnknownMisfireInstruction {
        path: String,
        name: String,
        kind: TriggerKind,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Syntax { message } => write!(f, "invalid TOML: {}", message.trim()),
            Violation::UnknownKey { path, key } => {
                write!(f, "unknown key '{}' in {}", key, display_path(path))
            }
            Violation::MissingRequired { path, field } => {
                write!(f, "{} missing required field '{}'", display_path(path), field)
            }
            Violation::WrongType {
                path,
                expected,
                found,
            } => write!(f, "{}: expected {}, found {}", path, expected, found),
            Violation::InvalidValue {
                path,
                value,
                expected,
            } => write!(f, "{}: '{}' is not {}", path, value, expected),
            Violation::TriggerPayload { path, found } => write!(
                f,
                "trigger {} must contain exactly one of [simple] or [cron], found {}",
                path, found
            ),
            Violation::UnknownMisfireInstruction { path, name, kind } => write!(
                f,
                "{}: unknown misfire instruction '{}' for a {} trigger",
                path, name, kind
            ),
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "document root"
    } else {
        path
    }
}

/// Collection of violations, raised by [`check_violations`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "document validation failed with {} error(s):",
            self.violations.len()
        )?;
        for (i, violation) in self.violations.iter().enumerate() {
            writeln!(f, "  {}: {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Fail if any violation was collected
pub fn check_violations(violations: &[Violation]) -> Result<(), ValidationErrors> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors {
            violations: violations.to_vec(),
        })
    }
}

/// Validate raw document text. A syntax error is reported as a violation.
pub fn validate_document(content: &str) -> Vec<Violation> {
    match parse_document(content) {
        Ok(tree) => validate_tree(&tree),
        Err(e) => vec![Violation::Syntax {
            message: e.to_string(),
        }],
    }
}

/// Validate a parsed document tree
pub fn validate_tree(root: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    match root.as_table() {
        Some(table) => validate_element(table, &DOCUMENT, "", &mut violations),
        None => violations.push(Violation::WrongType {
            path: String::new(),
            expected: "table",
            found: root.type_str(),
        }),
    }
    violations
}

fn validate_element(
    table: &Table,
    element: &Element,
    path: &str,
    violations: &mut Vec<Violation>,
) {
    for (key, value) in table {
        match element.field(key) {
            Some(field) => validate_value(value, field, &join(path, key), violations),
            None => violations.push(Violation::UnknownKey {
                path: path.to_string(),
                key: key.clone(),
            }),
        }
    }

    for field in element.fields.iter().filter(|f| f.required) {
        if table.get(field.name).map_or(true, is_blank) {
            violations.push(Violation::MissingRequired {
                path: path.to_string(),
                field: field.name,
            });
        }
    }

    if let Some(check) = element.check {
        check(table, path, violations);
    }
}

fn is_blank(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

fn validate_value(value: &Value, field: &Field, path: &str, violations: &mut Vec<Violation>) {
    let wrong_type = |expected| Violation::WrongType {
        path: path.to_string(),
        expected,
        found: value.type_str(),
    };

    match field.kind {
        Kind::Text => {
            if !value.is_str() {
                violations.push(wrong_type("string"));
            }
        }
        Kind::Bool => match value {
            Value::Boolean(_) => {}
            Value::String(s) if parse_bool(s).is_some() => {}
            Value::String(s) => violations.push(Violation::InvalidValue {
                path: path.to_string(),
                value: s.clone(),
                expected: "a boolean",
            }),
            _ => violations.push(wrong_type("boolean")),
        },
        Kind::Integer | Kind::RepeatCount => match value {
            Value::Integer(_) => {}
            Value::String(s) => {
                let s = s.trim();
                let indefinite =
                    matches!(field.kind, Kind::RepeatCount) && s.eq_ignore_ascii_case("indefinite");
                if !s.is_empty() && !indefinite && s.parse::<i64>().is_err() {
                    violations.push(Violation::InvalidValue {
                        path: path.to_string(),
                        value: s.to_string(),
                        expected: "an integer",
                    });
                }
            }
            _ => violations.push(wrong_type("integer")),
        },
        // Local dates and times carry no offset, so they fail like bad strings
        Kind::Timestamp => {
            let raw = match value {
                Value::Datetime(d) => d.to_string(),
                Value::String(s) => s.trim().to_string(),
                _ => {
                    violations.push(wrong_type("datetime"));
                    return;
                }
            };
            if !raw.is_empty() && chrono::DateTime::parse_from_rfc3339(&raw).is_err() {
                violations.push(Violation::InvalidValue {
                    path: path.to_string(),
                    value: raw,
                    expected: "an RFC 3339 timestamp",
                });
            }
        }
        Kind::TextList => match value {
            Value::String(_) => {}
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_str() {
                        violations.push(Violation::WrongType {
                            path: format!("{}[{}]", path, i),
                            expected: "string",
                            found: item.type_str(),
                        });
                    }
                }
            }
            _ => violations.push(wrong_type("string or array of strings")),
        },
        Kind::One(element) => match value {
            Value::Table(table) => validate_element(table, element, path, violations),
            _ => violations.push(wrong_type("table")),
        },
        Kind::Many(element) => match value {
            Value::Table(table) => validate_element(table, element, path, violations),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    match item {
                        Value::Table(table) => {
                            validate_element(table, element, &item_path, violations)
                        }
                        other => violations.push(Violation::WrongType {
                            path: item_path,
                            expected: "table",
                            found: other.type_str(),
                        }),
                    }
                }
            }
            _ => violations.push(wrong_type("table or array of tables")),
        },
    }
}

/// Dotted path of `key` under `path`
pub(crate) fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// A trigger carries exactly one payload, and its misfire name must exist
/// for that payload's kind.
pub(crate) fn check_trigger(table: &Table, path: &str, violations: &mut Vec<Violation>) {
    let simple = table.contains_key("simple");
    let cron = table.contains_key("cron");
    let kind = match (simple, cron) {
        (true, false) => TriggerKind::Simple,
        (false, true) => TriggerKind::Cron,
        (s, c) => {
            violations.push(Violation::TriggerPayload {
                path: path.to_string(),
                found: usize::from(s) + usize::from(c),
            });
            return;
        }
    };

    if let Some(name) = table
        .get("misfire-instruction")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        if misfire::resolve(kind, name).is_none() {
            violations.push(Violation::UnknownMisfireInstruction {
                path: join(path, "misfire-instruction"),
                name: name.to_string(),
                kind,
            });
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
