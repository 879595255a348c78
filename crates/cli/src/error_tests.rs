// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobsync_core::{Key, TriggerKey, TypeLoadError};
use yare::parameterized;

#[test]
fn display_lists_context_and_numbered_suggestions() {
    let err = JobsyncError::new("something broke")
        .with_context("first detail")
        .with_suggestion("try this")
        .with_suggestion("then that");

    assert_eq!(
        err.to_string(),
        "error: something broke\n\n  -> first detail\n\nsuggestions:\n  1. try this\n  2. then that\n"
    );
}

#[test]
fn type_load_suggests_registering_the_type() {
    let err = JobsyncError::from_process(
        "jobs.toml",
        ProcessError::TypeLoad(TypeLoadError {
            name: "report".to_string(),
        }),
    );

    assert_eq!(err.message, "unknown job type 'report'");
    assert_eq!(err.suggestions, vec!["Register it with: --job-type report"]);
    assert!(std::error::Error::source(&err).is_some());
}

#[parameterized(
    job = { EntityKind::Job, "job group1.reportJob already exists", "keep existing jobs" },
    trigger = { EntityKind::Trigger, "trigger group1.reportJob already exists", "keep existing triggers" },
)]
fn already_exists_names_the_key(kind: EntityKind, message: &str, hint: &str) {
    let err = JobsyncError::from_process(
        "jobs.toml",
        ProcessError::AlreadyExists {
            kind,
            key: Key::new("reportJob", "group1"),
        },
    );

    assert_eq!(err.message, message);
    assert_eq!(err.suggestions.len(), 2);
    assert!(err.suggestions[1].ends_with(hint));
}

#[test]
fn validation_lists_each_violation_as_context() {
    let violations = jobsync_document::validate_document("[extra]\nkey = 1\n[other]\n");
    let count = violations.len();

    let err = JobsyncError::from_process(
        "jobs.toml",
        ProcessError::Validation(jobsync_document::ValidationErrors { violations }),
    );

    assert_eq!(err.message, format!("jobs.toml has {} validation error(s)", count));
    assert_eq!(err.context.len(), count);
    assert!(count > 0);
}

#[test]
fn race_exhaustion_suggests_retrying() {
    let err = JobsyncError::from_process(
        "jobs.toml",
        ProcessError::RaceRetriesExhausted {
            key: TriggerKey::new("t", "g"),
        },
    );

    assert!(err.message.contains("g.t"));
    assert_eq!(err.suggestions[0], "Retry the apply");
}
