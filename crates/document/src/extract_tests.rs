// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parser::parse_document;
use chrono::TimeZone;
use jobsync_core::{FakeClock, JobTypeRegistry};
use yare::parameterized;

fn clock() -> FakeClock {
    FakeClock::at(Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap())
}

fn loader() -> JobTypeRegistry {
    JobTypeRegistry::new().with("report").with("cleanup")
}

fn extract(content: &str) -> Result<Document, ExtractError> {
    let tree = parse_document(content).unwrap();
    extract_document(&tree, &loader(), &clock())
}

const REPORT_DOCUMENT: &str = r#"
[[schedule]]
[[schedule.job]]
name = " reportJob "
group = "group1"
description = "   "
job-type = "report"
durability = false
recover = "true"
[[schedule.job.job-data-map.entry]]
key = "format"
value = "pdf"
[[schedule.job.job-data-map.entry]]
key = "format"
value = "csv"
[[schedule.job.job-data-map.entry]]
key = "empty"

[[schedule.trigger]]
name = "reportTrigger"
group = "group1"
job-name = "reportJob"
job-group = "group1"
start-time = 2026-06-01T00:00:00Z
misfire-instruction = "MISFIRE_INSTRUCTION_FIRE_NOW"
[schedule.trigger.simple]
repeat-count = 3
repeat-interval = 60000
"#;

#[test]
fn extracts_report_job_and_trigger() {
    let doc = extract(REPORT_DOCUMENT).unwrap();

    assert_eq!(doc.jobs.len(), 1);
    let job = &doc.jobs[0];
    assert_eq!(job.key, JobKey::new("reportJob", "group1"));
    assert_eq!(job.description, None);
    assert_eq!(job.job_type.name(), "report");
    assert!(!job.durable);
    assert!(job.request_recovery);
    assert!(!job.volatile);
    assert_eq!(job.data.len(), 3);
    assert_eq!(job.data.get("format"), Some("csv"));
    assert_eq!(job.data.get("empty"), Some(""));

    assert_eq!(doc.triggers.len(), 1);
    let trigger = &doc.triggers[0];
    assert_eq!(trigger.key, TriggerKey::new("reportTrigger", "group1"));
    assert_eq!(trigger.job_key, job.key);
    assert_eq!(
        trigger.start_time,
        Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(trigger.misfire_instruction, misfire::simple::FIRE_NOW);
    assert_eq!(
        trigger.schedule,
        TriggerSchedule::Simple {
            repeat_count: RepeatCount::Times(3),
            repeat_interval: Duration::from_secs(60),
        }
    );
}

#[test]
fn empty_document_uses_default_directives() {
    let doc = extract("").unwrap();
    assert_eq!(doc.directives, Directives::default());
    assert!(doc.directives.overwrite_existing_data);
    assert!(!doc.directives.ignore_duplicates);
    assert!(doc.commands.is_empty());
    assert!(doc.jobs.is_empty());
    assert!(doc.triggers.is_empty());
}

#[test]
fn only_first_directive_block_is_honored() {
    let doc = extract(
        r#"
[[processing-directives]]
overwrite-existing-data = false
ignore-duplicates = true

[[processing-directives]]
overwrite-existing-data = true
ignore-duplicates = false
"#,
    )
    .unwrap();
    assert!(!doc.directives.overwrite_existing_data);
    assert!(doc.directives.ignore_duplicates);
}

#[test]
fn pre_processing_commands_accumulate_in_order() {
    let doc = extract(
        r#"
[[pre-processing-commands]]
delete-jobs-in-group = ["*", "  ", "old"]
delete-triggers-in-group = "stale"
delete-job = [{ name = "a", group = "g" }, { name = "b" }]

[[pre-processing-commands]]
delete-jobs-in-group = "more"
delete-trigger = { name = "t", group = "tg" }
"#,
    )
    .unwrap();

    assert_eq!(doc.commands.job_groups_to_delete, vec!["*", "old", "more"]);
    assert_eq!(doc.commands.trigger_groups_to_delete, vec!["stale"]);
    assert_eq!(
        doc.commands.jobs_to_delete,
        vec![JobKey::new("a", "g"), JobKey::new("b", DEFAULT_GROUP)]
    );
    assert_eq!(doc.commands.triggers_to_delete, vec![TriggerKey::new("t", "tg")]);
}

#[parameterized(
    delete_job = { "delete-job" },
    delete_trigger = { "delete-trigger" },
)]
fn delete_command_requires_a_name(command: &str) {
    let content = format!(
        "[[pre-processing-commands]]\n{} = [{{ name = \" \", group = \"g\" }}]\n",
        command
    );
    let err = extract(&content).unwrap_err();
    assert!(
        matches!(&err, ExtractError::MissingField(f) if f.ends_with(".name")),
        "{err}"
    );
}

#[test]
fn missing_groups_default() {
    let doc = extract(
        r#"
[[schedule.job]]
name = "j"
job-type = "cleanup"
durability = true

[[schedule.trigger]]
name = "t"
job-name = "j"
simple = {}
"#,
    )
    .unwrap();
    assert_eq!(doc.jobs[0].key.group(), DEFAULT_GROUP);
    assert_eq!(doc.triggers[0].key.group(), DEFAULT_GROUP);
    assert_eq!(doc.triggers[0].job_key, JobKey::new("j", DEFAULT_GROUP));
    assert_eq!(
        doc.triggers[0].schedule,
        TriggerSchedule::Simple {
            repeat_count: RepeatCount::Times(0),
            repeat_interval: Duration::ZERO,
        }
    );
}

#[test]
fn jobs_and_triggers_keep_document_order_across_schedules() {
    let doc = extract(
        r#"
[[schedule]]
[[schedule.job]]
name = "first"
job-type = "report"
durability = true
[[schedule.trigger]]
name = "t1"
job-name = "first"
simple = {}

[[schedule]]
[[schedule.job]]
name = "second"
job-type = "report"
durability = true
[[schedule.trigger]]
name = "t2"
job-name = "second"
simple = {}
"#,
    )
    .unwrap();
    let jobs: Vec<_> = doc.jobs.iter().map(|j| j.key.name()).collect();
    let triggers: Vec<_> = doc.triggers.iter().map(|t| t.key.name()).collect();
    assert_eq!(jobs, vec!["first", "second"]);
    assert_eq!(triggers, vec!["t1", "t2"]);
}

#[parameterized(
    word = { "\"indefinite\"", RepeatCount::Indefinite },
    mixed_case = { "\" Indefinite \"", RepeatCount::Indefinite },
    sentinel = { "-1", RepeatCount::Indefinite },
    integer = { "10", RepeatCount::Times(10) },
    string_integer = { "\"4\"", RepeatCount::Times(4) },
)]
fn repeat_count_parsing(raw: &str, expected: RepeatCount) {
    let content = format!(
        "[[schedule.trigger]]\nname = \"t\"\njob-name = \"j\"\nsimple = {{ repeat-count = {} }}\n",
        raw
    );
    let doc = extract(&content).unwrap();
    match &doc.triggers[0].schedule {
        TriggerSchedule::Simple { repeat_count, .. } => assert_eq!(*repeat_count, expected),
        other => panic!("expected simple schedule, got {other:?}"),
    }
}

#[parameterized(
    word = { "repeat-count = \"often\"" },
    below_sentinel = { "repeat-count = -5" },
    negative_interval = { "repeat-interval = -1" },
    fractional_interval = { "repeat-interval = \"1.5\"" },
)]
fn bad_simple_numbers_are_config_errors(field: &str) {
    let content = format!(
        "[[schedule.trigger]]\nname = \"t\"\njob-name = \"j\"\nsimple = {{ {} }}\n",
        field
    );
    assert!(matches!(
        extract(&content).unwrap_err(),
        ExtractError::InvalidValue { .. }
    ));
}

#[test]
fn cron_trigger_with_timezone() {
    let doc = extract(
        r#"
[[schedule.trigger]]
name = "nightly"
job-name = "j"
misfire-instruction = "DO_NOTHING"
[schedule.trigger.cron]
cron-expression = " 0 0 2 * * ? "
time-zone = "America/New_York"
"#,
    )
    .unwrap();
    let trigger = &doc.triggers[0];
    assert_eq!(trigger.misfire_instruction, misfire::cron::DO_NOTHING);
    assert_eq!(
        trigger.schedule,
        TriggerSchedule::Cron {
            expression: "0 0 2 * * ?".to_string(),
            timezone: Some("America/New_York".to_string()),
        }
    );
}

#[test]
fn unknown_timezone_fails() {
    let err = extract(
        r#"
[[schedule.trigger]]
name = "t"
job-name = "j"
cron = { cron-expression = "0 0 * * * ?", time-zone = "Mars/Olympus" }
"#,
    )
    .unwrap_err();
    match err {
        ExtractError::InvalidTimezone { zone, .. } => assert_eq!(zone, "Mars/Olympus"),
        other => panic!("expected InvalidTimezone, got {other:?}"),
    }
}

#[test]
fn cron_requires_expression() {
    let err = extract(
        "[[schedule.trigger]]\nname = \"t\"\njob-name = \"j\"\ncron = { time-zone = \"UTC\" }\n",
    )
    .unwrap_err();
    assert!(matches!(err, ExtractError::MissingField(f) if f.ends_with("cron.cron-expression")));
}

#[parameterized(
    neither = { "" },
    both = { "simple = {}\ncron = { cron-expression = \"* * * * * ?\" }" },
)]
fn trigger_needs_exactly_one_shape(payload: &str) {
    let content = format!(
        "[[schedule.trigger]]\nname = \"t\"\njob-name = \"j\"\n{}\n",
        payload
    );
    assert!(matches!(
        extract(&content).unwrap_err(),
        ExtractError::UnknownTriggerType(_)
    ));
}

#[test]
fn misfire_names_are_scoped_to_the_kind() {
    let err = extract(
        r#"
[[schedule.trigger]]
name = "t"
job-name = "j"
misfire-instruction = "MISFIRE_INSTRUCTION_FIRE_ONCE_NOW"
simple = {}
"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ExtractError::UnknownMisfireInstruction {
            kind: TriggerKind::Simple,
            ..
        }
    ));
}

#[test]
fn unknown_job_type_is_a_type_load_error() {
    let err = extract("[[schedule.job]]\nname = \"j\"\njob-type = \"mystery\"\n").unwrap_err();
    match err {
        ExtractError::TypeLoad(e) => assert_eq!(e.name, "mystery"),
        other => panic!("expected TypeLoad, got {other:?}"),
    }
}

#[test]
fn missing_start_time_uses_clock() {
    let doc = extract("[[schedule.trigger]]\nname = \"t\"\njob-name = \"j\"\nsimple = {}\n").unwrap();
    assert_eq!(doc.triggers[0].start_time, clock().now());
}

#[test]
fn start_time_seconds_in_future() {
    let doc = extract(
        "[[schedule.trigger]]\nname = \"t\"\njob-name = \"j\"\nstart-time-seconds-in-future = 90\nsimple = {}\n",
    )
    .unwrap();
    assert_eq!(
        doc.triggers[0].start_time,
        clock().now() + chrono::Duration::seconds(90)
    );
}

#[test]
fn end_time_before_start_time_fails() {
    let err = extract(
        r#"
[[schedule.trigger]]
name = "t"
job-name = "j"
start-time = "2026-06-01T00:00:00Z"
end-time = "2026-01-01T00:00:00+02:00"
simple = {}
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ExtractError::InvalidValue { field, .. } if field.ends_with("end-time")));
}

#[test]
fn bad_boolean_fails() {
    let err = extract("[[schedule.job]]\nname = \"j\"\njob-type = \"report\"\ndurability = \"maybe\"\n")
        .unwrap_err();
    assert!(matches!(err, ExtractError::InvalidValue { field, .. } if field == "schedule.job[0].durability"));
}

#[test]
fn missing_job_name_fails() {
    let err = extract("[[schedule.job]]\njob-type = \"report\"\n").unwrap_err();
    assert!(matches!(err, ExtractError::MissingField(f) if f == "schedule.job[0].name"));
}
