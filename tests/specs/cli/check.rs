//! Check command specs
//!
//! Verify document validation and the summary of what a document declares.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn check_valid_document_prints_summary() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);

    temp.jobsync()
        .args(&["check", "jobs.toml"])
        .passes()
        .stdout_eq(
            "jobs.toml is valid
  overwrite: true, ignore duplicates: false
  delete commands: 0
  jobs: 1
    group1.reportJob
  triggers: 1
    group1.reportTrigger -> group1.reportJob (simple)
",
        );
}

#[test]
fn check_json_output_lists_triggers() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);

    let stdout = temp
        .jobsync()
        .args(&["check", "jobs.toml", "-o", "json"])
        .passes()
        .stdout();
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(summary["jobs"], serde_json::json!(["group1.reportJob"]));
    assert_eq!(summary["triggers"][0]["kind"], "simple");
}

#[test]
fn check_reports_every_violation() {
    let temp = Project::empty();
    temp.file(
        "bad.toml",
        r#"
[[schedule]]
[[schedule.job]]
name = "a"
job-type = "report"
durability = true
colour = "red"

[[schedule.trigger]]
name = "t"
job-name = "a"
flavour = "mint"
[schedule.trigger.cron]
cron-expression = "0 0 6 * * ?"
"#,
    );

    temp.jobsync()
        .args(&["check", "bad.toml"])
        .fails()
        .stderr_has("bad.toml has 2 validation error(s)")
        .stderr_has("unknown key 'colour'")
        .stderr_has("unknown key 'flavour'");
}

#[test]
fn check_unregistered_job_type_suggests_flag() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);

    temp.jobsync()
        .args(&["check", "jobs.toml", "--job-type", "cleanup"])
        .fails()
        .stderr_has("unknown job type 'report'")
        .stderr_has("--job-type report");
}

#[test]
fn check_missing_file_fails() {
    let temp = Project::empty();

    temp.jobsync()
        .args(&["check", "missing.toml"])
        .fails()
        .stderr_has("missing.toml");
}
