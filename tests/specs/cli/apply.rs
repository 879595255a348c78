//! Apply command specs
//!
//! Verify documents are reconciled into the state file under each policy.

use crate::prelude::*;
use crate::prelude::assert_eq;

const SYSTEM_JOBS: &str = r#"
[[schedule]]
[[schedule.job]]
name = "a"
group = "system"
job-type = "cleanup"
durability = true

[[schedule.job]]
name = "b"
group = "reports"
job-type = "report"
durability = true
"#;

#[test]
fn apply_stores_job_and_trigger() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);

    temp.apply("jobs.toml", &[])
        .passes()
        .stdout_has("Applied jobs.toml to")
        .stdout_has("jobs: 1 added, 0 skipped, 0 deleted")
        .stdout_has("triggers: 1 scheduled, 0 rescheduled, 0 skipped, 0 unscheduled");

    assert_eq!(temp.job_keys(), vec!["group1.reportJob".to_string()]);
    assert_eq!(temp.trigger_keys(), vec!["group1.reportTrigger".to_string()]);
    let state = temp.state();
    assert_eq!(state["triggers"][0]["job_key"]["name"], "reportJob");
}

#[test]
fn reapply_with_overwrite_reschedules() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);
    temp.apply("jobs.toml", &[]).passes();
    let first = temp.state();

    temp.apply("jobs.toml", &[])
        .passes()
        .stdout_has("triggers: 0 scheduled, 1 rescheduled");

    assert_eq!(temp.state(), first);
}

#[test]
fn reapply_ignoring_duplicates_changes_nothing() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);
    temp.apply("jobs.toml", &[]).passes();
    let first = temp.state();

    temp.apply(
        "jobs.toml",
        &["--overwrite", "false", "--ignore-duplicates", "true"],
    )
    .passes()
    .stdout_has("jobs: 0 added, 1 skipped")
    .stdout_has("triggers: 0 scheduled, 0 rescheduled, 1 skipped");

    assert_eq!(temp.state(), first);
}

#[test]
fn reapply_without_overwrite_fails_on_existing_job() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);
    temp.apply("jobs.toml", &[]).passes();

    temp.apply("jobs.toml", &["--overwrite", "false"])
        .fails()
        .stderr_has("job group1.reportJob already exists")
        .stderr_has("ignore-duplicates");
}

#[test]
fn wildcard_delete_spares_never_delete_groups() {
    let temp = Project::empty();
    temp.file("jobs.toml", SYSTEM_JOBS);
    temp.file(
        "purge.toml",
        "[[pre-processing-commands]]\ndelete-jobs-in-group = [\"*\"]\n",
    );
    temp.apply("jobs.toml", &[]).passes();

    temp.apply("purge.toml", &["--never-delete-job-group", "system"])
        .passes()
        .stdout_has("jobs: 0 added, 0 skipped, 1 deleted");

    assert_eq!(temp.job_keys(), vec!["system.a".to_string()]);
}

#[test]
fn invalid_document_leaves_state_untouched() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);
    temp.file("bad.toml", &format!("{REPORT_DOCUMENT}\n[extra]\nkey = 1\n"));
    temp.apply("jobs.toml", &[]).passes();
    let first = temp.state();

    temp.apply("bad.toml", &[])
        .fails()
        .stderr_has("validation error");

    assert_eq!(temp.state(), first);
}

#[test]
fn unknown_job_type_is_rejected() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);

    temp.apply("jobs.toml", &["--job-type", "cleanup"])
        .fails()
        .stderr_has("unknown job type 'report'");

    assert!(!temp.state_path().exists());
}

#[test]
fn non_durable_job_without_trigger_is_rejected() {
    let temp = Project::empty();
    temp.file(
        "jobs.toml",
        "[[schedule]]\n[[schedule.job]]\nname = \"lonely\"\njob-type = \"report\"\ndurability = false\n",
    );

    temp.apply("jobs.toml", &[])
        .fails()
        .stderr_has("non-durable job DEFAULT.lonely has no triggers");
}

#[test]
fn config_file_is_honored() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);
    temp.file("jobsync.toml", "max-race-retries = 1\nrace-backoff = \"5ms\"\n");

    temp.apply("jobs.toml", &["--config", "jobsync.toml"]).passes();

    temp.file("broken.toml", "max-race-retries = \"many\"\n");
    temp.apply("jobs.toml", &["--config", "broken.toml"]).fails();
}
