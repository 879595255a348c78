//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();

    temp.jobsync()
        .args(&["--help"])
        .passes()
        .stdout_has("check")
        .stdout_has("apply");
}

#[test]
fn apply_requires_state_file() {
    let temp = Project::empty();
    temp.file("jobs.toml", REPORT_DOCUMENT);

    temp.jobsync()
        .args(&["apply", "jobs.toml"])
        .fails()
        .stderr_has("--state");
}
