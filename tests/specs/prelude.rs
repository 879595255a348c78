//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::Predicate;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use similar_asserts::assert_eq;

/// One durable-free job with a single simple trigger
pub const REPORT_DOCUMENT: &str = r#"
[[schedule]]
[[schedule.job]]
name = "reportJob"
group = "group1"
job-type = "report"
durability = false
[[schedule.job.job-data-map.entry]]
key = "format"
value = "pdf"

[[schedule.trigger]]
name = "reportTrigger"
group = "group1"
job-name = "reportJob"
job-group = "group1"
start-time = 2026-01-01T00:00:00Z
[schedule.trigger.simple]
repeat-count = 3
repeat-interval = 60000
"#;

/// Temporary working directory holding documents and a state file
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("state.json")
    }

    /// Parsed contents of the state file
    pub fn state(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.state_path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    /// `group.name` of every stored job, in stored order
    pub fn job_keys(&self) -> Vec<String> {
        keys_of(&self.state()["jobs"])
    }

    /// `group.name` of every stored trigger, in stored order
    pub fn trigger_keys(&self) -> Vec<String> {
        keys_of(&self.state()["triggers"])
    }

    pub fn jobsync(&self) -> CliBuilder {
        CliBuilder {
            args: Vec::new(),
            dir: self.dir.path().to_path_buf(),
        }
    }

    /// `jobsync apply <document> --state state.json` plus extra args
    pub fn apply(&self, document: &str, extra: &[&str]) -> CliBuilder {
        let state = self.state_path();
        let mut args = vec!["apply", document, "--state", state.to_str().unwrap()];
        args.extend_from_slice(extra);
        self.jobsync().args(&args)
    }
}

fn keys_of(entries: &serde_json::Value) -> Vec<String> {
    entries
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    let key = &item["key"];
                    format!(
                        "{}.{}",
                        key["group"].as_str().unwrap(),
                        key["name"].as_str().unwrap()
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

pub struct CliBuilder {
    args: Vec<String>,
    dir: PathBuf,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    fn run(self) -> std::process::Output {
        Command::cargo_bin("jobsync")
            .unwrap()
            .current_dir(&self.dir)
            .env_remove("RUST_LOG")
            .args(&self.args)
            .output()
            .unwrap()
    }

    /// Run and expect success
    pub fn passes(self) -> RunAssert {
        let output = self.run();
        let run = RunAssert::from(output);
        assert!(
            run.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }

    /// Run and expect failure
    pub fn fails(self) -> RunAssert {
        let output = self.run();
        let run = RunAssert::from(output);
        assert!(
            !run.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }
}

pub struct RunAssert {
    success: bool,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for RunAssert {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        self.stdout.clone()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout.as_str(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            predicates::str::contains(needle).eval(&self.stdout),
            "stdout missing {:?}:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            predicates::str::contains(needle).eval(&self.stderr),
            "stderr missing {:?}:\n{}",
            needle,
            self.stderr
        );
        self
    }
}
