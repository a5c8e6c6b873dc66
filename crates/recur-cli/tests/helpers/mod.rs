#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness running the CLI inside an empty temporary directory, so no
/// `recur.toml` from the developer's machine leaks into a test.
pub struct CliTestHarness {
    temp_dir: TempDir,
    timezone: String,
}

impl CliTestHarness {
    pub fn new() -> Self {
        Self::with_timezone("UTC")
    }

    pub fn with_timezone(timezone: &str) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self {
            temp_dir,
            timezone: timezone.to_string(),
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("recur").expect("Failed to find recur binary");
        cmd.current_dir(self.temp_dir.path())
            .env("RECUR_TIMEZONE", &self.timezone)
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Writes a task document into the temp directory and returns its path.
    pub fn write_task(&self, name: &str, document: &Value) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, serde_json::to_string_pretty(document).unwrap())
            .expect("Failed to write task file");
        path
    }

    pub fn read_task(&self, path: &PathBuf) -> Value {
        let contents = fs::read_to_string(path).expect("Failed to read task file");
        serde_json::from_str(&contents).expect("Task file is not valid JSON")
    }
}

/// Common assertions
pub mod assertions {
    use super::*;

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error")
    }
}
