//! Test fixture helpers for creating test projects
//!
//! Each `TestProject` owns a temporary directory used as `--project-root`,
//! so tests never touch the working directory or each other.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary project directory driven through the `oobee` binary
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    /// Create an empty project without a config file
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a project with `.oobee.toml` set to `config`
    pub fn with_config(config: &str) -> Self {
        let project = Self::new();
        fs::write(project.root().join(".oobee.toml"), config).expect("Failed to write config");
        project
    }

    /// Project root
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Default store directory
    pub fn store_dir(&self) -> PathBuf {
        self.root().join(".oobee")
    }

    /// Path of the persisted record for `key` in the default store
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.store_dir().join(format!("{}.json", key))
    }

    /// Write a raw record, bypassing the CLI
    pub fn write_record(&self, key: &str, contents: &str) {
        fs::create_dir_all(self.store_dir()).expect("Failed to create store dir");
        fs::write(self.record_path(key), contents).expect("Failed to write record");
    }

    /// `oobee` command with emoji disabled and this project as root
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_oobee"));
        cmd.arg("--no-emoji").arg("--project-root").arg(self.root());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Record a scan through the CLI, asserting success
    pub fn add_snapshot(&self, id: &str, must: u32, should: u32, nice: u32, score: u32) {
        self.cmd()
            .args(["snapshot", "add", "--id", id])
            .args(["--must-fix", &must.to_string()])
            .args(["--should-fix", &should.to_string()])
            .args(["--nice-to-have", &nice.to_string()])
            .args(["--score", &score.to_string()])
            .assert()
            .success();
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse stdout of a finished command as JSON
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("Output should be valid JSON")
}
