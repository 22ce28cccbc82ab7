//! Test support utilities for surge integration tests.
//!
//! Provides an isolated environment per test: a temp project directory (the
//! child's working directory) and a temp storage tree, wired through
//! `STORAGE_PATH`. No process-global state is mutated, so tests run in
//! parallel safely.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

pub struct Test {
    /// Working directory for the child process (where `.env` would live)
    pub dir: TempDir,
    /// Storage tree the services write their configs into
    pub storage: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let storage = TempDir::new().expect("failed to create temp storage");
        Self { dir, storage }
    }

    /// A surge command bound to this test's directories.
    ///
    /// Polling is collapsed to a single immediate attempt so connection
    /// failures surface instantly instead of after the production budget.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("surge").expect("failed to find surge binary");
        cmd.current_dir(self.dir.path());
        cmd.env("STORAGE_PATH", self.storage.path());
        cmd.env("NO_COLOR", "1");
        cmd.env("SURGE_POLL_ATTEMPTS", "1");
        cmd.env("SURGE_POLL_DELAY_SECS", "0");
        cmd
    }

    pub fn status(&self, vars: &[(&str, &str)]) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("status");
        for (k, v) in vars {
            cmd.env(k, v);
        }
        cmd.output().expect("failed to run surge status")
    }

    pub fn configure(&self, service: &str, vars: &[(&str, &str)]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["configure", service]);
        for (k, v) in vars {
            cmd.env(k, v);
        }
        cmd.output().expect("failed to run surge configure")
    }

    pub fn audit(&self, vars: &[(&str, &str)]) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("audit");
        for (k, v) in vars {
            cmd.env(k, v);
        }
        cmd.output().expect("failed to run surge audit")
    }

    /// Write a config file under the storage tree, creating parents.
    pub fn write_config(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.storage.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create config dir");
        }
        std::fs::write(&path, contents).expect("failed to write config file");
        path
    }

    /// Write a file in the project directory (e.g. a `.env`).
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }

    pub fn storage_path(&self) -> &Path {
        self.storage.path()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success, got {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        stdout(output),
        stderr(output)
    );
}

pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "expected failure, got success\nstdout: {}",
        stdout(output)
    );
}

pub fn assert_stdout_contains(output: &Output, needle: &str) {
    let out = stdout(output);
    assert!(
        out.contains(needle),
        "stdout missing {needle:?}\nstdout: {out}"
    );
}

pub fn assert_stderr_contains(output: &Output, needle: &str) {
    let err = stderr(output);
    assert!(
        err.contains(needle),
        "stderr missing {needle:?}\nstderr: {err}"
    );
}
