//! Shared test harness for answergrade integration tests.
//!
//! Every invocation runs with its own HOME so the grade log and default
//! config never touch the real user directories.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// ---------------------------------------------------------------------------
// RunResult
// ---------------------------------------------------------------------------

/// Captures exit code, stdout, and stderr from an answergrade invocation.
pub struct RunResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    /// Parse each non-empty stdout line as JSON.
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| {
                    panic!(
                        "Failed to parse stdout line as JSON: {e}\nline: {l}\nstderr: {}",
                        self.stderr
                    )
                })
            })
            .collect()
    }

    /// Find the JSON line for `custom_id`.
    pub fn line_for(&self, custom_id: &str) -> serde_json::Value {
        self.json_lines()
            .into_iter()
            .find(|v| v["custom_id"] == custom_id)
            .unwrap_or_else(|| panic!("No output line for {custom_id}\nstdout: {}", self.stdout))
    }

    /// Assert the process exited with `expected`.
    pub fn assert_exit(&self, expected: i32) {
        assert_eq!(
            self.exit_code, expected,
            "Expected exit code {} but got {}\nstdout: {}\nstderr: {}",
            expected, self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that stderr contains `substring`.
    pub fn assert_stderr_contains(&self, substring: &str) {
        assert!(
            self.stderr.contains(substring),
            "Expected stderr to contain '{}' but got: {}",
            substring,
            self.stderr
        );
    }
}

// ---------------------------------------------------------------------------
// TestEnv
// ---------------------------------------------------------------------------

/// An isolated HOME, optionally with a default config file.
/// The temp directory is cleaned up on drop.
pub struct TestEnv {
    home_dir: tempfile::TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home_dir: tempfile::TempDir::new().expect("Failed to create temp HOME dir"),
        }
    }

    /// Write `~/.config/answergrade/config.yaml`.
    pub fn with_default_config(self, yaml: &str) -> Self {
        let dir = self.config_dir();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.yaml"), yaml).unwrap();
        self
    }

    pub fn home_path(&self) -> &Path {
        self.home_dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.home_dir.path().join(".config").join("answergrade")
    }

    /// Default grade log location under this HOME.
    pub fn log_path(&self) -> PathBuf {
        self.home_dir
            .path()
            .join(".local")
            .join("state")
            .join("answergrade")
            .join("grades.jsonl")
    }

    /// Run answergrade with `args`, feeding `stdin` if given.
    pub fn run(&self, args: &[&str], stdin: Option<&str>) -> RunResult {
        run_with_home(args, stdin, self.home_path())
    }
}

// ---------------------------------------------------------------------------
// Standalone helpers
// ---------------------------------------------------------------------------

/// Path to the compiled answergrade binary.
pub fn answergrade_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_answergrade"))
}

/// Path to a file under tests/fixtures.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Same as [`fixture_path`], as a string for argv.
pub fn fixture(name: &str) -> String {
    fixture_path(name).to_string_lossy().to_string()
}

/// Run answergrade in a throwaway HOME.
pub fn run(args: &[&str], stdin: Option<&str>) -> RunResult {
    TestEnv::new().run(args, stdin)
}

pub fn run_with_home(args: &[&str], stdin: Option<&str>, home: &Path) -> RunResult {
    let mut child = Command::new(answergrade_bin())
        .args(args)
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn answergrade");

    if let Some(input) = stdin {
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
    }

    let output = child.wait_with_output().unwrap();
    RunResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
