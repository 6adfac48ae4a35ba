//! Shared testing utilities for prompt-decorators CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled binary within the work directory.
    ///
    /// Config and log variables from the outer environment are cleared.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("prompt-decorators").expect("Failed to locate prompt-decorators binary");
        cmd.current_dir(&self.work_dir)
            .env_remove("PROMPT_DECORATORS_CONFIG")
            .env_remove("PROMPT_DECORATORS_LOG");
        cmd
    }

    /// Write `content` to `relative` under the work directory, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write a `prompt-decorators.toml` into the work directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write("prompt-decorators.toml", content)
    }

    /// Directory outside the work directory, for files the CLI must be told about.
    pub fn outside(&self, relative: &str) -> PathBuf {
        let path = self.root.path().join(relative);
        fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }
}
