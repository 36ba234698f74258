//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host CI cannot leak in
const PIPELINE_ENV: &[&str] = &[
    "GITHUB_WORKSPACE",
    "GITHUB_OUTPUT",
    "APP_MATRIX",
    "RAW_APP_NAMES",
    "APP_NAMES",
    "INIT_PODS",
    "DEFAULT_VERSION_FILE",
    "DEFAULT_VERSION_KEY",
    "STRICT_APP_NAMES",
    "RUST_LOG",
];

/// Test workspace context
///
/// Creates a temporary directory holding version files and the step output
/// file, and runs the binary against it.
pub struct TestProject {
    /// Temporary directory for the test workspace
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new test workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test workspace
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test workspace
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Path of the step output file
    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("github_output")
    }

    /// Command for the binary with a clean pipeline environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_buildmatrix"));
        cmd.current_dir(self.path());
        for var in PIPELINE_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Run `buildmatrix matrix` with the given environment
    pub fn run_matrix(&self, env: &[(&str, &str)]) -> Output {
        let mut cmd = self.command();
        cmd.arg("matrix")
            .env("GITHUB_WORKSPACE", self.path())
            .env("GITHUB_OUTPUT", self.output_path());
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output().expect("Failed to execute buildmatrix matrix")
    }

    /// Parsed `key=value` lines from the output file
    pub fn outputs(&self) -> Vec<(String, String)> {
        if !self.output_path().exists() {
            return Vec::new();
        }
        self.read_file("github_output")
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Value of one output key
    pub fn output(&self, key: &str) -> String {
        self.outputs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .unwrap_or_else(|| panic!("Output '{key}' not written"))
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample package.json for testing
#[allow(dead_code)]
pub const SAMPLE_PACKAGE_JSON: &str = r#"{
  "name": "web",
  "version": "1.2.0",
  "scripts": { "build": "vite build" }
}
"#;

/// Sample Cargo.toml for testing
#[allow(dead_code)]
pub const SAMPLE_CARGO_TOML: &str = r#"
[package]
name = "api"
version = "1.3.0"
edition = "2021"

[dependencies]
serde = "1"
"#;
