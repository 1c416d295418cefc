//! Common test utilities for CLI integration tests.
//!
//! Every command runs in an isolated temporary directory with its own user
//! config directory and no inherited `SEATHOLD_*` variables.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const INHERITED_VARS: [&str; 5] = [
    "SEATHOLD_ROWS",
    "SEATHOLD_COLS",
    "SEATHOLD_HOLD_TIMEOUT_MS",
    "SEATHOLD_LOG_MODE",
    "SEATHOLD_CONFIG_DIR",
];

/// Test environment with isolated working and config directories.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Working directory for the command
    pub work_dir: PathBuf,
    /// User config directory passed with --config-dir
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let work_dir = temp_dir.path().join("work");
        let config_dir = temp_dir.path().join("user-config");
        std::fs::create_dir_all(&work_dir).expect("Failed to create work dir");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            work_dir,
            config_dir,
        }
    }

    /// The seathold binary with a clean environment but no global flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("seathold").expect("Failed to find seathold binary");
        cmd.current_dir(&self.work_dir);
        for var in INHERITED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The seathold binary with --config-dir pointing into the test env.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Write a file in the working directory.
    pub fn write_work_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write the user config file.
    pub fn write_user_config(&self, contents: &str) -> PathBuf {
        let path = self.config_dir.join("config.yaml");
        std::fs::write(&path, contents).expect("Failed to write user config");
        path
    }

    pub fn path(&self) -> &Path {
        &self.work_dir
    }

    /// Run a session script and return stdout.
    pub fn session(&self, script: &str, extra_args: &[&str]) -> String {
        let output = self
            .command()
            .args(extra_args)
            .arg("session")
            .write_stdin(script)
            .output()
            .expect("Failed to run session");

        assert!(
            output.status.success(),
            "Session failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}
