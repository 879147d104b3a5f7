//! Process execution utilities
//!
//! Sniffs are almost always shell one-liners, so the main entry point here is
//! [`local`], which runs a command line through `sh -c` in the current
//! directory and captures everything it prints.

use crate::error::{Error, Result};
use crate::scope::echo_running;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

/// Result of a command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// The command line that was run
    pub command: String,
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command, -1 when killed by a signal
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Wall-clock time spent in the command
    pub duration: Duration,
}

impl CommandResult {
    /// Create from std::process::Output
    pub fn from_output(command: impl Into<String>, output: Output, duration: Duration) -> Self {
        Self {
            command: command.into(),
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration,
        }
    }

    /// A result for checks that decide pass/fail without running anything
    pub fn synthetic(command: impl Into<String>, success: bool, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success,
            exit_code: if success { 0 } else { 1 },
            stdout: String::new(),
            stderr: message.into(),
            duration: Duration::ZERO,
        }
    }

    /// Inverse of `success`; this is what the runner aggregates on
    pub fn failed(&self) -> bool {
        !self.success
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Run a shell command line in the current directory and capture its output
///
/// The command line is echoed first unless a [`crate::scope::HideRunning`]
/// scope is active.
pub fn local(command: &str) -> Result<CommandResult> {
    if echo_running() {
        println!("[localhost] local: {}", command);
    }

    let start = Instant::now();
    let output = Command::new("sh")
        .args(["-c", command])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| Error::process(format!("Failed to execute `{}`: {}", command, e)))?;

    Ok(CommandResult::from_output(command, output, start.elapsed()))
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    Command::new("sh")
        .args(["-c", &format!("command -v {} >/dev/null 2>&1", program)])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
