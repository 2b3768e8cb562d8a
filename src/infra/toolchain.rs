//! Toolchain invocation
//!
//! Runs the build command as a child process in a package directory and
//! waits for it to exit. There is no timeout: a build runs to completion.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::core::command::BuildCommand;
use crate::error::ToolchainError;

/// Result of one toolchain run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Whether the process exited successfully
    pub success: bool,
    /// Exit code; `None` when the process was terminated by a signal
    pub status: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl BuildOutcome {
    /// A successful run with no output
    pub fn succeeded() -> Self {
        Self {
            success: true,
            status: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given diagnostics on stderr
    pub fn failed(status: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Exit status for error messages
    pub fn status_line(&self) -> String {
        match self.status {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }

    /// Combined diagnostic output, stdout first
    pub fn diagnostics(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (true, _) => self.stderr.clone(),
            (false, true) => self.stdout.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }
}

/// Something that can compile the package found in a directory
pub trait Toolchain {
    /// Run `command` with `dir` as the working directory, blocking until it exits
    fn build(&self, dir: &Path, command: &BuildCommand) -> Result<BuildOutcome, ToolchainError>;
}

/// Toolchain backed by a real child process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessToolchain;

impl ProcessToolchain {
    /// Create a new process toolchain
    pub fn new() -> Self {
        Self
    }
}

impl Toolchain for ProcessToolchain {
    fn build(&self, dir: &Path, command: &BuildCommand) -> Result<BuildOutcome, ToolchainError> {
        tracing::debug!("Running `{}` in {}", command.display(), dir.display());

        let output = Command::new(&command.program)
            .args(command.rendered_args())
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ToolchainError::Spawn {
                program: command.program.clone(),
                dir: dir.to_path_buf(),
                error: e.to_string(),
            })?;

        let outcome = BuildOutcome {
            success: output.status.success(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !outcome.stdout.is_empty() {
            tracing::debug!("toolchain stdout:\n{}", outcome.stdout.trim_end());
        }
        if !outcome.stderr.is_empty() {
            tracing::debug!("toolchain stderr:\n{}", outcome.stderr.trim_end());
        }

        Ok(outcome)
    }
}

/// Find the toolchain program on PATH
pub fn locate(program: &str) -> Result<PathBuf, ToolchainError> {
    which::which(program).map_err(|_| ToolchainError::NotFound {
        program: program.to_string(),
    })
}
