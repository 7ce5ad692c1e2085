//! Structured subprocess execution

use crate::error::{Error, Result};
use crate::types::AcquisitionOutcome;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// A program invocation: executable, arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Utf8PathBuf,
}

impl CommandSpec {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>, cwd: &Utf8Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes commands and captures their outcome
///
/// A non-zero exit is reported through [`AcquisitionOutcome::exit_code`], not
/// as an error; `Err` means the command could not be started at all.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandSpec) -> Result<AcquisitionOutcome>;
}

/// Runs commands as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<AcquisitionOutcome> {
        debug!("Running: {} (in {})", command, command.cwd);

        // Package managers ship as `.cmd` shims on Windows; resolve through PATHEXT
        let program = which::which(&command.program)
            .unwrap_or_else(|_| PathBuf::from(&command.program));

        let output = Command::new(&program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::command_not_found(&command.program),
                _ => Error::process_execution(format!("{}: {}", command, e)),
            })?;

        Ok(AcquisitionOutcome {
            // Killed by a signal: no exit code
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
