//! Subprocess invocation with output capture.
//!
//! Commands are always launched from an argument vector, never through a
//! shell, so coordinates and paths are passed to the child verbatim without
//! any quoting hazards.

use anyhow::{Context, Result};
use log::debug;
use std::process::Command;

/// Outcome of one subprocess invocation. Produced once, consumed by the
/// orchestrator for success/failure branching and logging.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Exit code of the child; `None` when it was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output, with standard error appended.
    pub output: String,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for launching external processes, blocking until they terminate.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` and capture its output. A non-zero exit is
    /// a successful `run` with a failing [`ProcessResult`]; only
    /// spawn/read I/O failures are returned as errors.
    fn run(&self, program: &str, args: &[String]) -> Result<ProcessResult>;
}

pub struct RealProcessRunner;

impl ProcessRunner for RealProcessRunner {
    #[tracing::instrument(skip(self))]
    fn run(&self, program: &str, args: &[String]) -> Result<ProcessResult> {
        debug!("Running {} with args {:?}", program, args);

        // Command::output reads both pipes to completion before waiting on
        // the child, so a full pipe buffer can never deadlock us.
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run '{}'", program))?;

        let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() {
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
        }

        debug!("{} exited with {:?}", program, output.status.code());
        Ok(ProcessResult {
            exit_code: output.status.code(),
            output: captured,
        })
    }
}
