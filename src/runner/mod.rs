//! External step runners
//!
//! A build step is an external process; the orchestrator only consumes its
//! exit code. The `StepRunner` trait is the seam that lets tests substitute
//! a scripted runner for real subprocesses.

mod process;

pub use process::ProcessRunner;

use crate::core::CommandSpec;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from running a step's process
///
/// A non-zero exit code is NOT an error here: the process ran and reported a
/// status, which the orchestrator gates on. Errors cover the cases where no
/// exit status could be obtained at all.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The program could not be spawned (missing executable, permissions)
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran longer than its configured timeout
    #[error("'{program}' timed out after {timeout_secs}s")]
    Timeout { program: String, timeout_secs: u64 },
}

/// Result of a completed step process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl StepOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a single build step to completion
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<StepOutput, RunnerError>;
}
