//! Subprocess step runner

use crate::core::CommandSpec;
use crate::runner::{RunnerError, StepOutput, StepRunner};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Runs build steps as real child processes.
///
/// The child's stdout/stderr are inherited so its own progress output lands
/// on the user's terminal between the orchestrator's banners. Stdin is
/// closed; the steps are non-interactive.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StepRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<StepOutput, RunnerError> {
        debug!("Spawning {}", spec.display());

        let timeout_duration = Duration::from_secs(spec.timeout_secs);

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RunnerError::Spawn {
                program: spec.program.clone(),
                source: e,
            })?;

        let status = timeout(timeout_duration, child.wait())
            .await
            .map_err(|_| RunnerError::Timeout {
                program: spec.program.clone(),
                timeout_secs: spec.timeout_secs,
            })?
            .map_err(|e| RunnerError::Spawn {
                program: spec.program.clone(),
                source: e,
            })?;

        let exit_code = status.code();
        if !status.success() {
            warn!(
                "{} exited with code {}",
                spec.program,
                exit_code.map_or_else(|| "<signal>".to_string(), |c| c.to_string())
            );
        } else {
            debug!("{} exited 0", spec.program);
        }

        Ok(StepOutput { exit_code })
    }
}
