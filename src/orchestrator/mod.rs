//! Build orchestrator - runs the sync and generate steps in fixed order
//!
//! Fail-fast: the first step whose process exits non-zero (or cannot run)
//! ends the build. There are no retries and no rollback; whatever the sync
//! step wrote stays on disk.

use crate::{
    core::{BuildConfig, BuildPhase, BuildState, BuildStep, CommandSpec},
    runner::{RunnerError, StepRunner},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Why a build run failed
#[derive(Debug, Error)]
pub enum BuildError {
    /// The content-sync process exited non-zero
    #[error("content sync failed{}", format_exit_code(.exit_code))]
    SyncFailed { exit_code: Option<i32> },

    /// The site-generation process exited non-zero
    #[error("site generation failed{}", format_exit_code(.exit_code))]
    BuildFailed { exit_code: Option<i32> },

    /// A step's process could not run at all
    #[error("{} step could not run: {source}", .step.name())]
    Runner {
        step: BuildStep,
        #[source]
        source: RunnerError,
    },
}

impl BuildError {
    /// Which step the failure belongs to
    pub fn step(&self) -> BuildStep {
        match self {
            BuildError::SyncFailed { .. } => BuildStep::Sync,
            BuildError::BuildFailed { .. } => BuildStep::Generate,
            BuildError::Runner { step, .. } => *step,
        }
    }
}

fn format_exit_code(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!(" (exit code {})", code),
        None => " (killed by signal)".to_string(),
    }
}

/// Events that occur during a build run
#[derive(Debug, Clone)]
pub enum BuildEvent {
    BuildStarted {
        build_id: Uuid,
    },
    StepStarted {
        step: BuildStep,
    },
    StepCompleted {
        step: BuildStep,
    },
    StepFailed {
        step: BuildStep,
        detail: String,
    },
    BuildCompleted {
        build_id: Uuid,
        phase: BuildPhase,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(BuildEvent) + Send + Sync>;

/// Runs the fixed two-step build sequence against a `StepRunner`
pub struct BuildOrchestrator<R> {
    runner: R,
    event_handlers: Vec<EventHandler>,
}

impl<R: StepRunner> BuildOrchestrator<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(BuildEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit(&self, event: BuildEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute the build: sync, gate on exit code, generate, gate on exit
    /// code. First failure is terminal.
    pub async fn run(
        &self,
        state: &mut BuildState,
        config: &BuildConfig,
    ) -> Result<(), BuildError> {
        let build_id = state.build_id;
        info!("Starting build {}", build_id);
        self.emit(BuildEvent::BuildStarted { build_id });

        let result = self.run_sequence(state, config).await;

        match &result {
            Ok(()) => {
                state.complete();
                info!("Build {} completed", build_id);
            }
            Err(e) => {
                error!("Build {} failed: {}", build_id, e);
            }
        }
        self.emit(BuildEvent::BuildCompleted {
            build_id,
            phase: state.phase,
        });

        result
    }

    async fn run_sequence(
        &self,
        state: &mut BuildState,
        config: &BuildConfig,
    ) -> Result<(), BuildError> {
        self.run_step(state, BuildStep::Sync, &config.sync).await?;
        self.run_step(state, BuildStep::Generate, &config.generate)
            .await?;
        Ok(())
    }

    async fn run_step(
        &self,
        state: &mut BuildState,
        step: BuildStep,
        spec: &CommandSpec,
    ) -> Result<(), BuildError> {
        debug_assert!(state.can_start(step), "step ordering violated");

        info!("Running {} step: {}", step.name(), spec.display());
        state.step_started(step);
        self.emit(BuildEvent::StepStarted { step });

        let output = match self.runner.run(spec).await {
            Ok(output) => output,
            Err(e) => {
                state.step_failed(step, None);
                self.emit(BuildEvent::StepFailed {
                    step,
                    detail: e.to_string(),
                });
                return Err(BuildError::Runner { step, source: e });
            }
        };

        if output.success() {
            state.step_completed(step);
            self.emit(BuildEvent::StepCompleted { step });
            return Ok(());
        }

        state.step_failed(step, output.exit_code);
        let err = match step {
            BuildStep::Sync => BuildError::SyncFailed {
                exit_code: output.exit_code,
            },
            BuildStep::Generate => BuildError::BuildFailed {
                exit_code: output.exit_code,
            },
        };
        self.emit(BuildEvent::StepFailed {
            step,
            detail: err.to_string(),
        });
        Err(err)
    }
}
