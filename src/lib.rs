//! sitebuild - fail-fast build orchestrator for a Notion-synced Hugo site

pub mod cli;
pub mod core;
pub mod orchestrator;
pub mod runner;

// Re-export commonly used types
pub use crate::core::{BuildConfig, BuildPhase, BuildState, BuildStep, CommandSpec, StepState};
pub use crate::orchestrator::{BuildError, BuildEvent, BuildOrchestrator, EventHandler};
pub use crate::runner::{ProcessRunner, RunnerError, StepOutput, StepRunner};
