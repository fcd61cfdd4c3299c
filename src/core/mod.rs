//! Core build domain models

pub mod config;
pub mod state;

pub use config::{BuildConfig, CommandSpec};
pub use state::{BuildPhase, BuildState, BuildStep, StepState};
