//! Build run state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two external steps of a build, in fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStep {
    /// Content sync (pulls data from the content API)
    Sync,
    /// Static site generation
    Generate,
}

impl BuildStep {
    /// Human-readable step name
    pub fn name(&self) -> &'static str {
        match self {
            BuildStep::Sync => "sync",
            BuildStep::Generate => "build",
        }
    }

    /// 1-based position in the three-banner sequence
    pub fn position(&self) -> usize {
        match self {
            BuildStep::Sync => 1,
            BuildStep::Generate => 2,
        }
    }
}

/// Overall build phase
///
/// Linear sequence with `Failed` as an absorbing terminal state reachable
/// from `Syncing` or `Building`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildPhase {
    /// Build has not started
    Pending,
    /// Sync step is running
    Syncing,
    /// Generate step is running
    Building,
    /// Both steps completed successfully
    Done,
    /// A step failed; no further steps run
    Failed,
}

impl BuildPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildPhase::Done | BuildPhase::Failed)
    }
}

/// State of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepState {
    /// Step has not run
    Pending,
    /// Step is currently running
    Running {
        started_at: DateTime<Utc>,
    },
    /// Step's process exited 0
    Completed {
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
    /// Step's process exited non-zero (or could not run)
    Failed {
        exit_code: Option<i32>,
        started_at: Option<DateTime<Utc>>,
        failed_at: DateTime<Utc>,
    },
}

impl StepState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepState::Completed { .. } | StepState::Failed { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StepState::Completed { .. })
    }
}

/// State of one build run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildState {
    /// Unique run ID
    pub build_id: Uuid,

    /// Current phase
    pub phase: BuildPhase,

    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run finished (Done or Failed)
    pub completed_at: Option<DateTime<Utc>>,

    /// Sync step record
    pub sync: StepState,

    /// Generate step record
    pub generate: StepState,
}

impl BuildState {
    pub fn new() -> Self {
        Self {
            build_id: Uuid::new_v4(),
            phase: BuildPhase::Pending,
            started_at: None,
            completed_at: None,
            sync: StepState::Pending,
            generate: StepState::Pending,
        }
    }

    /// Step record accessor
    pub fn step(&self, step: BuildStep) -> &StepState {
        match step {
            BuildStep::Sync => &self.sync,
            BuildStep::Generate => &self.generate,
        }
    }

    fn step_mut(&mut self, step: BuildStep) -> &mut StepState {
        match step {
            BuildStep::Sync => &mut self.sync,
            BuildStep::Generate => &mut self.generate,
        }
    }

    /// Whether a step may start now.
    ///
    /// The generate step is gated on the sync step having completed; nothing
    /// may start once the run is terminal.
    pub fn can_start(&self, step: BuildStep) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        match step {
            BuildStep::Sync => matches!(self.sync, StepState::Pending),
            BuildStep::Generate => {
                self.sync.is_completed() && matches!(self.generate, StepState::Pending)
            }
        }
    }

    /// Mark a step as running
    pub fn step_started(&mut self, step: BuildStep) {
        let now = Utc::now();
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.phase = match step {
            BuildStep::Sync => BuildPhase::Syncing,
            BuildStep::Generate => BuildPhase::Building,
        };
        *self.step_mut(step) = StepState::Running { started_at: now };
    }

    /// Mark a step's process as having exited 0
    pub fn step_completed(&mut self, step: BuildStep) {
        let started_at = match self.step(step) {
            StepState::Running { started_at } => *started_at,
            _ => Utc::now(),
        };
        *self.step_mut(step) = StepState::Completed {
            started_at,
            completed_at: Utc::now(),
        };
    }

    /// Mark a step as failed and the run as failed
    pub fn step_failed(&mut self, step: BuildStep, exit_code: Option<i32>) {
        let started_at = match self.step(step) {
            StepState::Running { started_at } => Some(*started_at),
            _ => None,
        };
        *self.step_mut(step) = StepState::Failed {
            exit_code,
            started_at,
            failed_at: Utc::now(),
        };
        self.fail();
    }

    /// Mark the run as done; ignored once failed
    pub fn complete(&mut self) {
        if self.phase == BuildPhase::Failed {
            return;
        }
        self.phase = BuildPhase::Done;
        self.completed_at = Some(Utc::now());
    }

    /// Mark the run as failed
    pub fn fail(&mut self) {
        self.phase = BuildPhase::Failed;
        self.completed_at = Some(Utc::now());
    }
}

impl Default for BuildState {
    fn default() -> Self {
        Self::new()
    }
}
