//! End-to-end orchestration scenarios against a scripted runner
//!
//! These cover the observable contract of a build run: step ordering, the
//! exit-code gates, and the events the CLI renders from.

use async_trait::async_trait;
use sitebuild::core::{BuildConfig, BuildPhase, BuildState, BuildStep, CommandSpec, StepState};
use sitebuild::orchestrator::{BuildError, BuildEvent, BuildOrchestrator};
use sitebuild::runner::{RunnerError, StepOutput, StepRunner};
use std::sync::{Arc, Mutex};

/// Runner that maps each program name to a scripted outcome and records the
/// order of invocations.
struct ScriptedRunner {
    outcomes: Vec<(String, Result<Option<i32>, String>)>,
    invocations: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRunner {
    fn new(outcomes: Vec<(&str, Result<Option<i32>, String>)>) -> Self {
        Self {
            outcomes: outcomes
                .into_iter()
                .map(|(p, o)| (p.to_string(), o))
                .collect(),
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn invocations(&self) -> Arc<Mutex<Vec<String>>> {
        self.invocations.clone()
    }
}

#[async_trait]
impl StepRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<StepOutput, RunnerError> {
        self.invocations.lock().unwrap().push(spec.program.clone());
        let outcome = self
            .outcomes
            .iter()
            .find(|(p, _)| *p == spec.program)
            .unwrap_or_else(|| panic!("unscripted program: {}", spec.program));
        match &outcome.1 {
            Ok(exit_code) => Ok(StepOutput {
                exit_code: *exit_code,
            }),
            Err(_) => Err(RunnerError::Timeout {
                program: spec.program.clone(),
                timeout_secs: spec.timeout_secs,
            }),
        }
    }
}

fn two_step_config() -> BuildConfig {
    BuildConfig::from_yaml(
        r#"
sync:
  program: "sync-content"
generate:
  program: "render-site"
"#,
    )
    .expect("config should parse")
}

fn capture_events(orchestrator: &mut BuildOrchestrator<ScriptedRunner>) -> Arc<Mutex<Vec<BuildEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    orchestrator.add_event_handler(move |event| {
        sink.lock().unwrap().push(event);
    });
    events
}

#[tokio::test]
async fn success_success_runs_both_steps_in_order() {
    let runner = ScriptedRunner::new(vec![
        ("sync-content", Ok(Some(0))),
        ("render-site", Ok(Some(0))),
    ]);
    let invocations = runner.invocations();
    let mut orchestrator = BuildOrchestrator::new(runner);
    let events = capture_events(&mut orchestrator);

    let mut state = BuildState::new();
    let result = orchestrator.run(&mut state, &two_step_config()).await;

    assert!(result.is_ok());
    assert_eq!(state.phase, BuildPhase::Done);
    assert_eq!(
        *invocations.lock().unwrap(),
        vec!["sync-content".to_string(), "render-site".to_string()]
    );

    // exactly one terminal event, and it reports Done
    let events = events.lock().unwrap();
    let completed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            BuildEvent::BuildCompleted { phase, .. } => Some(*phase),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![BuildPhase::Done]);
}

#[tokio::test]
async fn sync_failure_never_invokes_generate() {
    let runner = ScriptedRunner::new(vec![
        ("sync-content", Ok(Some(1))),
        ("render-site", Ok(Some(0))),
    ]);
    let invocations = runner.invocations();
    let orchestrator = BuildOrchestrator::new(runner);

    let mut state = BuildState::new();
    let result = orchestrator.run(&mut state, &two_step_config()).await;

    match result {
        Err(BuildError::SyncFailed { exit_code }) => assert_eq!(exit_code, Some(1)),
        other => panic!("Expected SyncFailed, got {:?}", other),
    }
    assert_eq!(state.phase, BuildPhase::Failed);
    assert_eq!(*invocations.lock().unwrap(), vec!["sync-content".to_string()]);
    assert!(matches!(state.generate, StepState::Pending));
}

#[tokio::test]
async fn generate_failure_keeps_sync_result() {
    let runner = ScriptedRunner::new(vec![
        ("sync-content", Ok(Some(0))),
        ("render-site", Ok(Some(1))),
    ]);
    let orchestrator = BuildOrchestrator::new(runner);

    let mut state = BuildState::new();
    let result = orchestrator.run(&mut state, &two_step_config()).await;

    match result {
        Err(BuildError::BuildFailed { exit_code }) => assert_eq!(exit_code, Some(1)),
        other => panic!("Expected BuildFailed, got {:?}", other),
    }
    assert_eq!(state.phase, BuildPhase::Failed);
    // no rollback: the completed sync step stays completed
    assert!(state.sync.is_completed());
}

#[tokio::test]
async fn runner_failure_surfaces_as_step_failure() {
    let runner = ScriptedRunner::new(vec![("sync-content", Err("timeout".to_string()))]);
    let orchestrator = BuildOrchestrator::new(runner);

    let mut state = BuildState::new();
    let result = orchestrator.run(&mut state, &two_step_config()).await;

    match result {
        Err(BuildError::Runner { step, source }) => {
            assert_eq!(step, BuildStep::Sync);
            assert!(matches!(source, RunnerError::Timeout { .. }));
        }
        other => panic!("Expected Runner error, got {:?}", other),
    }
    assert_eq!(state.phase, BuildPhase::Failed);
}

#[tokio::test]
async fn rerun_after_success_repeats_the_pattern() {
    let config = two_step_config();

    for _ in 0..2 {
        let runner = ScriptedRunner::new(vec![
            ("sync-content", Ok(Some(0))),
            ("render-site", Ok(Some(0))),
        ]);
        let invocations = runner.invocations();
        let orchestrator = BuildOrchestrator::new(runner);

        let mut state = BuildState::new();
        let result = orchestrator.run(&mut state, &config).await;

        assert!(result.is_ok());
        assert_eq!(state.phase, BuildPhase::Done);
        assert_eq!(invocations.lock().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn failure_events_name_the_failed_step() {
    let runner = ScriptedRunner::new(vec![
        ("sync-content", Ok(Some(0))),
        ("render-site", Ok(Some(7))),
    ]);
    let mut orchestrator = BuildOrchestrator::new(runner);
    let events = capture_events(&mut orchestrator);

    let mut state = BuildState::new();
    let _ = orchestrator.run(&mut state, &two_step_config()).await;

    let events = events.lock().unwrap();
    let failed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            BuildEvent::StepFailed { step, detail } => Some((*step, detail.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, BuildStep::Generate);
    assert!(failed[0].1.contains("exit code 7"));
}
