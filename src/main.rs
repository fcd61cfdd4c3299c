use anyhow::{Context, Result};
use sitebuild::cli::commands::CheckCommand;
use sitebuild::cli::output::*;
use sitebuild::cli::{prompt, Cli, Command};
use sitebuild::core::{BuildConfig, BuildState, BuildStep};
use sitebuild::orchestrator::{BuildEvent, BuildOrchestrator};
use sitebuild::runner::ProcessRunner;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; the banners are the normal output, so tracing
    // stays quiet unless asked for.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match cli.command.clone().unwrap_or(Command::Build) {
        Command::Build => run_build(&cli).await?,
        Command::Check(cmd) => check_config(&cmd, &cli)?,
    }

    Ok(())
}

async fn run_build(cli: &Cli) -> Result<()> {
    let config =
        BuildConfig::load(cli.config.as_deref()).context("Failed to load build config")?;

    let mut orchestrator = BuildOrchestrator::new(ProcessRunner::new());

    let banner_config = config.clone();
    orchestrator.add_event_handler(move |event| {
        if let BuildEvent::StepStarted { step } = event {
            println!("{}", format_step_banner(step, &banner_config));
        }
    });

    let mut state = BuildState::new();
    match orchestrator.run(&mut state, &config).await {
        Ok(()) => {
            println!("{}", format_completion(&config));
            prompt::pause_for_acknowledgment(cli.yes);
            Ok(())
        }
        Err(e) => {
            let detail = e.to_string();
            let message = match e.step() {
                BuildStep::Sync => format_sync_failure(&detail),
                BuildStep::Generate => format_build_failure(&detail),
            };
            eprintln!("{}", message);
            error!("Build {} failed: {}", state.build_id, detail);
            prompt::pause_for_acknowledgment(cli.yes);
            std::process::exit(1);
        }
    }
}

fn check_config(cmd: &CheckCommand, cli: &Cli) -> Result<()> {
    let path = cmd.file.as_deref().or(cli.config.as_deref());

    match BuildConfig::load(path) {
        Ok(config) => {
            println!("{} Build configuration is valid!", CHECK);
            println!("{}", format_check_summary(&config));
            Ok(())
        }
        Err(e) => {
            println!("{} Configuration check failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}
