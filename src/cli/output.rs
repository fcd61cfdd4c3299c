//! CLI output formatting

use crate::core::{BuildConfig, BuildStep};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Banner printed when a step starts
pub fn format_step_banner(step: BuildStep, config: &BuildConfig) -> String {
    let (action, spec) = match step {
        BuildStep::Sync => ("Syncing content", &config.sync),
        BuildStep::Generate => ("Building site", &config.generate),
    };
    format!(
        "[{}/3] {} {} ({})...",
        step.position(),
        ROCKET,
        action,
        style(spec.display()).dim()
    )
}

/// Resolved-command summary printed by `check` for a valid configuration
pub fn format_check_summary(config: &BuildConfig) -> String {
    format!(
        "{} Sync:   {}\n{} Build:  {}\n{} Output: {}/",
        INFO,
        style(config.sync.display()).bold(),
        INFO,
        style(config.generate.display()).bold(),
        INFO,
        style(&config.output_dir).cyan()
    )
}

/// Final banner printed after both steps succeed
pub fn format_completion(config: &BuildConfig) -> String {
    format!(
        "[3/3] {} Done! Site written to {}/\n  Preview locally: {}\n  Deploy:          {}",
        CHECK,
        style(&config.output_dir).bold(),
        style(&config.preview_hint).cyan(),
        style(&config.deploy_hint).cyan()
    )
}

/// Diagnostic for a failed sync step
///
/// The usual cause is the credentials file the sync script reads, so the
/// hint points there.
pub fn format_sync_failure(detail: &str) -> String {
    format!(
        "{} Sync step failed: {}\n  Check that your .env file contains a valid NOTION_API_KEY.",
        CROSS,
        style(detail).red()
    )
}

/// Diagnostic for a failed build step
pub fn format_build_failure(detail: &str) -> String {
    format!(
        "{} Build step failed: {}\n  Run the generator by hand to see its full output.",
        CROSS,
        style(detail).red()
    )
}
