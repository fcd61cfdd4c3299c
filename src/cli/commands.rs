//! CLI command definitions

use clap::Args;

/// Validate the build configuration
#[derive(Debug, Args, Clone)]
pub struct CheckCommand {
    /// Path to the config file to check (overrides --config)
    #[arg(short, long)]
    pub file: Option<String>,
}
