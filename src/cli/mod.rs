//! Command-line interface

pub mod commands;
pub mod output;
pub mod prompt;

use clap::{Parser, Subcommand};
use commands::CheckCommand;

/// Build orchestrator for a Notion-synced Hugo site
#[derive(Debug, Parser, Clone)]
#[command(name = "sitebuild")]
#[command(version = "0.1.0")]
#[command(about = "Sync content, then build the site, failing fast", long_about = None)]
pub struct Cli {
    /// Running with no subcommand is the same as `sitebuild build`
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to build configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Skip the interactive pauses (for CI)
    #[arg(short, long, global = true)]
    pub yes: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the sync and build steps
    Build,

    /// Validate the build configuration and show the resolved commands
    Check(CheckCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
