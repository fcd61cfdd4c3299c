//! Build configuration from YAML
//!
//! Every field has a default matching the site this tool was written for, so
//! running `sitebuild` with no config file and no arguments does the right
//! thing. A `sitebuild.yaml` next to the site can override any of it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default name of the optional config file
pub const DEFAULT_CONFIG_FILE: &str = "sitebuild.yaml";

fn default_timeout_secs() -> u64 {
    300
}

/// One external command invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Program to run
    pub program: String,

    /// Arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,

    /// Kill the process if it runs longer than this
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str], timeout_secs: u64) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout_secs,
        }
    }

    /// Shell-style rendering for display
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Top-level build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Content-sync command (step 1)
    pub sync: CommandSpec,

    /// Site-generation command (step 2)
    pub generate: CommandSpec,

    /// Where the generator writes the rendered site
    pub output_dir: String,

    /// Follow-up hint: preview the site locally
    pub preview_hint: String,

    /// Follow-up hint: deploy the site
    pub deploy_hint: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            sync: CommandSpec::new("python", &["sync_notion.py"], 600),
            generate: CommandSpec::new("hugo", &[], 300),
            output_dir: "public".to_string(),
            preview_hint: "hugo server".to_string(),
            deploy_hint: "git add -A && git commit -m \"Update site\" && git push".to_string(),
        }
    }
}

impl BuildConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: BuildConfig =
            serde_yaml::from_str(yaml).context("Failed to parse build config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the given path, or from `sitebuild.yaml` if present, or
    /// fall back to the defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    Self::from_file(DEFAULT_CONFIG_FILE)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, spec) in [("sync", &self.sync), ("generate", &self.generate)] {
            if spec.program.trim().is_empty() {
                anyhow::bail!("Config error: {} command has an empty program", name);
            }
            if spec.timeout_secs == 0 {
                anyhow::bail!("Config error: {} command has a zero timeout", name);
            }
        }
        if self.output_dir.trim().is_empty() {
            anyhow::bail!("Config error: output_dir is empty");
        }
        Ok(())
    }
}
