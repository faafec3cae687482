pub mod check;
pub mod run;
pub mod show;

use anyhow::{Context, Result};
use nunit_config::{Config, ConfigLoader, RunConfiguration};
use std::path::{Path, PathBuf};

/// Settings given on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tool_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
    pub force_32bit: bool,
}

impl Overrides {
    pub fn apply(&self, run: &mut RunConfiguration) {
        if let Some(tool_path) = &self.tool_path {
            run.tool_path = Some(tool_path.clone());
        }
        if let Some(working_dir) = &self.working_dir {
            run.working_directory = Some(working_dir.clone());
        }
        if self.force_32bit {
            run.force_32bit = true;
        }
    }
}

/// Load an explicit build file, or the nearest nunit.toml above the current directory
pub fn load_config(file: Option<&Path>) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    match file {
        Some(path) => loader
            .load_from_file(path)
            .with_context(|| format!("Failed to load build file {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            loader
                .load_from_directory(&cwd)
                .context("Failed to load build file")
        }
    }
}

/// Resolve a target into its run configuration with CLI overrides applied
pub fn resolve_target(
    config: &Config,
    target: Option<&str>,
    overrides: &Overrides,
) -> Result<(String, RunConfiguration)> {
    let name = config
        .build_file
        .select_target(target)
        .context("Failed to select target")?
        .to_string();
    let mut run = config
        .run_configuration(Some(&name))
        .with_context(|| format!("Invalid configuration for target '{}'", name))?;
    overrides.apply(&mut run);
    Ok((name, run))
}
