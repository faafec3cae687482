//! Check command - validate the build file and list its targets

use super::load_config;
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Debug, Default)]
pub struct CheckArgs {
    /// Build file (defaults to the nearest nunit.toml)
    pub file: Option<PathBuf>,
}

/// Run the check command
pub fn run(args: CheckArgs) -> Result<()> {
    let config = load_config(args.file.as_deref())?;

    println!(
        "{} {}",
        "Checked".green().bold(),
        config.build_file_path.display()
    );

    let default = config.build_file.select_target(None).ok();
    for name in config.target_names() {
        let run = config
            .run_configuration(Some(name))
            .with_context(|| format!("Invalid configuration for target '{}'", name))?;
        let count = run.assemblies.len();
        println!(
            "  {} {} ({} assembl{}){}",
            "●".green(),
            name,
            count,
            if count == 1 { "y" } else { "ies" },
            if default == Some(name) {
                " [default]".dimmed().to_string()
            } else {
                String::new()
            }
        );
    }

    Ok(())
}
