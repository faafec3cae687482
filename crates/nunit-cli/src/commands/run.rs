//! Run command - execute nunit-console for a target

use super::{load_config, resolve_target, Overrides};
use anyhow::{Context, Result};
use colored::*;
use nunit_tool::{ToolTask, TracingLog};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the run command
#[derive(Debug, Default)]
pub struct RunArgs {
    /// Build file (defaults to the nearest nunit.toml)
    pub file: Option<PathBuf>,
    /// Target to run (defaults to the build file's default target)
    pub target: Option<String>,
    /// Command line overrides
    pub overrides: Overrides,
    /// Suppress the summary line
    pub quiet: bool,
}

/// Run the run command
pub fn run(args: RunArgs) -> Result<()> {
    let config = load_config(args.file.as_deref())?;
    let (name, run) = resolve_target(&config, args.target.as_deref(), &args.overrides)?;

    let task = ToolTask::new(run).context("Failed to create task")?;
    let mut log = TracingLog::new();

    let start = Instant::now();
    let outcome = task.execute(&mut log);
    let elapsed = start.elapsed().as_secs_f64();

    if !args.quiet {
        if outcome.success {
            eprintln!(
                "{} target '{}' in {:.2}s",
                "Passed".green().bold(),
                name,
                elapsed
            );
        } else {
            let code = outcome
                .exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "none".to_string());
            eprintln!(
                "{} target '{}' (exit code {}, {} error{})",
                "Failed".red().bold(),
                name,
                code,
                log.error_count(),
                if log.error_count() == 1 { "" } else { "s" }
            );
        }
    }

    // Exit with code 1 if the task failed
    if !outcome.success {
        std::process::exit(1);
    }

    Ok(())
}
