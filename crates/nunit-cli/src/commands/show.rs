//! Show command - print the nunit-console invocation without running it

use super::{load_config, resolve_target, Overrides};
use anyhow::{Context, Result};
use colored::*;
use nunit_tool::{MemoryLog, ToolTask};
use std::path::PathBuf;

/// Arguments for the show command
#[derive(Debug, Default)]
pub struct ShowArgs {
    /// Build file (defaults to the nearest nunit.toml)
    pub file: Option<PathBuf>,
    /// Target to show
    pub target: Option<String>,
    /// Command line overrides
    pub overrides: Overrides,
    /// Output in JSON format
    pub json: bool,
}

/// Run the show command
pub fn run(args: ShowArgs) -> Result<()> {
    let config = load_config(args.file.as_deref())?;
    let (name, run) = resolve_target(&config, args.target.as_deref(), &args.overrides)?;

    let task = ToolTask::new(run).context("Failed to create task")?;
    let mut log = MemoryLog::new();
    let invocation = task.invocation(&mut log);

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "target": name,
                "platform": task.platform(),
                "program": invocation.program.display().to_string(),
                "working_directory": invocation
                    .working_directory
                    .as_ref()
                    .map(|d| d.display().to_string()),
                "arguments": invocation.args(),
                "command_line": invocation.to_string(),
                "errors": log.errors(),
            })
        );
        return Ok(());
    }

    println!("{} {}", "Target:".bold(), name);
    println!("{} {}", "Program:".bold(), invocation.program.display());
    match &invocation.working_directory {
        Some(dir) => println!("{} {}", "Working directory:".bold(), dir.display()),
        None => println!("{} (current directory)", "Working directory:".bold()),
    }
    println!("{} {}", "Arguments:".bold(), invocation.arguments);

    for error in log.errors() {
        eprintln!("{} {}", "warning:".yellow().bold(), error);
    }

    Ok(())
}
