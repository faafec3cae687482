use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

/// Run NUnit test assemblies through nunit-console.
///
/// Targets are described in an nunit.toml build file. Each target lists the
/// test assemblies and the console options to run them with; this tool turns
/// a target into an nunit-console command line, runs it and reports whether
/// the tests passed.
///
/// EXAMPLES:
///     nunit-task run                    Run the default target
///     nunit-task run integration        Run a named target
///     nunit-task show --json            Print the resolved invocation as JSON
///     nunit-task check                  Validate nunit.toml
///
/// ENVIRONMENT VARIABLES:
///     NUNIT_TASK_FILE           Build file to use instead of searching for nunit.toml
///     NUNIT_TASK_LOG            Tracing filter, e.g. 'nunit_tool=debug'
///     NUNIT_TASK_JSON           Set to '1' for JSON output by default
///     NUNIT_TOOL_PATH           Directory containing nunit-console
///     NUNIT_WORKING_DIRECTORY   Directory to run nunit-console in
///     NUNIT_FORCE_32BIT         Set to '1' to run nunit-console-x86
///     NO_COLOR                  Set to disable colored output
#[derive(Parser)]
#[command(name = "nunit-task")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Build file (defaults to the nearest nunit.toml)
    #[arg(long, short = 'f', global = true, env = "NUNIT_TASK_FILE")]
    file: Option<PathBuf>,

    /// Show debug output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Settings that override the build file
#[derive(Args, Debug, Default)]
struct OverrideArgs {
    /// Directory containing nunit-console
    #[arg(long)]
    tool_path: Option<PathBuf>,
    /// Directory to run nunit-console in
    #[arg(long)]
    working_dir: Option<PathBuf>,
    /// Run the 32 bit console
    #[arg(long, visible_alias = "x86")]
    force_32bit: bool,
}

impl From<OverrideArgs> for commands::Overrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            tool_path: args.tool_path,
            working_dir: args.working_dir,
            force_32bit: args.force_32bit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run nunit-console for a target
    ///
    /// Exits with status 1 when the console could not be started, exits
    /// with a nonzero code or an error was logged.
    ///
    /// EXAMPLES:
    ///     nunit-task run                      Run the default target
    ///     nunit-task run unit --x86           Run with nunit-console-x86
    ///     nunit-task run --tool-path tools    Use a different console
    #[command(visible_alias = "r")]
    Run {
        /// Target name (defaults to default-target or the only target)
        target: Option<String>,
        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Print the invocation for a target without running it
    ///
    /// EXAMPLES:
    ///     nunit-task show unit          Show the command line
    ///     nunit-task show unit --json   Output as JSON
    #[command(visible_alias = "s")]
    Show {
        /// Target name (defaults to default-target or the only target)
        target: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Validate the build file and list its targets
    ///
    /// EXAMPLES:
    ///     nunit-task check
    ///     nunit-task check --file ci/nunit.toml
    #[command(visible_alias = "c")]
    Check,

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     nunit-task completions bash > ~/.bash_completions/nunit-task.bash
    ///     nunit-task completions zsh > ~/.zfunc/_nunit-task
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    if cli_config.no_color {
        colored::control::set_override(false);
    }

    let verbosity = logging::Verbosity::from_flags(cli.verbose, cli.quiet);
    logging::init_logging(verbosity, cli_config.no_color)?;

    match cli.command {
        Commands::Run { target, overrides } => {
            let args = commands::run::RunArgs {
                file: cli.file,
                target,
                overrides: overrides.into(),
                quiet: cli.quiet,
            };
            commands::run::run(args)?;
        }
        Commands::Show {
            target,
            json,
            overrides,
        } => {
            // Command-line flag overrides environment variable
            let args = commands::show::ShowArgs {
                file: cli.file,
                target,
                overrides: overrides.into(),
                json: json || cli_config.default_json,
            };
            commands::show::run(args)?;
        }
        Commands::Check => {
            commands::check::run(commands::check::CheckArgs { file: cli.file })?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_with_target_and_overrides() {
        let cli = Cli::parse_from([
            "nunit-task",
            "run",
            "unit",
            "--tool-path",
            "tools",
            "--x86",
        ]);
        match cli.command {
            Commands::Run { target, overrides } => {
                assert_eq!(target.as_deref(), Some("unit"));
                assert_eq!(overrides.tool_path, Some(PathBuf::from("tools")));
                assert!(overrides.force_32bit);
                assert_eq!(overrides.working_dir, None);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_file_flag_after_subcommand() {
        let cli = Cli::parse_from(["nunit-task", "check", "--file", "ci/nunit.toml"]);
        assert_eq!(cli.file, Some(PathBuf::from("ci/nunit.toml")));
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_show_json_flag() {
        let cli = Cli::parse_from(["nunit-task", "s", "--json"]);
        match cli.command {
            Commands::Show { target, json, .. } => {
                assert!(json);
                assert_eq!(target, None);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["nunit-task", "-v", "-q", "check"]).is_err());
    }

    #[test]
    fn test_completions_bash() {
        let cli = Cli::parse_from(["nunit-task", "completions", "bash"]);
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Bash),
            _ => panic!("Expected Completions command"),
        }
    }
}
