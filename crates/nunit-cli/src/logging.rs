//! Log output for the command line
//!
//! Task messages go through `tracing`; the subscriber writes them to stderr
//! so `show --json` keeps stdout clean.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `nunit_tool=debug`
pub const LOG_ENV: &str = "NUNIT_TASK_LOG";

/// Console verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Filter used when NUNIT_TASK_LOG is not set
    pub fn default_filter(&self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => "info",
            Self::Verbose => "debug",
        }
    }
}

/// Install the global subscriber
pub fn init_logging(verbosity: Verbosity, no_color: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity == Verbosity::Verbose)
        .with_ansi(!no_color)
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn test_default_filters() {
        assert_eq!(Verbosity::Quiet.default_filter(), "warn");
        assert_eq!(Verbosity::Normal.default_filter(), "info");
        assert_eq!(Verbosity::Verbose.default_filter(), "debug");
    }
}
