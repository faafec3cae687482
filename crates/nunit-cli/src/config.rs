//! CLI configuration via environment variables
//!
//! Output preferences come from the environment so the build file stays
//! about the test run itself.

use std::env;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default to JSON output for `show` (NUNIT_TASK_JSON=1)
    pub default_json: bool,
    /// Disable colored output (NUNIT_TASK_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("NUNIT_TASK_JSON")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            no_color: env::var("NUNIT_TASK_NO_COLOR").is_ok() || env::var("NO_COLOR").is_ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
