//! nunit-task Configuration System
//!
//! Provides configuration management for test runs driven by `nunit-console`:
//! - Build files (nunit.toml) describing one or more test targets
//! - User defaults (~/.nunit-task/config.toml)
//! - Environment overrides (NUNIT_*)
//! - The typed [`RunConfiguration`] handed to the argument translator
//!
//! # Configuration Hierarchy
//!
//! Settings are merged in the following order (later overrides earlier):
//! 1. User defaults (~/.nunit-task/config.toml)
//! 2. Build file `[defaults]` table
//! 3. Build file `[targets.<name>]` table
//! 4. Environment variables (NUNIT_*)
//! 5. CLI flags (applied by the caller)
//!
//! # Example
//!
//! ```no_run
//! use nunit_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! let run = config.run_configuration(None).unwrap();
//! ```

pub mod build_file;
pub mod global;
pub mod loader;
pub mod options;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Build file not found: {0}")]
    NotFound(PathBuf),

    #[error("No nunit.toml found in {0} or any parent directory")]
    NoBuildFile(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Target '{name}' is not defined (available: {available})")]
    UnknownTarget { name: String, available: String },

    #[error("No target selected and no default-target set (available: {0})")]
    AmbiguousTarget(String),

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use build_file::{BuildFile, DefaultsConfig, TargetConfig, BUILD_FILE_NAME};
pub use global::UserConfig;
pub use loader::{Config, ConfigLoader, EnvOverrides};
pub use options::{AppDomainUsage, ParseEnumError, ProcessModel, RunConfiguration};
