/// Tool task error types
use nunit_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid run configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to launch '{program}': {error}")]
    LaunchFailed {
        program: PathBuf,
        error: std::io::Error,
    },
}

impl ToolError {
    /// Create a launch error
    pub fn launch(program: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::LaunchFailed {
            program: program.into(),
            error,
        }
    }
}
