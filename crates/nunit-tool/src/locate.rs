//! Default tool directory
//!
//! When no tool path is configured the console is expected next to the
//! running executable.

use std::path::{Path, PathBuf};

/// URI artifact left on code-base style module locations
const FILE_URI_ARTIFACT: &str = "file:\\";

/// Supplies the directory searched when no tool path is configured
pub trait ToolDirectoryProvider {
    /// `None` when no location can be determined
    fn default_tool_directory(&self) -> Option<PathBuf>;
}

/// Directory of the currently running executable
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentExeDirectory;

impl ToolDirectoryProvider for CurrentExeDirectory {
    fn default_tool_directory(&self) -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        exe.parent().and_then(clean_module_directory)
    }
}

/// A fixed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDirectory(pub PathBuf);

impl FixedDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl ToolDirectoryProvider for FixedDirectory {
    fn default_tool_directory(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Strip `file:\` artifacts; blank locations yield `None`
pub fn clean_module_directory(dir: &Path) -> Option<PathBuf> {
    let text = dir.to_string_lossy();
    if text.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(text.replace(FILE_URI_ARTIFACT, "")))
}
