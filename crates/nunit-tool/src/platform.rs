//! Host platform
//!
//! nunit-console takes `/switch` on Windows and `-switch` on Unix-like hosts,
//! and only carries an `.exe` suffix on Windows.

use serde::Serialize;
use std::fmt;

/// Operating system family the console runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    Windows,
    Unix,
    MacOs,
}

impl HostPlatform {
    /// Detect the platform this process is running on
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(unix) {
            Self::Unix
        } else {
            Self::Windows
        }
    }

    /// Unix and macOS
    pub fn is_unix_like(&self) -> bool {
        matches!(self, Self::Unix | Self::MacOs)
    }

    /// Character that introduces a console switch
    pub fn switch_prefix(&self) -> char {
        if self.is_unix_like() {
            '-'
        } else {
            '/'
        }
    }

    /// Suffix appended to executable names
    pub fn executable_suffix(&self) -> &'static str {
        if self.is_unix_like() {
            ""
        } else {
            ".exe"
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Unix => "unix",
            Self::MacOs => "macos",
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
