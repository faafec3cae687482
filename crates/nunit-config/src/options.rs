//! Run options
//!
//! The typed description of a single `nunit-console` run, plus the isolation
//! enums that are parsed from their member names at load time.

use crate::{ConfigError, ConfigResult};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Unrecognized enum member name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    /// Enum being parsed ("process model", "app domain usage")
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
    /// Comma separated member names
    pub expected: String,
}

/// Case-insensitive lookup of `value` in a member table
fn parse_member<T: Copy>(
    kind: &'static str,
    value: &str,
    members: &[(&'static str, T)],
) -> Result<T, ParseEnumError> {
    let needle = value.trim();
    members
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(needle))
        .map(|(_, member)| *member)
        .ok_or_else(|| ParseEnumError {
            kind,
            value: value.to_string(),
            expected: members
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// How the runner allocates OS processes across the assemblies under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessModel {
    /// Let the runner decide
    #[default]
    Default,
    /// Everything in the runner's own process
    Single,
    /// One separate process for all assemblies
    Separate,
    /// One process per assembly
    Multiple,
}

impl ProcessModel {
    const MEMBERS: [(&'static str, ProcessModel); 4] = [
        ("Default", Self::Default),
        ("Single", Self::Single),
        ("Separate", Self::Separate),
        ("Multiple", Self::Multiple),
    ];

    /// Member name as understood by `nunit-console`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Single => "Single",
            Self::Separate => "Separate",
            Self::Multiple => "Multiple",
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl FromStr for ProcessModel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_member("process model", s, &Self::MEMBERS)
    }
}

impl fmt::Display for ProcessModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which in-process execution contexts the runner creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppDomainUsage {
    /// Let the runner decide
    #[default]
    Default,
    /// No separate domain
    None,
    /// One domain for all assemblies
    Single,
    /// One domain per assembly
    Multiple,
}

impl AppDomainUsage {
    const MEMBERS: [(&'static str, AppDomainUsage); 4] = [
        ("Default", Self::Default),
        ("None", Self::None),
        ("Single", Self::Single),
        ("Multiple", Self::Multiple),
    ];

    /// Member name as understood by `nunit-console`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::None => "None",
            Self::Single => "Single",
            Self::Multiple => "Multiple",
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl FromStr for AppDomainUsage {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_member("app domain usage", s, &Self::MEMBERS)
    }
}

impl fmt::Display for AppDomainUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse an enum field, attributing failures to `field`
pub(crate) fn parse_field<T>(field: &str, value: &str) -> ConfigResult<T>
where
    T: FromStr<Err = ParseEnumError>,
{
    value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

/// Everything needed to build one `nunit-console` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Assemblies (or project files) to test, in order
    pub assemblies: Vec<PathBuf>,
    /// Test the assemblies in place instead of from a shadow copy
    pub shadow_copy_disabled: bool,
    /// Suppress the progress dots
    pub hide_dots: bool,
    /// Label each test in the console output
    pub show_labels: bool,
    /// Run tests on a separate thread (default: true)
    pub run_in_new_thread: bool,
    /// Categories to include, comma separated
    pub include_category: Option<String>,
    /// Categories to exclude, comma separated
    pub exclude_category: Option<String>,
    /// Project configuration to load (project files only)
    pub project_configuration: Option<String>,
    /// Test case, fixture or namespace to run
    pub what_to_run: Option<String>,
    /// XSLT transform applied to the console report
    pub transform_file: Option<String>,
    /// XML result file
    pub output_xml_file: Option<String>,
    /// File that receives error output
    pub error_output_file: Option<String>,
    /// Framework version, e.g. "net-4.0"
    pub framework_version: Option<String>,
    pub process_model: ProcessModel,
    pub app_domain_usage: AppDomainUsage,
    /// Per test case timeout; zero means none
    pub timeout_milliseconds: u32,
    /// Use the 32 bit console on a 64 bit OS
    pub force_32bit: bool,
    /// Directory containing the console executable
    pub tool_path: Option<PathBuf>,
    /// Directory to run the console in
    pub working_directory: Option<PathBuf>,
}

impl RunConfiguration {
    /// Create a configuration for the given assemblies with all options at their defaults
    pub fn new<I, P>(assemblies: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            assemblies: assemblies.into_iter().map(Into::into).collect(),
            shadow_copy_disabled: false,
            hide_dots: false,
            show_labels: false,
            run_in_new_thread: true,
            include_category: None,
            exclude_category: None,
            project_configuration: None,
            what_to_run: None,
            transform_file: None,
            output_xml_file: None,
            error_output_file: None,
            framework_version: None,
            process_model: ProcessModel::Default,
            app_domain_usage: AppDomainUsage::Default,
            timeout_milliseconds: 0,
            force_32bit: false,
            tool_path: None,
            working_directory: None,
        }
    }

    /// Set the process model from its (case-insensitive) name
    pub fn set_process_model(&mut self, name: &str) -> Result<(), ParseEnumError> {
        self.process_model = name.parse()?;
        Ok(())
    }

    /// Set the app domain usage from its (case-insensitive) name
    pub fn set_app_domain_usage(&mut self, name: &str) -> Result<(), ParseEnumError> {
        self.app_domain_usage = name.parse()?;
        Ok(())
    }

    /// Check the required fields
    pub fn validate(&self) -> ConfigResult<()> {
        if self.assemblies.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "assemblies".to_string(),
                reason: "at least one assembly is required".to_string(),
            });
        }

        if self.assemblies.iter().any(|a| a.as_os_str().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "assemblies".to_string(),
                reason: "assembly paths cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
