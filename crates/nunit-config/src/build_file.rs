//! Build File (nunit.toml)
//!
//! Declarative description of one or more test runs, stored in `nunit.toml`
//! at the project root.

use crate::options::{parse_field, AppDomainUsage, ProcessModel};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name searched for when walking up from a start directory
pub const BUILD_FILE_NAME: &str = "nunit.toml";

/// Build file contents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BuildFile {
    /// Target run when none is named on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_target: Option<String>,

    /// Settings shared by every target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Test targets by name
    #[serde(default)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, TargetConfig>,
}

/// Settings shared by every target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct DefaultsConfig {
    /// Directory containing nunit-console
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_32bit: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_domain_usage: Option<String>,

    /// Per test case timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// A single test target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TargetConfig {
    /// Assemblies to test, in order
    #[serde(default)]
    pub assemblies: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_shadow_copy: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_dots: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_labels: Option<bool>,

    /// Defaults to true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_in_new_thread: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_configuration: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub what_to_run: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_xml_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_output_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_domain_usage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_32bit: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,
}

impl BuildFile {
    /// Load a build file from disk
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let build_file: Self =
            toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error: e,
            })?;

        build_file.validate()?;
        Ok(build_file)
    }

    /// Validate the build file
    ///
    /// Enum names are parsed here so a misspelled process model fails at load
    /// time rather than when a run is assembled.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(defaults) = &self.defaults {
            if let Some(model) = &defaults.process_model {
                parse_field::<ProcessModel>("defaults.process-model", model)?;
            }
            if let Some(usage) = &defaults.app_domain_usage {
                parse_field::<AppDomainUsage>("defaults.app-domain-usage", usage)?;
            }
        }

        for (name, target) in &self.targets {
            validate_target(name, target)?;
        }

        if let Some(default) = &self.default_target {
            if !self.targets.contains_key(default) {
                return Err(ConfigError::InvalidValue {
                    field: "default-target".to_string(),
                    reason: format!("target '{}' is not defined", default),
                });
            }
        }

        Ok(())
    }

    /// Target names in sorted order
    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Pick the target to run
    ///
    /// An explicit name wins, then `default-target`, then the only target
    /// when exactly one is defined.
    pub fn select_target<'a>(&'a self, name: Option<&'a str>) -> ConfigResult<&'a str> {
        if let Some(name) = name {
            if self.targets.contains_key(name) {
                return Ok(name);
            }
            return Err(ConfigError::UnknownTarget {
                name: name.to_string(),
                available: self.available_targets(),
            });
        }

        if let Some(default) = self.default_target.as_deref() {
            return Ok(default);
        }

        let mut names = self.target_names();
        match (names.next(), names.next()) {
            (Some(only), None) => Ok(only),
            (None, _) => Err(ConfigError::ValidationError(
                "no targets defined in build file".to_string(),
            )),
            _ => Err(ConfigError::AmbiguousTarget(self.available_targets())),
        }
    }

    /// Look up a target by name
    pub fn target(&self, name: &str) -> ConfigResult<&TargetConfig> {
        self.targets
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTarget {
                name: name.to_string(),
                available: self.available_targets(),
            })
    }

    fn available_targets(&self) -> String {
        if self.targets.is_empty() {
            "none".to_string()
        } else {
            self.target_names().collect::<Vec<_>>().join(", ")
        }
    }
}

/// Validate a single target table
fn validate_target(name: &str, target: &TargetConfig) -> ConfigResult<()> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "targets".to_string(),
            reason: "target name cannot be empty".to_string(),
        });
    }

    if target.assemblies.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: format!("targets.{}.assemblies", name),
            reason: "at least one assembly is required".to_string(),
        });
    }

    if target.assemblies.iter().any(|a| a.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: format!("targets.{}.assemblies", name),
            reason: "assembly paths cannot be empty".to_string(),
        });
    }

    if let Some(model) = &target.process_model {
        parse_field::<ProcessModel>(&format!("targets.{}.process-model", name), model)?;
    }

    if let Some(usage) = &target.app_domain_usage {
        parse_field::<AppDomainUsage>(&format!("targets.{}.app-domain-usage", name), usage)?;
    }

    Ok(())
}
