//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::build_file::{BuildFile, BUILD_FILE_NAME};
use crate::global::UserConfig;
use crate::options::{parse_field, AppDomainUsage, ProcessModel, RunConfiguration};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Overrides the tool directory
pub const ENV_TOOL_PATH: &str = "NUNIT_TOOL_PATH";
/// Overrides the working directory
pub const ENV_WORKING_DIRECTORY: &str = "NUNIT_WORKING_DIRECTORY";
/// Overrides the 32 bit console selection
pub const ENV_FORCE_32BIT: &str = "NUNIT_FORCE_32BIT";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. User config (~/.nunit-task/config.toml) - lowest priority
/// 2. Build file (./nunit.toml), `[defaults]` then the selected target
/// 3. Environment variables (NUNIT_*) - overrides the build file
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Cached user config path
    user_config_path: Option<PathBuf>,
}

/// Settings taken from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub tool_path: Option<PathBuf>,
    pub working_directory: Option<PathBuf>,
    pub force_32bit: Option<bool>,
}

impl EnvOverrides {
    /// Read the NUNIT_* variables; empty values count as unset
    pub fn from_env() -> ConfigResult<Self> {
        let non_empty = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());

        let force_32bit = match non_empty(ENV_FORCE_32BIT) {
            Some(value) => Some(parse_flag(ENV_FORCE_32BIT, &value)?),
            None => None,
        };

        Ok(Self {
            tool_path: non_empty(ENV_TOOL_PATH).map(PathBuf::from),
            working_directory: non_empty(ENV_WORKING_DIRECTORY).map(PathBuf::from),
            force_32bit,
        })
    }
}

/// Parse a boolean environment value
fn parse_flag(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!(
                "unrecognized flag '{}' (expected one of: true, 1, yes, false, 0, no)",
                value
            ),
        }),
    }
}

/// Paths that are empty after trimming count as unset
fn non_blank(path: &Path) -> Option<&Path> {
    if path.to_string_lossy().trim().is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Merged configuration result
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed build file
    pub build_file: BuildFile,

    /// User configuration
    pub user: UserConfig,

    /// Environment overrides captured at load time
    pub env: EnvOverrides,

    /// Location of the build file
    pub build_file_path: PathBuf,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            user_config_path: None,
        }
    }

    /// Use a specific user configuration file instead of ~/.nunit-task/config.toml
    pub fn with_user_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_config_path = Some(path.into());
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find nunit.toml, then loads the user
    /// config if it exists.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let build_file_path = self
            .find_build_file(start_dir)
            .ok_or_else(|| ConfigError::NoBuildFile(start_dir.to_path_buf()))?;
        self.load_from_file(&build_file_path)
    }

    /// Load configuration from a specific build file
    pub fn load_from_file(&mut self, build_file_path: &Path) -> ConfigResult<Config> {
        let build_file = BuildFile::load_from_file(build_file_path)?;
        let user = self.load_user_config()?;

        Ok(Config {
            build_file,
            user,
            env: EnvOverrides::from_env()?,
            build_file_path: build_file_path.to_path_buf(),
        })
    }

    /// Find the build file by walking up the directory tree
    fn find_build_file(&self, start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(BUILD_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the user configuration; a missing file yields the defaults
    fn load_user_config(&mut self) -> ConfigResult<UserConfig> {
        let path = match &self.user_config_path {
            Some(path) => path.clone(),
            None => match UserConfig::user_config_path() {
                Ok(path) => {
                    self.user_config_path = Some(path.clone());
                    path
                }
                // No home directory means no user config
                Err(ConfigError::HomeNotFound) => return Ok(UserConfig::default()),
                Err(e) => return Err(e),
            },
        };

        if !path.exists() {
            return Ok(UserConfig::default());
        }

        UserConfig::load_from_file(&path)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Directory containing the build file
    pub fn root(&self) -> Option<&Path> {
        self.build_file_path.parent()
    }

    /// Target names in sorted order
    pub fn target_names(&self) -> Vec<&str> {
        self.build_file.target_names().collect()
    }

    /// Assemble the run configuration for a target
    ///
    /// `None` selects the default target (see [`BuildFile::select_target`]).
    pub fn run_configuration(&self, target: Option<&str>) -> ConfigResult<RunConfiguration> {
        let name = self.build_file.select_target(target)?;
        let target = self.build_file.target(name)?;
        let defaults = self.build_file.defaults.clone().unwrap_or_default();

        let mut run = RunConfiguration::new(target.assemblies.iter().map(PathBuf::from));
        run.shadow_copy_disabled = target.disable_shadow_copy.unwrap_or(false);
        run.hide_dots = target.hide_dots.unwrap_or(false);
        run.show_labels = target.show_labels.unwrap_or(false);
        run.run_in_new_thread = target.run_in_new_thread.unwrap_or(true);

        run.include_category = target.include_category.clone();
        run.exclude_category = target.exclude_category.clone();
        run.project_configuration = target.project_configuration.clone();
        run.what_to_run = target.what_to_run.clone();
        run.transform_file = target.transform_file.clone();
        run.output_xml_file = target.output_xml_file.clone();
        run.error_output_file = target.error_output_file.clone();
        run.framework_version = target
            .framework_version
            .clone()
            .or(defaults.framework_version);

        if let Some(model) = target.process_model.as_ref() {
            run.process_model =
                parse_field::<ProcessModel>(&format!("targets.{}.process-model", name), model)?;
        } else if let Some(model) = defaults.process_model.as_ref() {
            run.process_model = parse_field::<ProcessModel>("defaults.process-model", model)?;
        }

        if let Some(usage) = target.app_domain_usage.as_ref() {
            run.app_domain_usage = parse_field::<AppDomainUsage>(
                &format!("targets.{}.app-domain-usage", name),
                usage,
            )?;
        } else if let Some(usage) = defaults.app_domain_usage.as_ref() {
            run.app_domain_usage =
                parse_field::<AppDomainUsage>("defaults.app-domain-usage", usage)?;
        }

        run.timeout_milliseconds = target.timeout.or(defaults.timeout).unwrap_or(0);

        run.force_32bit = self
            .env
            .force_32bit
            .or(target.force_32bit)
            .or(defaults.force_32bit)
            .or(self.user.force_32bit())
            .unwrap_or(false);

        run.tool_path = self
            .env
            .tool_path
            .clone()
            .or_else(|| self.configured_path(target.tool_path.as_deref()))
            .or_else(|| self.configured_path(defaults.tool_path.as_deref()))
            .or_else(|| {
                self.user
                    .tool_path()
                    .and_then(non_blank)
                    .map(Path::to_path_buf)
            });

        run.working_directory = self
            .env
            .working_directory
            .clone()
            .or_else(|| self.configured_path(target.working_directory.as_deref()))
            .or_else(|| self.configured_path(defaults.working_directory.as_deref()));

        run.validate()?;
        Ok(run)
    }

    /// A build file path, skipped when blank, resolved against the build file
    fn configured_path(&self, path: Option<&Path>) -> Option<PathBuf> {
        path.and_then(non_blank).map(|p| self.resolve_path(p))
    }

    /// Resolve a build-file relative path against the build file's directory
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.as_os_str().is_empty() || path.is_absolute() {
            return path.to_path_buf();
        }
        match self.root() {
            Some(root) if !root.as_os_str().is_empty() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}
