//! Argument translation
//!
//! Maps a [`RunConfiguration`] onto the `nunit-console` command line, the
//! executable to run and the directory to run it in.

use crate::command_line::CommandLineBuilder;
use crate::locate::ToolDirectoryProvider;
use crate::log::TaskLog;
use crate::platform::HostPlatform;
use nunit_config::RunConfiguration;
use std::path::PathBuf;

/// Console executable base name
pub const TOOL_NAME: &str = "nunit-console";
/// 32 bit console executable base name
pub const TOOL_NAME_X86: &str = "nunit-console-x86";

/// Translates one run configuration for one host platform
#[derive(Debug, Clone, Copy)]
pub struct ArgumentTranslator<'a> {
    config: &'a RunConfiguration,
    platform: HostPlatform,
}

impl<'a> ArgumentTranslator<'a> {
    pub fn new(config: &'a RunConfiguration, platform: HostPlatform) -> Self {
        Self { config, platform }
    }

    pub fn platform(&self) -> HostPlatform {
        self.platform
    }

    pub fn switch_prefix(&self) -> char {
        self.platform.switch_prefix()
    }

    fn switch(&self, name: &str) -> String {
        format!("{}{}", self.switch_prefix(), name)
    }

    /// Build the argument list
    ///
    /// Emission order is fixed: flags, assemblies, valued switches, then the
    /// isolation and timeout switches.
    pub fn command_line(&self) -> CommandLineBuilder {
        let config = self.config;
        let mut builder = CommandLineBuilder::new();

        builder.append_switch(self.switch("nologo"));
        if config.shadow_copy_disabled {
            builder.append_switch(self.switch("noshadow"));
        }
        if config.hide_dots {
            builder.append_switch(self.switch("nodots"));
        }
        if config.show_labels {
            builder.append_switch(self.switch("labels"));
        }
        if !config.run_in_new_thread {
            builder.append_switch(self.switch("nothread"));
        }

        builder.append_file_names(&config.assemblies);

        let valued = [
            ("config=", &config.project_configuration),
            ("run=", &config.what_to_run),
            ("include=", &config.include_category),
            ("exclude=", &config.exclude_category),
            ("transform=", &config.transform_file),
            ("xml=", &config.output_xml_file),
            ("err=", &config.error_output_file),
            ("framework=", &config.framework_version),
        ];
        for (key, value) in valued {
            builder.append_switch_if_not_empty(self.switch(key), value.as_deref());
        }

        if !config.process_model.is_default() {
            builder.append_switch_if_not_empty(
                self.switch("process="),
                Some(config.process_model.name()),
            );
        }
        if !config.app_domain_usage.is_default() {
            builder.append_switch_if_not_empty(
                self.switch("domain="),
                Some(config.app_domain_usage.name()),
            );
        }
        if config.timeout_milliseconds != 0 {
            builder.append_switch_if_not_empty(
                self.switch("timeout="),
                Some(&config.timeout_milliseconds.to_string()),
            );
        }

        builder
    }

    /// Executable file name for this platform
    pub fn tool_name(&self) -> String {
        let base = if self.config.force_32bit {
            TOOL_NAME_X86
        } else {
            TOOL_NAME
        };
        format!("{}{}", base, self.platform.executable_suffix())
    }

    /// Directory containing the executable
    ///
    /// A missing directory is logged as an error and the path is returned
    /// anyway; the failed launch then surfaces to the user.
    pub fn tool_directory(
        &self,
        provider: &dyn ToolDirectoryProvider,
        log: &mut dyn TaskLog,
    ) -> PathBuf {
        let configured = self
            .config
            .tool_path
            .as_ref()
            .map(|p| p.to_string_lossy().trim().to_string())
            .filter(|p| !p.is_empty());

        let directory = match configured {
            Some(path) => PathBuf::from(path),
            None => {
                let fallback = provider.default_tool_directory().unwrap_or_default();
                tracing::debug!(directory = %fallback.display(), "using default tool directory");
                fallback
            }
        };

        if !directory.is_dir() {
            log.log_error(&format!(
                "Could not find directory '{}'",
                directory.display()
            ));
        }

        directory
    }

    /// Full path of the executable
    pub fn full_path_to_tool(
        &self,
        provider: &dyn ToolDirectoryProvider,
        log: &mut dyn TaskLog,
    ) -> PathBuf {
        self.tool_directory(provider, log).join(self.tool_name())
    }

    /// Directory to run in; `None` inherits the caller's working directory
    pub fn working_directory(&self) -> Option<PathBuf> {
        self.config
            .working_directory
            .as_ref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .cloned()
    }
}
