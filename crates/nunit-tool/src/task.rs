//! Tool task
//!
//! Plays the host side of a build task: resolve the invocation, echo it,
//! run it, relay its output and decide whether the task succeeded.

use crate::error::ToolResult;
use crate::locate::{CurrentExeDirectory, ToolDirectoryProvider};
use crate::log::{Importance, TaskLog};
use crate::platform::HostPlatform;
use crate::process::{Invocation, OutputStream, ProcessRunner, SystemProcessRunner};
use crate::translator::ArgumentTranslator;
use nunit_config::RunConfiguration;

/// How a task run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskOutcome {
    /// Console exit code; `None` when it could not be launched
    pub exit_code: Option<i32>,
    /// Exit code zero and nothing logged as an error
    pub success: bool,
}

/// Runs nunit-console for one run configuration
pub struct ToolTask {
    config: RunConfiguration,
    platform: HostPlatform,
    tool_directory: Box<dyn ToolDirectoryProvider>,
    runner: Box<dyn ProcessRunner>,
}

impl ToolTask {
    /// Create a task for the current platform
    ///
    /// Fails when required settings are missing.
    pub fn new(config: RunConfiguration) -> ToolResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            platform: HostPlatform::current(),
            tool_directory: Box::new(CurrentExeDirectory),
            runner: Box::new(SystemProcessRunner),
        })
    }

    /// Translate for another platform
    pub fn with_platform(mut self, platform: HostPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Replace the default tool directory lookup
    pub fn with_tool_directory_provider(
        mut self,
        provider: impl ToolDirectoryProvider + 'static,
    ) -> Self {
        self.tool_directory = Box::new(provider);
        self
    }

    /// Replace the process runner
    pub fn with_process_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    pub fn platform(&self) -> HostPlatform {
        self.platform
    }

    /// Resolve the invocation without running it
    pub fn invocation(&self, log: &mut dyn TaskLog) -> Invocation {
        let translator = ArgumentTranslator::new(&self.config, self.platform);
        Invocation {
            program: translator.full_path_to_tool(self.tool_directory.as_ref(), log),
            working_directory: translator.working_directory(),
            arguments: translator.command_line(),
        }
    }

    /// Run the console and report the outcome
    pub fn execute(&self, log: &mut dyn TaskLog) -> TaskOutcome {
        let invocation = self.invocation(log);
        log.log_command_line(Importance::High, &invocation.to_string());

        let tool_name = invocation
            .program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| invocation.program.display().to_string());

        let result = self.runner.run(&invocation, &mut |stream: OutputStream, line: &str| {
            match stream {
                OutputStream::Stdout => log.log_message(Importance::High, line),
                OutputStream::Stderr => log.log_message(Importance::Normal, line),
            }
        });
        let output = match result {
            Ok(output) => output,
            Err(e) => {
                log.log_error(&e.to_string());
                return TaskOutcome {
                    exit_code: None,
                    success: false,
                };
            }
        };

        tracing::debug!(
            tool = %tool_name,
            exit_code = output.exit_code,
            elapsed_ms = output.execution_time.as_millis() as u64,
            "console finished"
        );

        if !output.success() {
            log.log_error(&format!(
                "{} exited with code {}.",
                tool_name, output.exit_code
            ));
        }

        TaskOutcome {
            exit_code: Some(output.exit_code),
            success: output.success() && !log.has_logged_errors(),
        }
    }
}
