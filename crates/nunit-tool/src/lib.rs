//! nunit-console tool task
//!
//! Turns a [`RunConfiguration`] into an `nunit-console` invocation and runs it:
//! - Platform dependent switch prefix and executable name
//! - Ordered argument list with command line rendering for logs
//! - Tool directory resolution with an injectable fallback
//! - Process execution, output relay and outcome reporting

pub mod command_line;
pub mod error;
pub mod locate;
pub mod log;
pub mod platform;
pub mod process;
pub mod task;
pub mod translator;

// Re-export main types
pub use command_line::{Argument, CommandLineBuilder};
pub use error::{ToolError, ToolResult};
pub use locate::{CurrentExeDirectory, FixedDirectory, ToolDirectoryProvider};
pub use log::{Importance, LogEntry, MemoryLog, TaskLog, TracingLog};
pub use platform::HostPlatform;
pub use process::{Invocation, OutputStream, ProcessOutput, ProcessRunner, SystemProcessRunner};
pub use task::{TaskOutcome, ToolTask};
pub use translator::ArgumentTranslator;

// Re-export nunit-config types for convenience
pub use nunit_config::{AppDomainUsage, ProcessModel, RunConfiguration};
