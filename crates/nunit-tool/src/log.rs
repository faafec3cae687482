//! Task log sink
//!
//! The build engine treats any logged error as a failed task, so sinks keep
//! track of whether one was written.

use std::fmt;

/// Message importance, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Importance {
    High,
    Normal,
    Low,
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        })
    }
}

/// Destination for task messages
pub trait TaskLog {
    fn log_message(&mut self, importance: Importance, message: &str);

    fn log_warning(&mut self, message: &str);

    fn log_error(&mut self, message: &str);

    /// Echo of the command about to be executed
    fn log_command_line(&mut self, importance: Importance, command_line: &str) {
        self.log_message(importance, command_line);
    }

    fn has_logged_errors(&self) -> bool;
}

/// Log sink backed by `tracing`
#[derive(Debug, Default)]
pub struct TracingLog {
    errors: usize,
    warnings: usize,
}

impl TracingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }
}

impl TaskLog for TracingLog {
    fn log_message(&mut self, importance: Importance, message: &str) {
        match importance {
            Importance::High => tracing::info!("{}", message),
            Importance::Normal => tracing::debug!("{}", message),
            Importance::Low => tracing::trace!("{}", message),
        }
    }

    fn log_warning(&mut self, message: &str) {
        self.warnings += 1;
        tracing::warn!("{}", message);
    }

    fn log_error(&mut self, message: &str) {
        self.errors += 1;
        tracing::error!("{}", message);
    }

    fn log_command_line(&mut self, importance: Importance, command_line: &str) {
        match importance {
            Importance::High => tracing::info!(command = %command_line, "executing"),
            Importance::Normal => tracing::debug!(command = %command_line, "executing"),
            Importance::Low => tracing::trace!(command = %command_line, "executing"),
        }
    }

    fn has_logged_errors(&self) -> bool {
        self.errors > 0
    }
}

/// A recorded log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Message { importance: Importance, text: String },
    CommandLine { importance: Importance, text: String },
    Warning(String),
    Error(String),
}

/// Log sink that records entries in memory
#[derive(Debug, Default)]
pub struct MemoryLog {
    pub entries: Vec<LogEntry>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error messages in the order they were logged
    pub fn errors(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                LogEntry::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Messages logged at the given importance
    pub fn messages(&self, importance: Importance) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                LogEntry::Message {
                    importance: i,
                    text,
                } if *i == importance => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Echoed command lines
    pub fn command_lines(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                LogEntry::CommandLine { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl TaskLog for MemoryLog {
    fn log_message(&mut self, importance: Importance, message: &str) {
        self.entries.push(LogEntry::Message {
            importance,
            text: message.to_string(),
        });
    }

    fn log_warning(&mut self, message: &str) {
        self.entries.push(LogEntry::Warning(message.to_string()));
    }

    fn log_error(&mut self, message: &str) {
        self.entries.push(LogEntry::Error(message.to_string()));
    }

    fn log_command_line(&mut self, importance: Importance, command_line: &str) {
        self.entries.push(LogEntry::CommandLine {
            importance,
            text: command_line.to_string(),
        });
    }

    fn has_logged_errors(&self) -> bool {
        self.entries.iter().any(|e| matches!(e, LogEntry::Error(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_log_records_entries() {
        let mut log = MemoryLog::new();
        log.log_message(Importance::High, "hello");
        log.log_message(Importance::Low, "detail");
        log.log_command_line(Importance::High, "nunit-console -nologo A.dll");
        log.log_warning("careful");

        assert!(!log.has_logged_errors());
        assert_eq!(log.messages(Importance::High), vec!["hello"]);
        assert_eq!(log.command_lines(), vec!["nunit-console -nologo A.dll"]);

        log.log_error("broken");
        assert!(log.has_logged_errors());
        assert_eq!(log.errors(), vec!["broken"]);
    }

    #[test]
    fn test_tracing_log_counts() {
        let mut log = TracingLog::new();
        log.log_message(Importance::Normal, "message");
        log.log_warning("warning");
        assert!(!log.has_logged_errors());

        log.log_error("error");
        assert!(log.has_logged_errors());
        assert_eq!(log.error_count(), 1);
        assert_eq!(log.warning_count(), 1);
    }

    #[test]
    fn test_importance_order() {
        assert!(Importance::High < Importance::Normal);
        assert!(Importance::Normal < Importance::Low);
    }
}
