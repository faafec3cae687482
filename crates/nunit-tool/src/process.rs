//! Process execution

use crate::command_line::{quote_if_needed, CommandLineBuilder};
use crate::error::{ToolError, ToolResult};
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A fully resolved console invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Executable to run
    pub program: PathBuf,
    /// Directory to run in; `None` inherits the current directory
    pub working_directory: Option<PathBuf>,
    /// Ordered arguments
    pub arguments: CommandLineBuilder,
}

impl Invocation {
    /// Arguments as handed to the process
    pub fn args(&self) -> Vec<String> {
        self.arguments.to_args()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            quote_if_needed(&self.program.to_string_lossy())
        )?;
        if !self.arguments.is_empty() {
            write!(f, " {}", self.arguments)?;
        }
        Ok(())
    }
}

/// Result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code
    pub exit_code: i32,
    /// Stdout output
    pub stdout: String,
    /// Stderr output
    pub stderr: String,
    /// Wall clock time
    pub execution_time: Duration,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Pipe an output line was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Spawns an invocation and waits for it
pub trait ProcessRunner {
    /// `on_line` sees each output line as soon as the child writes it
    fn run(
        &self,
        invocation: &Invocation,
        on_line: &mut dyn FnMut(OutputStream, &str),
    ) -> ToolResult<ProcessOutput>;
}

/// Runs invocations with `std::process::Command`, relaying output while the
/// child runs
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(
        &self,
        invocation: &Invocation,
        on_line: &mut dyn FnMut(OutputStream, &str),
    ) -> ToolResult<ProcessOutput> {
        let start = Instant::now();

        let mut command = Command::new(&invocation.program);
        command
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &invocation.working_directory {
            command.current_dir(dir);
        }

        let mut child = command
            .spawn()
            .map_err(|e| ToolError::launch(&invocation.program, e))?;

        let (tx, rx) = channel();
        let readers: Vec<JoinHandle<()>> = [
            child
                .stdout
                .take()
                .map(|pipe| forward_lines(pipe, OutputStream::Stdout, tx.clone())),
            child
                .stderr
                .take()
                .map(|pipe| forward_lines(pipe, OutputStream::Stderr, tx.clone())),
        ]
        .into_iter()
        .flatten()
        .collect();
        drop(tx);

        let mut stdout = String::new();
        let mut stderr = String::new();
        // Ends once both pipes are closed
        for (stream, line) in rx {
            on_line(stream, &line);
            let buffer = match stream {
                OutputStream::Stdout => &mut stdout,
                OutputStream::Stderr => &mut stderr,
            };
            buffer.push_str(&line);
            buffer.push('\n');
        }
        for reader in readers {
            let _ = reader.join();
        }

        let status = child
            .wait()
            .map_err(|e| ToolError::launch(&invocation.program, e))?;

        Ok(ProcessOutput {
            // Terminated by a signal
            exit_code: status.code().unwrap_or(1),
            stdout,
            stderr,
            execution_time: start.elapsed(),
        })
    }
}

/// Read `pipe` line by line on a background thread
fn forward_lines<R>(
    pipe: R,
    stream: OutputStream,
    tx: Sender<(OutputStream, String)>,
) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buffer)
                        .trim_end_matches(|c: char| c == '\n' || c == '\r')
                        .to_string();
                    if tx.send((stream, line)).is_err() {
                        break;
                    }
                }
            }
        }
    })
}
