//! Blocking execution of external programs.
//!
//! Every collaborator (player query, analyzer, image renderer, font resize)
//! goes through [`CommandRunner`] so the rest of the crate never touches
//! `std::process` directly and tests can substitute canned output.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;
use wait_timeout::ChildExt;

/// A program plus its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.as_os_str().to_os_string())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for a in &self.args {
            write!(f, " {}", a.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Result of a finished child process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    fn from_status(status: ExitStatus, stdout: String, stderr: String) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
            stdout,
            stderr,
        }
    }

    /// Short human-readable reason for a failed run.
    pub fn failure_reason(&self) -> String {
        let status = match self.code {
            Some(c) => format!("exit status {c}"),
            None => "terminated by signal".to_string(),
        };
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            status
        } else {
            format!("{status}: {stderr}")
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` did not finish within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
}

/// Runs external programs to completion.
pub trait CommandRunner {
    /// Run with stdout/stderr captured.
    fn capture(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError>;

    /// Run with stdout/stderr inherited so the child draws straight to the terminal.
    /// The returned output carries only the exit status.
    fn passthrough(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError>;
}

/// [`CommandRunner`] backed by `std::process`, with an optional upper bound
/// on how long any child may run.
#[derive(Clone, Debug, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn spawn(&self, cmd: &CommandSpec, capture: bool) -> Result<Child, ProcessError> {
        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args).stdin(Stdio::null());
        if capture {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        }
        command.spawn().map_err(|source| ProcessError::Spawn {
            program: program_name(cmd),
            source,
        })
    }

    fn wait(&self, cmd: &CommandSpec, child: &mut Child) -> Result<ExitStatus, ProcessError> {
        let wait_err = |source| ProcessError::Wait {
            program: program_name(cmd),
            source,
        };

        let Some(timeout) = self.timeout else {
            return child.wait().map_err(wait_err);
        };

        match child.wait_timeout(timeout).map_err(wait_err)? {
            Some(status) => Ok(status),
            None => {
                // Kill and reap so no zombie is left behind.
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(command = %cmd, ?timeout, "external command timed out");
                Err(ProcessError::TimedOut {
                    program: program_name(cmd),
                    timeout,
                })
            }
        }
    }
}

impl CommandRunner for SystemRunner {
    fn capture(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        tracing::trace!(command = %cmd, "running (captured)");
        let mut child = self.spawn(cmd, true)?;

        // Drain both pipes while waiting so a chatty child cannot block on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // On failure the drain threads are left detached: a grandchild of a
        // killed child can hold the pipes open long after the timeout.
        let status = self.wait(cmd, &mut child)?;
        let stdout = join_drain(stdout);
        let stderr = join_drain(stderr);

        Ok(CommandOutput::from_status(status, stdout, stderr))
    }

    fn passthrough(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        tracing::trace!(command = %cmd, "running (passthrough)");
        let mut child = self.spawn(cmd, false)?;
        let status = self.wait(cmd, &mut child)?;
        Ok(CommandOutput::from_status(status, String::new(), String::new()))
    }
}

fn program_name(cmd: &CommandSpec) -> String {
    cmd.program.to_string_lossy().into_owned()
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut r| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = r.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_drain(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

#[cfg(test)]
pub mod fake;
