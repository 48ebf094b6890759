//! Scripted [`CommandRunner`] for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use super::{CommandOutput, CommandRunner, CommandSpec, ProcessError};

pub enum Reply {
    Output(CommandOutput),
    SpawnFailure,
}

impl Reply {
    pub fn ok(stdout: &str) -> Self {
        Self::Output(CommandOutput {
            success: true,
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    pub fn exit(code: i32, stderr: &str) -> Self {
        Self::Output(CommandOutput {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }
}

/// Replies are handed out in order; once exhausted every call succeeds with empty output.
/// Every invocation is recorded.
#[derive(Default)]
pub struct FakeRunner {
    replies: RefCell<VecDeque<Reply>>,
    pub calls: RefCell<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn next(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        self.calls.borrow_mut().push(cmd.clone());
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Output(out)) => Ok(out),
            Some(Reply::SpawnFailure) => Err(ProcessError::Spawn {
                program: cmd.program.to_string_lossy().into_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            }),
            None => Ok(CommandOutput {
                success: true,
                code: Some(0),
                ..CommandOutput::default()
            }),
        }
    }
}

impl CommandRunner for FakeRunner {
    fn capture(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        self.next(cmd)
    }

    fn passthrough(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        self.next(cmd)
    }
}
