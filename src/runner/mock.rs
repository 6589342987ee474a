use std::sync::Mutex;

use crate::error::{BuildError, Result};
use crate::runner::{CommandRunner, Invocation};

/// Records invocations instead of running them.
///
/// Optionally fails the first invocation whose program matches, which lets
/// tests observe that nothing runs after a failing tool.
#[derive(Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    fail_program: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner that fails every invocation of `program`
    pub fn failing_on(program: impl Into<String>) -> Self {
        RecordingRunner {
            invocations: Mutex::new(Vec::new()),
            fail_program: Some(program.into()),
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// Invocations rendered as display strings
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations().iter().map(|i| i.to_string()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        if let Ok(mut recorded) = self.invocations.lock() {
            recorded.push(invocation.clone());
        }

        if self.fail_program.as_deref() == Some(invocation.program.as_str()) {
            return Err(BuildError::tool(&invocation.program, "exited with code 1"));
        }

        Ok(())
    }
}
