use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{BuildError, Result};
use crate::runner::{CommandRunner, Invocation};

/// Spawns each invocation inside the project root and waits for it,
/// inheriting stdout and stderr.
pub struct ProcessRunner {
    root: PathBuf,
}

impl ProcessRunner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProcessRunner { root: root.into() }
    }
}

impl CommandRunner for ProcessRunner {
    /// Any non-zero exit code is a failure.
    fn run(&self, invocation: &Invocation) -> Result<()> {
        info!(command = %invocation, "running");
        debug!(cwd = %self.root.display());

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&self.root)
            .status()
            .map_err(|e| BuildError::tool(&invocation.program, format!("could not start: {}", e)))?;

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("exited with code {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(BuildError::tool(&invocation.program, reason));
        }

        Ok(())
    }
}

/// Logs each invocation without running it.
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        info!(command = %invocation, "dry run");
        crate::ui::display_command(invocation, true);
        Ok(())
    }
}
