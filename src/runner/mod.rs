//! External tool invocation
//!
//! Every build step ends in one or more [Invocation]s handed to a
//! [CommandRunner]. The real runner spawns processes and stops at the first
//! non-zero exit; the others log or record the command line.

pub mod mock;
pub mod process;

pub use mock::RecordingRunner;
pub use process::{DryRunRunner, ProcessRunner};

use std::fmt;

use crate::error::Result;

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Indices into `args` that must not be printed
    secret: Vec<usize>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            secret: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds an argument shown as `***` when the invocation is displayed.
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret.push(self.args.len());
        self.args.push(arg.into());
        self
    }

}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for (i, arg) in self.args.iter().enumerate() {
            if self.secret.contains(&i) {
                write!(f, " ***")?;
            } else if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs external commands.
///
/// Implementations return `Err(BuildError::Tool)` when the command cannot be
/// started or exits unsuccessfully.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_whitespace() {
        let inv = Invocation::new("dotnet")
            .arg("build")
            .arg("My Library.sln");
        assert_eq!(inv.to_string(), "dotnet build \"My Library.sln\"");
    }

    #[test]
    fn test_display_hides_secret() {
        let inv = Invocation::new("dotnet")
            .args(["nuget", "push", "pkg.nupkg", "--api-key"])
            .secret_arg("s3cr3t");
        let shown = inv.to_string();
        assert!(!shown.contains("s3cr3t"));
        assert!(shown.ends_with("--api-key ***"));
        assert_eq!(inv.args.last().map(String::as_str), Some("s3cr3t"));
    }
}
