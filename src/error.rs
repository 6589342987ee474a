use thiserror::Error;

/// Unified error type for buildchain operations
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version format error: {0}")]
    Format(String),

    #[error("Target graph error: {0}")]
    Graph(String),

    #[error("Tool '{program}' failed: {reason}")]
    Tool { program: String, reason: String },

    #[error("Step failed: {0}")]
    Step(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in buildchain
pub type Result<T> = std::result::Result<T, BuildError>;

impl BuildError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BuildError::Config(msg.into())
    }

    /// Create a describe-string format error
    pub fn format(msg: impl Into<String>) -> Self {
        BuildError::Format(msg.into())
    }

    /// Create a target graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        BuildError::Graph(msg.into())
    }

    /// Create an external tool failure
    pub fn tool(program: impl Into<String>, reason: impl Into<String>) -> Self {
        BuildError::Tool {
            program: program.into(),
            reason: reason.into(),
        }
    }

    pub fn step(msg: impl Into<String>) -> Self {
        BuildError::Step(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildError::config("missing solution");
        assert_eq!(err.to_string(), "Configuration error: missing solution");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuildError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_tool_error_names_program() {
        let err = BuildError::tool("dotnet", "exit code 1");
        assert_eq!(err.to_string(), "Tool 'dotnet' failed: exit code 1");
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (BuildError::config("x"), "Configuration error"),
            (BuildError::format("x"), "Version format error"),
            (BuildError::graph("x"), "Target graph error"),
            (BuildError::step("x"), "Step failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_git_error_conversion() {
        let git_err = git2::Error::from_str("reference not found");
        let err: BuildError = git_err.into();
        assert!(err.to_string().starts_with("Git operation failed"));
    }
}
