use crate::error::{BuildError, Result};
use crate::git::Repository;

/// Mock repository returning a canned describe string
pub struct MockRepository {
    describe: Option<String>,
    head: String,
}

impl MockRepository {
    /// Create a mock with no reachable tag
    pub fn new() -> Self {
        MockRepository {
            describe: None,
            head: "0000000".to_string(),
        }
    }

    /// Create a mock whose HEAD describes as `describe`
    pub fn with_describe(describe: impl Into<String>) -> Self {
        let describe = describe.into();
        let head = describe
            .rsplit_once("-g")
            .map(|(_, sha)| sha.to_string())
            .unwrap_or_else(|| "0000000".to_string());
        MockRepository {
            describe: Some(describe),
            head,
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn describe(&self, pattern: &str) -> Result<String> {
        self.describe.clone().ok_or_else(|| {
            BuildError::Git(git2::Error::from_str(&format!(
                "no tag matching '{}' is reachable from HEAD",
                pattern
            )))
        })
    }

    fn head_short_id(&self) -> Result<String> {
        Ok(self.head.clone())
    }
}
