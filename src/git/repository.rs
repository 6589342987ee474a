use crate::error::{BuildError, Result};
use git2::{DescribeFormatOptions, DescribeOptions, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn describe(&self, pattern: &str) -> Result<String> {
        let mut options = DescribeOptions::new();
        options.describe_tags().pattern(pattern);

        let describe = self.repo.describe(&options).map_err(|e| {
            BuildError::Git(git2::Error::new(
                e.code(),
                e.class(),
                format!(
                    "no tag matching '{}' is reachable from HEAD: {}",
                    pattern,
                    e.message()
                ),
            ))
        })?;

        let mut format = DescribeFormatOptions::new();
        format.always_use_long_format(true);

        Ok(describe.format(Some(&format))?)
    }

    fn head_short_id(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        let short = commit.as_object().short_id()?;

        short
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| BuildError::Git(git2::Error::from_str("HEAD id is not valid UTF-8")))
    }
}
