//! Named build parameters supplied by the invoking environment.

use std::collections::BTreeMap;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::version::VersionSource;

/// Parameters that vary per invocation rather than per repository.
///
/// Every field has a silent default: no version override, build number 0,
/// sequential tests, no API keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildParameters {
    /// Explicit version; bypasses tag derivation when set
    pub version: Option<String>,
    pub file_version: Option<String>,
    pub package_version: Option<String>,
    pub build_number: u32,
    /// Forwarded to the xUnit runner
    pub parallel_tests: bool,
    /// Forwarded to the xUnit runner
    pub max_threads: Option<u32>,
    /// Feed name to API key
    pub api_keys: BTreeMap<String, String>,
    /// Log commands instead of running them
    pub dry_run: bool,
}

impl BuildParameters {
    /// Chooses how the version triple is obtained.
    ///
    /// `describe` is only called when no explicit version was supplied, so a
    /// build with an explicit version never touches the repository.
    pub fn version_source<F>(&self, describe: F) -> Result<VersionSource>
    where
        F: FnOnce() -> Result<String>,
    {
        match &self.version {
            Some(version) => Ok(VersionSource::Explicit {
                version: version.clone(),
                file_version: self.file_version.clone(),
                package_version: self.package_version.clone(),
            }),
            None => Ok(VersionSource::Describe {
                describe: describe()?,
                build_number: self.build_number,
            }),
        }
    }

    /// API key for `feed`: an explicit `--api-key` first, then the feed's
    /// environment variable. Empty values count as missing.
    pub fn api_key_for(&self, feed: &FeedConfig) -> Option<String> {
        if let Some(key) = self.api_keys.get(&feed.name) {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }

        feed.api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty())
    }
}

/// Parses a `FEED=KEY` pair.
pub fn parse_api_key(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((feed, key)) if !feed.is_empty() && !key.is_empty() => {
            Ok((feed.to_string(), key.to_string()))
        }
        _ => Err(format!("expected FEED=KEY, got '{}'", s)),
    }
}
