use std::fmt;
use std::path::PathBuf;

/// Conditions that skip part of a step without failing the build.
/// These are reported to the user and collected in the pipeline report.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildWarning {
    /// No API key was supplied for a feed, so it was not published to
    MissingApiKey {
        feed: String,
        env_var: Option<String>,
    },
    /// Feed only accepts release versions
    PrereleaseRejected { feed: String, version: String },
    /// Publish found nothing to push
    NoPackagesFound { dir: PathBuf, version: String },
    /// Test runner has no assemblies or projects configured
    NoTestInputs { runner: String },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::MissingApiKey { feed, env_var } => match env_var {
                Some(var) => write!(
                    f,
                    "No API key for feed '{}' (set {} or pass --api-key {}=KEY); skipping",
                    feed, var, feed
                ),
                None => write!(
                    f,
                    "No API key for feed '{}' (pass --api-key {}=KEY); skipping",
                    feed, feed
                ),
            },
            BuildWarning::PrereleaseRejected { feed, version } => write!(
                f,
                "Feed '{}' does not accept pre-release version {}; skipping",
                feed, version
            ),
            BuildWarning::NoPackagesFound { dir, version } => write!(
                f,
                "No packages for version {} in {}",
                version,
                dir.display()
            ),
            BuildWarning::NoTestInputs { runner } => {
                write!(f, "Test runner '{}' has no inputs configured; skipping", runner)
            }
        }
    }
}
