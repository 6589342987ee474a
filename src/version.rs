//! Version resolution from `git describe` output.
//!
//! A describe string such as `v3.50.2-288-g64fd5c5b` is turned into the three
//! version strings stamped on build outputs: the assembly version, the file
//! version and the package version.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{BuildError, Result};

const DESCRIBE_PATTERN: &str =
    r"^v(\d+)\.(\d+)\.(\d+)(-[0-9A-Za-z]+)?-(\d+)-g([0-9A-Fa-f]+)$";

/// A tag description parsed from `vMAJOR.MINOR.PATCH[-PRERELEASE]-COMMITS-gSHA`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Pre-release suffix including its leading `-`, empty when absent
    pub prerelease: String,
    pub commits_since_tag: u32,
    /// Abbreviated commit hash. Informational only.
    pub commit_sha: String,
}

impl VersionTag {
    /// Parses a describe string.
    ///
    /// # Returns
    /// * `Ok(VersionTag)` - Parsed tag description
    /// * `Err(BuildError::Format)` - If the string does not match the describe grammar
    ///
    /// # Example
    /// ```
    /// use buildchain::version::VersionTag;
    ///
    /// let tag = VersionTag::parse("v3.50.1-rc1-35-gabc123").unwrap();
    /// assert_eq!(tag.prerelease, "-rc1");
    /// assert_eq!(tag.commits_since_tag, 35);
    /// ```
    pub fn parse(describe: &str) -> Result<Self> {
        let re = Regex::new(DESCRIBE_PATTERN).map_err(|e| BuildError::format(e.to_string()))?;
        let caps = re.captures(describe.trim()).ok_or_else(|| {
            BuildError::format(format!(
                "'{}' does not match vMAJOR.MINOR.PATCH[-PRERELEASE]-COMMITS-gSHA",
                describe
            ))
        })?;

        let number = |idx: usize| -> Result<u32> {
            caps[idx].parse::<u32>().map_err(|e| {
                BuildError::format(format!("'{}' in '{}': {}", &caps[idx], describe, e))
            })
        };

        Ok(VersionTag {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            prerelease: caps
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            commits_since_tag: number(5)?,
            commit_sha: caps[6].to_string(),
        })
    }

    /// `MAJOR.MINOR.PATCH.0`
    pub fn assembly_version(&self) -> String {
        format!("{}.{}.{}.0", self.major, self.minor, self.patch)
    }

    /// `MAJOR.MINOR.PATCH.BUILDNUMBER`
    pub fn file_version(&self, build_number: u32) -> String {
        format!(
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, build_number
        )
    }

    /// Computes the package version.
    ///
    /// NuGet doesn't fully support SemVer 2.0, so feeds compare package versions
    /// as plain strings. Commit counts are zero-padded to 4 digits so lexical
    /// order matches numeric order up to 9999 commits.
    ///
    /// - exact tag: `MAJOR.MINOR.PATCH<prerelease>`
    /// - commits past a release tag: `MAJOR.MINOR.(PATCH+1)-preNNNN`
    /// - commits past a pre-release tag: `MAJOR.MINOR.PATCH<prerelease>-buildNNNN`
    pub fn package_version(&self) -> Result<String> {
        if self.commits_since_tag == 0 {
            return Ok(format!(
                "{}.{}.{}{}",
                self.major, self.minor, self.patch, self.prerelease
            ));
        }

        if self.prerelease.is_empty() {
            let next_patch = self.patch.checked_add(1).ok_or_else(|| {
                BuildError::format(format!("patch {} cannot be incremented", self.patch))
            })?;
            Ok(format!(
                "{}.{}.{}-pre{:04}",
                self.major, self.minor, next_patch, self.commits_since_tag
            ))
        } else {
            Ok(format!(
                "{}.{}.{}{}-build{:04}",
                self.major, self.minor, self.patch, self.prerelease, self.commits_since_tag
            ))
        }
    }
}

impl FromStr for VersionTag {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        VersionTag::parse(s)
    }
}

/// The version triple stamped on every build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub assembly_version: String,
    pub file_version: String,
    pub package_version: String,
}

impl ResolvedVersion {
    /// Whether the package version carries a pre-release component.
    ///
    /// Versions that are not valid SemVer (possible with explicit overrides)
    /// fall back to looking for a `-` separator.
    pub fn is_prerelease(&self) -> bool {
        match semver::Version::parse(&self.package_version) {
            Ok(v) => !v.pre.is_empty(),
            Err(_) => self.package_version.contains('-'),
        }
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assembly {}, file {}, package {}",
            self.assembly_version, self.file_version, self.package_version
        )
    }
}

/// Where the version triple comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Derive from a describe string and an external build counter
    Describe { describe: String, build_number: u32 },
    /// Caller-supplied strings, used verbatim
    Explicit {
        version: String,
        file_version: Option<String>,
        package_version: Option<String>,
    },
}

impl VersionSource {
    pub fn resolve(&self) -> Result<ResolvedVersion> {
        match self {
            VersionSource::Describe {
                describe,
                build_number,
            } => resolve(describe, *build_number),
            VersionSource::Explicit {
                version,
                file_version,
                package_version,
            } => Ok(ResolvedVersion {
                assembly_version: version.clone(),
                file_version: file_version.clone().unwrap_or_else(|| version.clone()),
                package_version: package_version.clone().unwrap_or_else(|| version.clone()),
            }),
        }
    }
}

/// Resolves the version triple from a describe string.
///
/// # Example
/// ```
/// use buildchain::version::resolve;
///
/// let v = resolve("v3.50.2-288-g64fd5c5b", 7).unwrap();
/// assert_eq!(v.assembly_version, "3.50.2.0");
/// assert_eq!(v.file_version, "3.50.2.7");
/// assert_eq!(v.package_version, "3.50.3-pre0288");
/// ```
pub fn resolve(describe: &str, build_number: u32) -> Result<ResolvedVersion> {
    let tag = VersionTag::parse(describe)?;
    Ok(ResolvedVersion {
        assembly_version: tag.assembly_version(),
        file_version: tag.file_version(build_number),
        package_version: tag.package_version()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_tag() {
        let tag = VersionTag::parse("v3.50.2-288-g64fd5c5b").unwrap();
        assert_eq!(tag.major, 3);
        assert_eq!(tag.minor, 50);
        assert_eq!(tag.patch, 2);
        assert_eq!(tag.prerelease, "");
        assert_eq!(tag.commits_since_tag, 288);
        assert_eq!(tag.commit_sha, "64fd5c5b");
    }

    #[test]
    fn test_parse_prerelease_tag() {
        let tag: VersionTag = "v1.0.0-alpha1-4-gdeadbee".parse().unwrap();
        assert_eq!(tag.prerelease, "-alpha1");
        assert_eq!(tag.commits_since_tag, 4);
        assert_eq!(tag.commit_sha, "deadbee");
    }

    #[test]
    fn test_parse_trims_trailing_newline() {
        assert!(VersionTag::parse("v1.2.3-0-gabcdef0\n").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "v3.50.2-288",
            "3.50.2-288-g64fd5c5b",
            "v3.50-288-g64fd5c5b",
            "v3.50.2-rc.1-3-gabc",
            "v3.50.2-288-gxyz",
            "",
        ] {
            let err = VersionTag::parse(bad).unwrap_err();
            assert!(
                matches!(err, BuildError::Format(_)),
                "expected format error for '{}'",
                bad
            );
        }
    }

    #[test]
    fn test_file_version_uses_build_number() {
        let tag = VersionTag::parse("v2.1.0-0-gabc1234").unwrap();
        assert_eq!(tag.file_version(0), "2.1.0.0");
        assert_eq!(tag.file_version(1234), "2.1.0.1234");
    }

    #[test]
    fn test_exact_prerelease_tag_keeps_suffix() {
        let v = resolve("v2.0.0-beta2-0-gabc1234", 0).unwrap();
        assert_eq!(v.package_version, "2.0.0-beta2");
    }

    #[test]
    fn test_patch_overflow_is_format_error() {
        let describe = format!("v1.0.{}-1-gabc", u32::MAX);
        assert!(matches!(
            resolve(&describe, 0),
            Err(BuildError::Format(_))
        ));
    }

    #[test]
    fn test_explicit_source_passes_through() {
        let source = VersionSource::Explicit {
            version: "not even a version".to_string(),
            file_version: None,
            package_version: Some("9.9.9-local".to_string()),
        };
        let v = source.resolve().unwrap();
        assert_eq!(v.assembly_version, "not even a version");
        assert_eq!(v.file_version, "not even a version");
        assert_eq!(v.package_version, "9.9.9-local");
    }

    #[test]
    fn test_is_prerelease() {
        assert!(resolve("v1.2.3-5-gabc", 0).unwrap().is_prerelease());
        assert!(resolve("v1.2.3-rc1-0-gabc", 0).unwrap().is_prerelease());
        assert!(!resolve("v1.2.3-0-gabc", 0).unwrap().is_prerelease());
    }
}
