use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "buildchain.toml";

/// Represents the complete configuration for a buildchain run.
///
/// Everything here is static data: where the solution lives, which tools to
/// call, which files make up a release and where packages are published.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub version: VersionSection,

    #[serde(default = "default_test_runners")]
    pub tests: Vec<TestRunnerConfig>,

    #[serde(default)]
    pub copy: Vec<CopyRule>,

    #[serde(default)]
    pub package: PackageSection,

    #[serde(default)]
    pub feeds: Vec<FeedConfig>,

    #[serde(default)]
    pub targets: Vec<CustomTarget>,
}

/// Compiler invocation and output layout.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildSection {
    #[serde(default = "default_solution")]
    pub solution: String,

    #[serde(default = "default_configuration")]
    pub configuration: String,

    /// Program used for build, pack and nuget push
    #[serde(default = "default_compiler")]
    pub compiler: String,

    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    #[serde(default = "default_release_dir")]
    pub release_dir: PathBuf,

    /// Extra MSBuild properties passed as `/p:KEY=VALUE`
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

fn default_solution() -> String {
    "Library.sln".to_string()
}

fn default_configuration() -> String {
    "Release".to_string()
}

fn default_compiler() -> String {
    "dotnet".to_string()
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_release_dir() -> PathBuf {
    PathBuf::from("artifacts/release")
}

impl Default for BuildSection {
    fn default() -> Self {
        BuildSection {
            solution: default_solution(),
            configuration: default_configuration(),
            compiler: default_compiler(),
            artifacts_dir: default_artifacts_dir(),
            release_dir: default_release_dir(),
            properties: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionSection {
    /// Glob passed to `git describe --match`
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,
}

fn default_tag_pattern() -> String {
    "v*".to_string()
}

impl VersionSection {
    /// Text that `git describe` puts in front of the `v` of a matching tag.
    ///
    /// The pattern's literal head (everything before the first `*`, `?` or
    /// `[`) must end in `v`: `v*` gives `""`, `release/v*` gives `"release/"`.
    /// Returns `None` for patterns that do not pin the `v`.
    pub fn tag_prefix(&self) -> Option<&str> {
        let literal = match self.tag_pattern.find(|c: char| matches!(c, '*' | '?' | '[')) {
            Some(idx) => &self.tag_pattern[..idx],
            None => self.tag_pattern.as_str(),
        };
        literal.strip_suffix('v')
    }
}

impl Default for VersionSection {
    fn default() -> Self {
        VersionSection {
            tag_pattern: default_tag_pattern(),
        }
    }
}

/// Test runner flavours. Each writes one machine-readable result file.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestRunnerKind {
    /// xUnit console runner, XML v2 results
    Xunit,
    /// NUnit 3 console runner, NUnit XML results
    Nunit,
    /// `dotnet test`, TRX results
    Dotnet,
}

impl TestRunnerKind {
    pub fn name(&self) -> &'static str {
        match self {
            TestRunnerKind::Xunit => "xunit",
            TestRunnerKind::Nunit => "nunit",
            TestRunnerKind::Dotnet => "dotnet",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TestRunnerConfig {
    pub name: String,
    pub kind: TestRunnerKind,
    pub program: String,
    /// Test assemblies (xunit, nunit) or projects (dotnet)
    #[serde(default)]
    pub inputs: Vec<String>,
    pub results: PathBuf,
}

fn default_test_runners() -> Vec<TestRunnerConfig> {
    vec![
        TestRunnerConfig {
            name: "unit".to_string(),
            kind: TestRunnerKind::Xunit,
            program: "xunit.console".to_string(),
            inputs: Vec::new(),
            results: PathBuf::from("artifacts/test-results/xunit.xml"),
        },
        TestRunnerConfig {
            name: "integration".to_string(),
            kind: TestRunnerKind::Nunit,
            program: "nunit3-console".to_string(),
            inputs: Vec::new(),
            results: PathBuf::from("artifacts/test-results/nunit.xml"),
        },
    ]
}

/// Files copied from a build output directory into the release layout.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CopyRule {
    pub from: PathBuf,
    /// Destination relative to `build.release_dir`
    #[serde(default)]
    pub to: PathBuf,
    pub files: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageSection {
    #[serde(default)]
    pub projects: Vec<String>,

    #[serde(default = "default_package_dir")]
    pub output_dir: PathBuf,

    /// Emit `.snupkg` symbol packages next to the `.nupkg`
    #[serde(default = "default_true")]
    pub symbols: bool,
}

fn default_package_dir() -> PathBuf {
    PathBuf::from("artifacts/packages")
}

fn default_true() -> bool {
    true
}

impl Default for PackageSection {
    fn default() -> Self {
        PackageSection {
            projects: Vec::new(),
            output_dir: default_package_dir(),
            symbols: true,
        }
    }
}

/// A remote package feed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_true")]
    pub allow_prerelease: bool,
}

/// A user-defined target running an arbitrary command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CustomTarget {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub command: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            build: BuildSection::default(),
            version: VersionSection::default(),
            tests: default_test_runners(),
            copy: Vec::new(),
            package: PackageSection::default(),
            feeds: Vec::new(),
            targets: Vec::new(),
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| BuildError::config(e.to_string()))
    }

    /// Checks references the TOML grammar cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.version.tag_prefix().is_none() {
            return Err(BuildError::config(format!(
                "tag_pattern '{}' must put a literal 'v' right before the version, e.g. 'v*' or 'release/v*'",
                self.version.tag_pattern
            )));
        }

        for target in &self.targets {
            if target.command.is_empty() {
                return Err(BuildError::config(format!(
                    "target '{}' has an empty command",
                    target.name
                )));
            }
        }

        for feed in &self.feeds {
            if feed.url.trim().is_empty() {
                return Err(BuildError::config(format!(
                    "feed '{}' has no url",
                    feed.name
                )));
            }
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `buildchain.toml` in current directory
/// 3. `buildchain.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            BuildError::config(format!("cannot read {}: {}", path.display(), e))
        })?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config = Config::from_toml(&config_str)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_two_result_files() {
        let config = Config::default();
        let results: Vec<_> = config.tests.iter().map(|t| t.results.clone()).collect();
        assert_eq!(
            results,
            vec![
                PathBuf::from("artifacts/test-results/xunit.xml"),
                PathBuf::from("artifacts/test-results/nunit.xml"),
            ]
        );
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_runner_kind_lowercase() {
        let config = Config::from_toml(
            r#"
[[tests]]
name = "smoke"
kind = "dotnet"
program = "dotnet"
inputs = ["tests/Smoke/Smoke.csproj"]
results = "artifacts/test-results/smoke.trx"
"#,
        )
        .unwrap();
        assert_eq!(config.tests.len(), 1);
        assert_eq!(config.tests[0].kind, TestRunnerKind::Dotnet);
    }

    #[test]
    fn test_unknown_runner_kind_rejected() {
        let err = Config::from_toml(
            r#"
[[tests]]
name = "x"
kind = "mstest"
program = "vstest"
results = "r.xml"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }

    #[test]
    fn test_validate_empty_command() {
        let mut config = Config::default();
        config.targets.push(CustomTarget {
            name: "Docs".to_string(),
            description: String::new(),
            command: Vec::new(),
            depends_on: Vec::new(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_feed_defaults() {
        let config = Config::from_toml(
            r#"
[[feeds]]
name = "nuget"
url = "https://api.nuget.org/v3/index.json"
"#,
        )
        .unwrap();
        assert!(config.feeds[0].allow_prerelease);
        assert_eq!(config.feeds[0].api_key_env, None);
    }

    #[test]
    fn test_tag_prefix() {
        let section = |pattern: &str| VersionSection {
            tag_pattern: pattern.to_string(),
        };
        assert_eq!(section("v*").tag_prefix(), Some(""));
        assert_eq!(section("release/v*").tag_prefix(), Some("release/"));
        assert_eq!(section("lib-v[0-9]*").tag_prefix(), Some("lib-"));
        assert_eq!(section("release/*").tag_prefix(), None);
        assert_eq!(section("*").tag_prefix(), None);
    }

    #[test]
    fn test_validate_rejects_pattern_without_v() {
        let config = Config::from_toml("[version]\ntag_pattern = \"release-*\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("release-*"));
    }
}
