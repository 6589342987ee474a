use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ArgAction;

use crate::cli::orchestration::PipelineArgs;
use crate::params::{parse_api_key, BuildParameters};

#[derive(clap::Parser, Debug)]
#[command(
    name = "buildchain",
    version,
    about = "Build, test, package and publish a .NET library from a target graph"
)]
pub struct Args {
    #[arg(default_value = "Default", help = "Targets to run, with their dependencies")]
    pub targets: Vec<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long = "directory",
        default_value = ".",
        help = "Project root"
    )]
    pub root: PathBuf,

    #[arg(long, help = "Show available targets and exit")]
    pub list: bool,

    #[arg(long, help = "Print commands without running them")]
    pub dry_run: bool,

    #[arg(short, long, action = ArgAction::Count, help = "More log output (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(
        long = "set-version",
        env = "BUILD_VERSION",
        help = "Use this version instead of deriving it from tags"
    )]
    pub set_version: Option<String>,

    #[arg(long, env = "BUILD_FILE_VERSION", help = "File version override")]
    pub file_version: Option<String>,

    #[arg(long, env = "BUILD_PACKAGE_VERSION", help = "Package version override")]
    pub package_version: Option<String>,

    #[arg(long, env = "BUILD_NUMBER", default_value_t = 0, help = "Build counter")]
    pub build_number: u32,

    #[arg(long, env = "BUILD_PARALLEL_TESTS", help = "Let xUnit run test collections in parallel")]
    pub parallel_tests: bool,

    #[arg(long, env = "BUILD_MAX_THREADS", help = "xUnit worker thread limit")]
    pub max_threads: Option<u32>,

    #[arg(
        long = "api-key",
        value_name = "FEED=KEY",
        value_parser = parse_api_key,
        help = "API key for a feed (repeatable)"
    )]
    pub api_keys: Vec<(String, String)>,
}

impl Args {
    pub fn parameters(&self) -> BuildParameters {
        BuildParameters {
            version: self.set_version.clone(),
            file_version: self.file_version.clone(),
            package_version: self.package_version.clone(),
            build_number: self.build_number,
            parallel_tests: self.parallel_tests,
            max_threads: self.max_threads,
            api_keys: self.api_keys.iter().cloned().collect::<BTreeMap<_, _>>(),
            dry_run: self.dry_run,
        }
    }

    pub fn pipeline_args(&self) -> PipelineArgs {
        PipelineArgs {
            config_path: self.config.clone(),
            root: self.root.clone(),
            targets: self.targets.clone(),
            params: self.parameters(),
        }
    }
}
