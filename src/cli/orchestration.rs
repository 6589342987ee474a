//! Main workflow orchestration logic
//!
//! Resolves the version once, plans the requested targets and runs them in
//! order. The first failing target ends the run; nothing after it executes.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{error, info, info_span};

use crate::config::{load_config, Config, VersionSection, CONFIG_FILE_NAME};
use crate::error::{BuildError, Result};
use crate::git::{Git2Repository, Repository};
use crate::graph::TargetGraph;
use crate::params::BuildParameters;
use crate::runner::{CommandRunner, DryRunRunner, ProcessRunner};
use crate::steps::{self, BuildContext};
use crate::ui;
use crate::version::ResolvedVersion;
use crate::warnings::BuildWarning;

/// Arguments for the pipeline
///
/// Mirrors the CLI Args but without depending on clap, so the pipeline can
/// be driven programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineArgs {
    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Project root; relative config paths resolve against it
    pub root: PathBuf,

    /// Requested targets
    pub targets: Vec<String>,

    pub params: BuildParameters,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub version: ResolvedVersion,

    /// Targets in execution order with their wall-clock time
    pub executed: Vec<(String, Duration)>,

    pub warnings: Vec<BuildWarning>,

    pub total: Duration,
}

impl PipelineReport {
    pub fn executed_names(&self) -> Vec<&str> {
        self.executed.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// Loads `--config`, else `<root>/buildchain.toml`, else the usual lookup.
pub fn load_project_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    match config_path {
        Some(path) => load_config(Some(path)),
        None => {
            let candidate = root.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                load_config(Some(&candidate))
            } else {
                load_config(None)
            }
        }
    }
}

/// Absolute form of the project root.
///
/// Steps join configured paths onto the root and hand them to tools that run
/// inside the root, so a relative root would be applied twice.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    root.canonicalize().map_err(|e| {
        BuildError::config(format!("project root {} is not usable: {}", root.display(), e))
    })
}

/// Describes HEAD and drops the text in front of the tag's `v`, so
/// `release/v1.2.3-4-gabc` becomes `v1.2.3-4-gabc`.
pub fn describe_head<R>(repo: &R, version: &VersionSection) -> Result<String>
where
    R: Repository + ?Sized,
{
    let prefix = version.tag_prefix().ok_or_else(|| {
        BuildError::config(format!(
            "tag_pattern '{}' does not end its literal part with 'v'",
            version.tag_pattern
        ))
    })?;
    let describe = repo.describe(&version.tag_pattern)?;
    match describe.strip_prefix(prefix) {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(describe),
    }
}

/// Runs the pipeline against the real repository and real tools.
pub fn run_pipeline(args: PipelineArgs) -> Result<PipelineReport> {
    let root = resolve_root(&args.root)?;
    let config = load_project_config(args.config_path.as_deref(), &root)?;
    let graph = TargetGraph::from_config(&config)?;

    let runner: Box<dyn CommandRunner> = if args.params.dry_run {
        Box::new(DryRunRunner)
    } else {
        Box::new(ProcessRunner::new(&root))
    };

    let version_section = config.version.clone();
    let repo_root = root.clone();
    let describe = move || -> Result<String> {
        let repo = Git2Repository::open(&repo_root)?;
        info!(head = %repo.head_short_id()?, pattern = %version_section.tag_pattern, "describing HEAD");
        describe_head(&repo, &version_section)
    };

    execute(
        &graph,
        &args.targets,
        &config,
        &args.params,
        &root,
        describe,
        runner.as_ref(),
    )
}

/// Plans `targets`, resolves the version and runs every planned target.
///
/// `describe` is only called when no explicit version is set.
pub fn execute<F>(
    graph: &TargetGraph,
    targets: &[String],
    config: &Config,
    params: &BuildParameters,
    root: &Path,
    describe: F,
    runner: &dyn CommandRunner,
) -> Result<PipelineReport>
where
    F: FnOnce() -> Result<String>,
{
    let plan = graph.plan(targets)?;

    let version = params.version_source(describe)?.resolve()?;
    info!(
        assembly = %version.assembly_version,
        file = %version.file_version,
        package = %version.package_version,
        "resolved version"
    );
    ui::display_plan(&plan);

    let started = Instant::now();
    let mut executed = Vec::with_capacity(plan.len());
    let mut ctx = BuildContext::new(root, config, params, &version, runner);

    for target in plan {
        let span = info_span!("target", name = %target.name);
        let _enter = span.enter();

        ui::display_target_header(target);
        let target_started = Instant::now();
        if let Err(e) = steps::run_action(&target.action, &mut ctx) {
            error!(error = %e, "target failed");
            ui::display_error(&format!("Target '{}' failed", target.name));
            return Err(e);
        }
        executed.push((target.name.clone(), target_started.elapsed()));
    }

    let warnings = ctx.warnings;
    Ok(PipelineReport {
        version,
        executed,
        warnings,
        total: started.elapsed(),
    })
}
