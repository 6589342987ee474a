//! Target actions
//!
//! Each action reads the shared [BuildContext] and hands external commands
//! to its [CommandRunner]. Actions never retry; the first error ends the
//! build.

pub mod artifacts;
pub mod clean;
pub mod compile;
pub mod package;
pub mod publish;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{BuildError, Result};
use crate::graph::Action;
use crate::params::BuildParameters;
use crate::runner::{CommandRunner, Invocation};
use crate::ui;
use crate::version::ResolvedVersion;
use crate::warnings::BuildWarning;

/// Everything a step may read, plus the warnings it raises.
pub struct BuildContext<'a> {
    pub root: PathBuf,
    pub config: &'a Config,
    pub params: &'a BuildParameters,
    pub version: &'a ResolvedVersion,
    pub runner: &'a dyn CommandRunner,
    pub warnings: Vec<BuildWarning>,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        config: &'a Config,
        params: &'a BuildParameters,
        version: &'a ResolvedVersion,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        BuildContext {
            root: root.into(),
            config,
            params,
            version,
            runner,
            warnings: Vec::new(),
        }
    }

    /// Resolves a configured path against the project root.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Shows the command and runs it.
    pub fn run(&self, invocation: Invocation) -> Result<()> {
        if !self.params.dry_run {
            ui::display_command(&invocation, false);
        }
        self.runner.run(&invocation)
    }

    pub fn warn(&mut self, warning: BuildWarning) {
        warn!("{}", warning);
        ui::display_warning(&warning);
        self.warnings.push(warning);
    }
}

/// Runs one target's action.
pub fn run_action(action: &Action, ctx: &mut BuildContext) -> Result<()> {
    match action {
        Action::Clean => clean::run(ctx),
        Action::Version => {
            info!(
                assembly = %ctx.version.assembly_version,
                file = %ctx.version.file_version,
                package = %ctx.version.package_version,
                "version resolved"
            );
            ui::display_version(ctx.version);
            Ok(())
        }
        Action::Compile => compile::run(ctx),
        Action::Test => test::run(ctx),
        Action::CopyArtifacts => artifacts::run(ctx),
        Action::Pack => package::run(ctx),
        Action::Publish => publish::run(ctx),
        Action::Command(argv) => {
            let (program, args) = argv
                .split_first()
                .ok_or_else(|| BuildError::step("custom target has an empty command"))?;
            ctx.run(Invocation::new(program).args(args.iter().cloned()))
        }
        Action::Group => Ok(()),
    }
}
