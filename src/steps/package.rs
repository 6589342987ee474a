use std::fs;

use crate::error::{BuildError, Result};
use crate::runner::Invocation;
use crate::steps::BuildContext;

/// Packs every configured project at the resolved package version.
pub fn run(ctx: &mut BuildContext) -> Result<()> {
    let package = &ctx.config.package;
    if package.projects.is_empty() {
        return Err(BuildError::config("[package] lists no projects to pack"));
    }

    let output_dir = ctx.path(&package.output_dir);
    if !ctx.params.dry_run {
        fs::create_dir_all(&output_dir)?;
    }

    for project in &package.projects {
        let mut invocation = Invocation::new(&ctx.config.build.compiler)
            .arg("pack")
            .arg(project)
            .args(["-c", ctx.config.build.configuration.as_str(), "--no-build", "-o"])
            .arg(output_dir.to_string_lossy())
            .arg(format!("/p:PackageVersion={}", ctx.version.package_version));

        if package.symbols {
            invocation = invocation.args(["--include-symbols", "-p:SymbolPackageFormat=snupkg"]);
        }

        ctx.run(invocation)?;
    }

    Ok(())
}
