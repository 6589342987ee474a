use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::runner::Invocation;
use crate::steps::BuildContext;
use crate::ui;
use crate::warnings::BuildWarning;

/// Pushes this build's packages to every configured feed.
///
/// Feeds without an API key, or that refuse pre-release versions, are skipped
/// with a warning. A failed push stops the build.
pub fn run(ctx: &mut BuildContext) -> Result<()> {
    let version = ctx.version.package_version.clone();
    let output_dir = ctx.path(&ctx.config.package.output_dir);

    let packages = if ctx.params.dry_run && !output_dir.exists() {
        // Pack did not write anything in a dry run; show the expected names instead
        expected_packages(ctx, &output_dir)
    } else {
        find_packages(&output_dir, &version)?
    };

    if packages.is_empty() {
        ctx.warn(BuildWarning::NoPackagesFound {
            dir: output_dir,
            version,
        });
        return Ok(());
    }

    let feeds = ctx.config.feeds.clone();
    for feed in &feeds {
        if ctx.version.is_prerelease() && !feed.allow_prerelease {
            ctx.warn(BuildWarning::PrereleaseRejected {
                feed: feed.name.clone(),
                version: version.clone(),
            });
            continue;
        }

        let Some(api_key) = ctx.params.api_key_for(feed) else {
            ctx.warn(BuildWarning::MissingApiKey {
                feed: feed.name.clone(),
                env_var: feed.api_key_env.clone(),
            });
            continue;
        };

        for package in &packages {
            info!(feed = %feed.name, package = %package.display(), "publishing");
            let invocation = Invocation::new(&ctx.config.build.compiler)
                .args(["nuget", "push"])
                .arg(package.to_string_lossy())
                .args(["--source", feed.url.as_str(), "--api-key"])
                .secret_arg(api_key.clone());
            ctx.run(invocation)?;
        }

        ui::display_success(&format!("Published {} to {}", version, feed.name));
    }

    Ok(())
}

/// `*.{version}.nupkg` files in `dir`, sorted by name.
///
/// Symbol packages (`.snupkg`) are pushed by the tool alongside their
/// `.nupkg`, so they are not listed. Packages from other versions left in the
/// directory are ignored.
pub fn find_packages(dir: &Path, version: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let suffix = format!(".{}.nupkg", version);
    let mut packages = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(&suffix))
            .unwrap_or(false);
        if matches && path.is_file() {
            packages.push(path);
        }
    }

    packages.sort();
    Ok(packages)
}

fn expected_packages(ctx: &BuildContext, output_dir: &Path) -> Vec<PathBuf> {
    ctx.config
        .package
        .projects
        .iter()
        .filter_map(|project| Path::new(project).file_stem())
        .map(|stem| {
            output_dir.join(format!(
                "{}.{}.nupkg",
                stem.to_string_lossy(),
                ctx.version.package_version
            ))
        })
        .collect()
}
