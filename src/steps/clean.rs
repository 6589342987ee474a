use std::fs;

use tracing::debug;

use crate::error::Result;
use crate::steps::BuildContext;
use crate::ui;

/// Removes the artifacts directory and everything under it.
pub fn run(ctx: &mut BuildContext) -> Result<()> {
    let dir = ctx.path(&ctx.config.build.artifacts_dir);

    if !dir.exists() {
        debug!(dir = %dir.display(), "nothing to clean");
        return Ok(());
    }

    if ctx.params.dry_run {
        ui::display_status(&format!("(dry run) would remove {}", dir.display()));
        return Ok(());
    }

    fs::remove_dir_all(&dir)?;
    ui::display_success(&format!("Removed {}", dir.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::params::BuildParameters;
    use crate::runner::RecordingRunner;
    use crate::version::resolve;
    use tempfile::TempDir;

    #[test]
    fn test_removes_artifacts_dir() {
        let dir = TempDir::new().unwrap();
        let artifacts = dir.path().join("artifacts/packages");
        fs::create_dir_all(&artifacts).unwrap();
        fs::write(artifacts.join("Old.1.0.0.nupkg"), b"x").unwrap();

        let config = Config::default();
        let params = BuildParameters::default();
        let version = resolve("v1.0.0-0-gabc", 0).unwrap();
        let runner = RecordingRunner::new();
        let mut ctx = BuildContext::new(dir.path(), &config, &params, &version, &runner);

        run(&mut ctx).unwrap();
        assert!(!dir.path().join("artifacts").exists());
    }

    #[test]
    fn test_missing_dir_is_fine() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let params = BuildParameters::default();
        let version = resolve("v1.0.0-0-gabc", 0).unwrap();
        let runner = RecordingRunner::new();
        let mut ctx = BuildContext::new(dir.path(), &config, &params, &version, &runner);

        assert!(run(&mut ctx).is_ok());
    }

    #[test]
    fn test_dry_run_keeps_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("artifacts")).unwrap();

        let config = Config::default();
        let params = BuildParameters {
            dry_run: true,
            ..Default::default()
        };
        let version = resolve("v1.0.0-0-gabc", 0).unwrap();
        let runner = RecordingRunner::new();
        let mut ctx = BuildContext::new(dir.path(), &config, &params, &version, &runner);

        run(&mut ctx).unwrap();
        assert!(dir.path().join("artifacts").exists());
    }
}
