use std::fs;

use tracing::debug;

use crate::error::{BuildError, Result};
use crate::steps::BuildContext;
use crate::ui;

/// Copies build outputs into the release layout.
///
/// Every listed file must exist; a missing output means the build did not
/// produce what the release expects. A dry run only reports the planned copies.
pub fn run(ctx: &mut BuildContext) -> Result<()> {
    let release_dir = ctx.path(&ctx.config.build.release_dir);
    let dry_run = ctx.params.dry_run;
    let mut copied = 0usize;

    for rule in &ctx.config.copy {
        let source_dir = ctx.path(&rule.from);
        let dest_dir = release_dir.join(&rule.to);

        for file in &rule.files {
            let source = source_dir.join(file);
            let dest = dest_dir.join(file);

            // Build has not produced anything in a dry run
            if dry_run {
                ui::display_status(&format!(
                    "(dry run) would copy {} to {}",
                    source.display(),
                    dest.display()
                ));
                copied += 1;
                continue;
            }

            if !source.is_file() {
                return Err(BuildError::step(format!(
                    "build output {} does not exist",
                    source.display()
                )));
            }

            debug!(from = %source.display(), to = %dest.display(), "copy");
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&source, &dest)?;
            copied += 1;
        }
    }

    if dry_run {
        ui::display_status(&format!(
            "(dry run) {} file(s) planned for {}",
            copied,
            release_dir.display()
        ));
    } else {
        ui::display_success(&format!(
            "Copied {} file(s) into {}",
            copied,
            release_dir.display()
        ));
    }
    Ok(())
}
