use anyhow::Result;
use clap::Parser;

use buildchain::cli::orchestration::{load_project_config, run_pipeline};
use buildchain::cli::Args;
use buildchain::graph::TargetGraph;
use buildchain::logging::{self, LoggingConfig};
use buildchain::ui;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(LoggingConfig::from_verbosity(args.verbose));

    if args.list {
        let config = match load_project_config(args.config.as_deref(), &args.root) {
            Ok(cfg) => cfg,
            Err(e) => {
                ui::display_error(&format!("Error loading config: {}", e));
                std::process::exit(1);
            }
        };
        let graph = TargetGraph::from_config(&config)?;
        ui::display_targets(&graph);
        return Ok(());
    }

    match run_pipeline(args.pipeline_args()) {
        Ok(report) => {
            ui::display_summary(&report.executed, report.total);
            if !report.warnings.is_empty() {
                ui::display_status(&format!(
                    "Finished with {} warning(s)",
                    report.warnings.len()
                ));
            }
            ui::display_success(&format!(
                "Built {} ({})",
                report.version.package_version,
                report.executed_names().join(", ")
            ));
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
