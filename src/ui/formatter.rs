//! Pure formatting functions for console output.
//!
//! Status lines go to stdout, errors and warnings to stderr. Diagnostic
//! detail belongs in `tracing` events, not here.

use std::time::Duration;

use console::style;

use crate::graph::{Target, TargetGraph};
use crate::runner::Invocation;
use crate::version::ResolvedVersion;
use crate::warnings::BuildWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_warning(warning: &BuildWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the version triple stamped on this build.
pub fn display_version(version: &ResolvedVersion) {
    println!("\n{}", style("Version").bold());
    println!("  Assembly: {}", style(&version.assembly_version).cyan());
    println!("  File:     {}", style(&version.file_version).cyan());
    println!("  Package:  {}", style(&version.package_version).green());
}

/// Display the ordered targets about to run.
pub fn display_plan(plan: &[&Target]) {
    let names: Vec<&str> = plan.iter().map(|t| t.name.as_str()).collect();
    println!("\n{} {}", style("Plan:").bold(), names.join(" → "));
}

/// Display every target with its dependencies (for `--list`).
pub fn display_targets(graph: &TargetGraph) {
    println!("{}", style("Targets:").bold());
    for target in graph.targets() {
        let deps = if target.depends_on.is_empty() {
            String::new()
        } else {
            format!(" ← {}", target.depends_on.join(", "))
        };
        println!(
            "  {:<16}{}{}",
            target.name,
            target.description,
            style(deps).dim()
        );
    }
}

pub fn display_target_header(target: &Target) {
    println!("\n{}", style(format!("── {} ──", target.name)).bold().cyan());
}

/// Echo an external command. Dry runs are marked as such.
pub fn display_command(invocation: &Invocation, dry_run: bool) {
    let prefix = if dry_run { "(dry run) $" } else { "$" };
    println!("  {} {}", style(prefix).dim(), invocation);
}

/// Display per-target timings after a successful run.
pub fn display_summary(timings: &[(String, Duration)], total: Duration) {
    println!("\n{}", style("Summary").bold());
    for (name, elapsed) in timings {
        println!("  {:<16}{:>10}", name, format_duration(*elapsed));
    }
    println!("  {:<16}{:>10}", "Total", format_duration(total));
}

/// `850ms`, `12.3s`, `2m05s`
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        let secs = d.as_secs();
        format!("{}m{:02}s", secs / 60, secs % 60)
    }
}
