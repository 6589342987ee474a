//! User interface module - console output for the build.
//!
//! Everything printed to the user goes through [formatter]; diagnostics go
//! through `tracing` instead.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_command, display_error, display_plan, display_status, display_success,
    display_summary, display_target_header, display_targets, display_version, display_warning,
};
