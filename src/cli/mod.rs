//! Command-line surface: argument parsing and the pipeline driver.

pub mod args;
pub mod orchestration;

pub use args::Args;
pub use orchestration::{run_pipeline, PipelineArgs, PipelineReport};
