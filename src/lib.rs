pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod graph;
pub mod logging;
pub mod params;
pub mod runner;
pub mod steps;
pub mod ui;
pub mod version;
pub mod warnings;

pub use error::{BuildError, Result};
