//! Structured logging setup
//!
//! Diagnostics go through `tracing` to stderr so they never interleave with
//! the status lines printed by [crate::ui]. The level comes from `-v` flags or
//! `BUILDCHAIN_LOG`. A non-empty `RUST_LOG` replaces that filter entirely.

use std::env;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Environment variable selecting the log level when no `-v` flag is given
pub const LOG_LEVEL_ENV: &str = "BUILDCHAIN_LOG";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for buildchain's own events
    pub level: Level,

    /// Include the module target (e.g., buildchain::steps) in logs
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    /// Maps a `-v` count to a level: none → `BUILDCHAIN_LOG` or WARN, 1 → INFO,
    /// 2 → DEBUG, 3+ → TRACE. Targets are shown from DEBUG on.
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => env::var(LOG_LEVEL_ENV)
                .map(|s| parse_level(&s))
                .unwrap_or(Level::WARN),
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            include_target: level >= Level::DEBUG,
        }
    }
}

/// Parses a log level from a string, case-insensitive.
///
/// Unknown values fall back to `Level::WARN`.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Filter directives: `RUST_LOG` when set and non-empty, else buildchain's
/// own events at `level`.
fn filter_directives(level: Level, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => format!("buildchain={}", level),
    }
}

/// Initializes the `tracing` subscriber. Subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
        let directives = filter_directives(config.level, rust_log.as_deref());
        let filter = EnvFilter::try_new(&directives)
            .unwrap_or_else(|_| EnvFilter::new(format!("buildchain={}", config.level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(config.include_target),
            )
            .init();
    });
}
