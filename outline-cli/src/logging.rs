// ============================================================================
// outline-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the CLI
//
// Logs go to stderr so stdout carries nothing but the JSON document.
// The filter defaults to `warn` and follows RUST_LOG when set:
// - RUST_LOG=info: outline summary
// - RUST_LOG=debug: file reads, ffprobe invocations and absorbed probe failures

use console::style;
use env_logger::{Builder, Env, Target};
use log::Level;
use std::io::Write;

/// Filter used when RUST_LOG is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the global logger. Call once, at startup.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .target(Target::Stderr)
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => style("ERROR").red().bold(),
                Level::Warn => style("WARN ").yellow(),
                Level::Info => style("INFO ").green(),
                Level::Debug => style("DEBUG").blue(),
                Level::Trace => style("TRACE").magenta(),
            };
            writeln!(buf, "{} {}", level.for_stderr(), record.args())
        })
        .init();
}
