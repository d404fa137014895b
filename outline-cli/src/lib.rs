// outline-cli/src/lib.rs
//
// Library portion of the outline CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::parse::{render_json, run_parse};
pub use error::{CliResult, report};
