// outline-cli/src/commands/mod.rs
//
// Command implementations for the outline CLI.

pub mod parse;

pub use parse::run_parse;
