// outline-cli/src/main.rs
//
// Entry point for the `parse-outline` binary.
//
// Responsibilities include:
// - Parsing the two positional arguments (clap prints usage and exits
//   non-zero when either is missing).
// - Setting up stderr logging.
// - Running the extractor and mapping failures to exit status 1 without
//   printing any JSON.

use clap::Parser;
use outline_cli::{Cli, logging, report, run_parse};
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init();

    log::debug!(
        "parse-outline v{}: outline={}, assets={}",
        env!("CARGO_PKG_VERSION"),
        cli.outline.display(),
        cli.assets_dir.display()
    );

    if let Err(e) = run_parse(&cli) {
        eprintln!("Error: {}", report(&e));
        process::exit(1);
    }
}
