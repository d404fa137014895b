// outline-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "parse-outline",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Extract tutorial chapters from an outline as JSON",
    long_about = "Reads a markdown tutorial outline and prints its title, audience and \
                  chapters (with asset durations and narration word budgets) as JSON."
)]
pub struct Cli {
    /// Markdown outline describing the tutorial
    #[arg(value_name = "OUTLINE", allow_hyphen_values = true)]
    pub outline: PathBuf,

    /// Directory that chapter asset names are resolved against
    #[arg(value_name = "ASSETS_DIR", allow_hyphen_values = true)]
    pub assets_dir: PathBuf,

    // Trailing positionals are tolerated and ignored.
    #[arg(hide = true, num_args = 0.., allow_hyphen_values = true)]
    pub extra: Vec<OsString>,
}
