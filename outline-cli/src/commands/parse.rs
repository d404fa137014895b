// outline-cli/src/commands/parse.rs
//
// Parses the outline and prints it as pretty JSON on stdout.

use crate::cli::Cli;
use crate::error::CliResult;
use outline_core::{OutlineDocument, OutlineError, parse_outline};
use std::io::{self, Write};

/// Runs the extractor for the given arguments.
///
/// Nothing is written to stdout unless the whole outline was parsed and
/// serialized successfully.
pub fn run_parse(cli: &Cli) -> CliResult<()> {
    if !cli.extra.is_empty() {
        log::debug!("Ignoring {} extra argument(s)", cli.extra.len());
    }

    let outline = parse_outline(&cli.outline, &cli.assets_dir)?;
    log::info!(
        "'{}': {} chapters, {}s total",
        outline.title,
        outline.chapters.len(),
        outline.total_duration
    );

    let json = render_json(&outline)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
        .and_then(|_| stdout.flush())
        .map_err(|source| OutlineError::WriteOutput { source })
}

/// Pretty JSON with two-space indentation and literal non-ASCII text.
pub fn render_json(outline: &OutlineDocument) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(outline)?)
}
