// outline-cli/src/error.rs
//
// Result alias and the single-line error report printed by `main`.

use outline_core::{OutlineError, OutlineResult};
use std::error::Error;

pub type CliResult<T> = OutlineResult<T>;

/// The error message followed by any underlying causes not already part of it.
pub fn report(err: &OutlineError) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    message
}
