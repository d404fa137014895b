//! Core library for extracting chapter metadata from tutorial outlines.
//!
//! This crate reads a markdown outline (title, target audience and a list of
//! `### NN_slug` chapters), resolves each chapter's asset duration either from
//! an explicit `(Ns)` hint or by probing the video with ffprobe, and derives a
//! narration word budget per chapter.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use outline_core::parse_outline;
//!
//! let outline = parse_outline("outline.md", "assets").unwrap();
//! for chapter in &outline.chapters {
//!     println!("{}: {} words", chapter.name, chapter.max_words);
//! }
//! println!("{}", serde_json::to_string_pretty(&outline).unwrap());
//! ```

pub mod annotation;
pub mod config;
pub mod error;
pub mod outline;
pub mod probe;

// Re-exports for public API
pub use annotation::{AnnotationCue, CueKind, parse_annotation};
pub use config::{ParserConfig, ParserConfigBuilder};
pub use error::{OutlineError, OutlineResult};
pub use outline::{
    Chapter, OutlineDocument, parse_outline, parse_outline_str, parse_outline_with,
};
pub use probe::{DurationProber, FfprobeProber, ProbeError, probe_duration};
