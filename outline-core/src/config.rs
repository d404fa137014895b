//! Configuration structures and constants for the outline-core library.
//!
//! Every knob has a compile-time default; the CLI never changes them, but
//! library consumers and tests can through [`ParserConfigBuilder`].

use std::time::Duration;

// Default constants

/// Title used when the outline has no level-1 heading.
pub const DEFAULT_TITLE: &str = "Tutorial";

/// Assumed narration speaking rate.
pub const WORDS_PER_SECOND: f64 = 4.0;

/// Word budget for chapters without a positive duration.
pub const FALLBACK_MAX_WORDS: u64 = 100;

/// Asset file name suffix that triggers duration probing.
pub const PROBE_EXTENSION: &str = ".mp4";

/// Media inspection binary looked up on `PATH`.
pub const DEFAULT_FFPROBE_PROGRAM: &str = "ffprobe";

/// Main configuration structure for outline parsing.
///
/// # Examples
///
/// ```rust
/// use outline_core::config::ParserConfigBuilder;
/// use std::time::Duration;
///
/// let config = ParserConfigBuilder::new()
///     .default_title("Untitled")
///     .probe_timeout(Duration::from_secs(10))
///     .build();
/// assert_eq!(config.default_title, "Untitled");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Title used when no `# ` heading exists
    pub default_title: String,

    /// Speaking rate used to turn seconds into a word budget
    pub words_per_second: f64,

    /// Word budget when a chapter's duration is zero
    pub fallback_max_words: u64,

    /// Only assets whose file name ends with this suffix are probed
    pub probe_extension: String,

    /// Program invoked to read container durations
    pub ffprobe_program: String,

    /// Optional upper bound on a single probe; expiry yields a zero duration
    pub probe_timeout: Option<Duration>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            words_per_second: WORDS_PER_SECOND,
            fallback_max_words: FALLBACK_MAX_WORDS,
            probe_extension: PROBE_EXTENSION.to_string(),
            ffprobe_program: DEFAULT_FFPROBE_PROGRAM.to_string(),
            probe_timeout: None,
        }
    }
}

impl ParserConfig {
    /// Narration word budget for a chapter of the given length.
    pub fn max_words(&self, duration: f64) -> u64 {
        if duration > 0.0 {
            (duration * self.words_per_second).floor() as u64
        } else {
            self.fallback_max_words
        }
    }
}

/// Builder for creating [`ParserConfig`] instances.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_title(mut self, title: impl Into<String>) -> Self {
        self.config.default_title = title.into();
        self
    }

    pub fn words_per_second(mut self, rate: f64) -> Self {
        self.config.words_per_second = rate;
        self
    }

    pub fn fallback_max_words(mut self, words: u64) -> Self {
        self.config.fallback_max_words = words;
        self
    }

    pub fn probe_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.probe_extension = extension.into();
        self
    }

    pub fn ffprobe_program(mut self, program: impl Into<String>) -> Self {
        self.config.ffprobe_program = program.into();
        self
    }

    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> ParserConfig {
        self.config
    }
}
