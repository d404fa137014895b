//! Outline document parsing.
//!
//! An outline is a markdown file with a fixed shape: a `# Title`, an optional
//! `## Target Audience` section and a run of `### NN_slug` chapters, each with
//! `- Asset:`, `- Points:` and `- Annotations:` fields. Extraction is
//! best-effort pattern matching; anything missing resolves to a default.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::annotation::{AnnotationCue, parse_annotation};
use crate::config::ParserConfig;
use crate::error::{OutlineError, OutlineResult};
use crate::probe::{DurationProber, FfprobeProber};

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+?)\r?$").unwrap());
static AUDIENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)## Target Audience\r?$").unwrap());
static CHAPTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (\d+_\w+)\r?$").unwrap());
static ASSET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"- Asset: ([^\n]+)").unwrap());
static DURATION_HINT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+)s\)").unwrap());
static POINTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"- Points:\r?\n").unwrap());
static ANNOTATIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"- Annotations:\r?\n").unwrap());
static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+- (.+)$").unwrap());
static DECIMAL_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").unwrap());

/// Everything extracted from one outline file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineDocument {
    pub title: String,
    pub audience: String,
    pub chapters: Vec<Chapter>,
    /// Sum of all chapter durations in seconds
    #[serde(serialize_with = "serialize_seconds")]
    pub total_duration: f64,
}

/// One `### NN_slug` section of the outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub name: String,
    /// First token of the `- Asset:` value; `None` when absent or `none`
    pub asset: Option<String>,
    /// Seconds, from a `(Ns)` hint or a probe of the asset; never negative
    #[serde(serialize_with = "serialize_seconds")]
    pub duration: f64,
    pub points: Vec<String>,
    pub annotations: Vec<String>,
    /// Narration word budget derived from `duration`
    pub max_words: u64,
}

impl Chapter {
    /// Annotation lines that use the timestamped cue syntax, parsed.
    ///
    /// Lines that are not cues (free-form notes) are skipped.
    pub fn annotation_cues(&self, fps: u32) -> Vec<AnnotationCue> {
        self.annotations
            .iter()
            .filter_map(|line| parse_annotation(line, fps))
            .collect()
    }
}

/// Whole seconds are written as integers, fractional ones as floats.
fn serialize_seconds<S: Serializer>(secs: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if secs.fract() == 0.0 && *secs >= 0.0 && *secs < u64::MAX as f64 {
        serializer.serialize_u64(*secs as u64)
    } else {
        serializer.serialize_f64(*secs)
    }
}

/// Parses an outline file, probing `.mp4` assets with ffprobe from `PATH`.
///
/// `assets_dir` is only joined with asset names to build probe paths; it is
/// never checked for existence.
pub fn parse_outline(
    outline_path: impl AsRef<Path>,
    assets_dir: impl AsRef<Path>,
) -> OutlineResult<OutlineDocument> {
    let config = ParserConfig::default();
    let prober = FfprobeProber::from_config(&config);
    parse_outline_with(outline_path, assets_dir, &config, &prober)
}

/// Like [`parse_outline`] with an explicit configuration and prober.
pub fn parse_outline_with<P: DurationProber + ?Sized>(
    outline_path: impl AsRef<Path>,
    assets_dir: impl AsRef<Path>,
    config: &ParserConfig,
    prober: &P,
) -> OutlineResult<OutlineDocument> {
    let outline_path = outline_path.as_ref();
    log::debug!("Reading outline: {}", outline_path.display());

    let content = fs::read_to_string(outline_path).map_err(|source| OutlineError::ReadOutline {
        path: outline_path.to_path_buf(),
        source,
    })?;

    Ok(parse_outline_str(&content, assets_dir.as_ref(), config, prober))
}

/// Extracts an [`OutlineDocument`] from outline text. Never fails.
pub fn parse_outline_str<P: DurationProber + ?Sized>(
    content: &str,
    assets_dir: &Path,
    config: &ParserConfig,
    prober: &P,
) -> OutlineDocument {
    let title = extract_title(content).unwrap_or_else(|| config.default_title.clone());
    let audience = extract_audience(content);

    let chapters: Vec<Chapter> = split_chapters(content)
        .into_iter()
        .map(|(name, body)| build_chapter(name, body, assets_dir, config, prober))
        .collect();

    let total_duration: f64 = chapters.iter().map(|ch| ch.duration).sum();

    log::debug!(
        "Parsed outline '{}': {} chapters, {}s total",
        title,
        chapters.len(),
        total_duration
    );

    OutlineDocument {
        title,
        audience,
        chapters,
        total_duration,
    }
}

fn extract_title(content: &str) -> Option<String> {
    TITLE_RE
        .captures(content)
        .map(|caps| caps[1].to_string())
}

/// Text between the `## Target Audience` line and the next `#` line.
fn extract_audience(content: &str) -> String {
    let Some(heading) = AUDIENCE_RE.find(content) else {
        return String::new();
    };

    let rest = &content[heading.end()..];
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    let end = if rest.starts_with('#') {
        0
    } else {
        rest.find("\n#").unwrap_or(rest.len())
    };

    rest[..end].trim().to_string()
}

/// Splits the document into `(name, body)` pairs at chapter headings.
///
/// Level-3 headings that are not `NN_slug` stay inside the current body.
fn split_chapters(content: &str) -> Vec<(&str, &str)> {
    // (heading line start, heading line end, chapter name)
    let headings: Vec<(usize, usize, &str)> = CHAPTER_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let line = caps.get(0)?;
            let name = caps.get(1)?;
            Some((line.start(), line.end(), name.as_str()))
        })
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(i, &(_, line_end, name))| {
            let body_start = (line_end + 1).min(content.len());
            let body_end = headings
                .get(i + 1)
                .map_or(content.len(), |&(next_start, _, _)| next_start);
            (name, &content[body_start..body_end.max(body_start)])
        })
        .collect()
}

fn build_chapter<P: DurationProber + ?Sized>(
    name: &str,
    body: &str,
    assets_dir: &Path,
    config: &ParserConfig,
    prober: &P,
) -> Chapter {
    let asset_value = ASSET_RE
        .captures(body)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty() && value != "none");

    let asset = asset_value
        .as_deref()
        .and_then(|value| value.split_whitespace().next())
        .map(str::to_string);

    let duration = match (&asset_value, &asset) {
        (Some(value), Some(token)) => resolve_duration(value, token, assets_dir, config, prober),
        _ => 0.0,
    };

    Chapter {
        name: name.to_string(),
        asset,
        duration,
        points: extract_list(body, &POINTS_RE),
        annotations: extract_list(body, &ANNOTATIONS_RE),
        max_words: config.max_words(duration),
    }
}

/// An explicit `(Ns)` hint wins; otherwise probe videos; otherwise zero.
fn resolve_duration<P: DurationProber + ?Sized>(
    asset_value: &str,
    token: &str,
    assets_dir: &Path,
    config: &ParserConfig,
    prober: &P,
) -> f64 {
    if let Some(secs) = DURATION_HINT_RE
        .captures(asset_value)
        .and_then(|caps| parse_decimal(&caps[1]))
    {
        return secs;
    }

    if token.ends_with(&config.probe_extension) {
        let asset_path = resolve_asset_path(assets_dir, token);
        let secs = prober.probe_duration(&asset_path);
        if secs.is_finite() && secs > 0.0 {
            return secs;
        }
        log::debug!("No duration for {}, using 0", asset_path.display());
    }

    0.0
}

/// Value of a run of decimal digits from any script (`10`, `١٠`, `१०`).
fn parse_decimal(digits: &str) -> Option<f64> {
    digits
        .chars()
        .try_fold(0.0, |acc, c| Some(acc * 10.0 + f64::from(decimal_value(c)?)))
}

/// Unicode encodes every decimal digit set as a contiguous 0..=9 block, so a
/// digit's value is its distance from the start of its block modulo ten.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }

    let is_digit = |cp: u32| {
        char::from_u32(cp).is_some_and(|ch| DECIMAL_DIGIT_RE.is_match(ch.encode_utf8(&mut [0; 4])))
    };
    if !is_digit(c as u32) {
        return None;
    }

    let mut block_start = c as u32;
    while block_start > 0 && is_digit(block_start - 1) {
        block_start -= 1;
    }
    Some((c as u32 - block_start) % 10)
}

/// Joins like `format!("{dir}/{token}")`: a leading separator on the token
/// does not escape the assets directory.
fn resolve_asset_path(assets_dir: &Path, token: &str) -> PathBuf {
    assets_dir.join(token.trim_start_matches(['/', '\\']))
}

/// Contiguous indented `- item` lines right after the header line.
fn extract_list(body: &str, header: &Regex) -> Vec<String> {
    let Some(found) = header.find(body) else {
        return Vec::new();
    };

    body[found.end()..]
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map_while(|line| LIST_ITEM_RE.captures(line))
        .map(|caps| caps[1].trim().to_string())
        .collect()
}
