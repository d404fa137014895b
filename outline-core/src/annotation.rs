//! Timestamped annotation cues.
//!
//! Annotation lines in an outline may follow a small cue syntax understood by
//! the video compositor, e.g. `0:05 arrow (1200, 300) "Click here"`. This
//! module turns such lines into typed [`AnnotationCue`] values; anything else
//! is treated as a free-form note and ignored.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

/// Frame rate assumed by the compositor when none is given.
pub const DEFAULT_FPS: u32 = 30;

/// Radius used when a `circle` cue omits `r=`.
pub const DEFAULT_CIRCLE_RADIUS: u32 = 40;

static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:(\d+):)?(\d+):(\d+)").unwrap());
static ARROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^arrow\s+\((\d+),\s*(\d+)\)(?:\s+"([^"]*)")?"#).unwrap());
static HIGHLIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^highlight\s+\((\d+),\s*(\d+),\s*(\d+),\s*(\d+)\)").unwrap()
});
static CIRCLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^circle\s+\((\d+),\s*(\d+)\)(?:\s+r=(\d+))?").unwrap());
static TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^text\s+\((\d+),\s*(\d+)\)\s+"([^"]*)""#).unwrap());
static BLUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^blur\s+\((\d+),\s*(\d+),\s*(\d+),\s*(\d+)\)").unwrap());
static CURSOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^cursor\s+\((\d+),\s*(\d+)\)").unwrap());
static ZOOM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^zoom\s+\((\d+),\s*(\d+)\)").unwrap());

/// A parsed cue: when it starts and what it draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationCue {
    /// Normalized `[h:]m:ss`
    pub timestamp: String,
    pub start_frame: u64,
    #[serde(flatten)]
    pub kind: CueKind,
}

/// Shape of an on-screen cue, in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CueKind {
    Arrow {
        x: u32,
        y: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Highlight { x: u32, y: u32, width: u32, height: u32 },
    Circle { x: u32, y: u32, radius: u32 },
    Text { x: u32, y: u32, label: String },
    Blur { x: u32, y: u32, width: u32, height: u32 },
    Cursor { x: u32, y: u32 },
    Zoom { x: u32, y: u32 },
}

/// Parses one annotation line, or returns `None` if it is not a cue.
pub fn parse_annotation(line: &str, fps: u32) -> Option<AnnotationCue> {
    let stamp = TIMESTAMP_RE.captures(line)?;
    let hours: u64 = match stamp.get(1) {
        Some(h) => h.as_str().parse().ok()?,
        None => 0,
    };
    let minutes: u64 = stamp[2].parse().ok()?;
    let seconds: u64 = stamp[3].parse().ok()?;

    let timestamp = if hours > 0 {
        format!("{hours}:{minutes}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    };
    let total_secs = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    let start_frame = total_secs.checked_mul(u64::from(fps))?;

    let rest = line[stamp.get(0)?.end()..].trim();
    let kind = parse_kind(rest)?;

    Some(AnnotationCue {
        timestamp,
        start_frame,
        kind,
    })
}

fn parse_kind(rest: &str) -> Option<CueKind> {
    let keyword = rest.split(|c: char| c.is_whitespace()).next()?;

    match keyword {
        "arrow" => {
            let caps = ARROW_RE.captures(rest)?;
            Some(CueKind::Arrow {
                x: num(&caps, 1)?,
                y: num(&caps, 2)?,
                label: caps.get(3).map(|m| m.as_str().to_string()),
            })
        }
        "highlight" => {
            let caps = HIGHLIGHT_RE.captures(rest)?;
            Some(CueKind::Highlight {
                x: num(&caps, 1)?,
                y: num(&caps, 2)?,
                width: num(&caps, 3)?,
                height: num(&caps, 4)?,
            })
        }
        "circle" => {
            let caps = CIRCLE_RE.captures(rest)?;
            let radius = match caps.get(3) {
                Some(r) => r.as_str().parse().ok()?,
                None => DEFAULT_CIRCLE_RADIUS,
            };
            Some(CueKind::Circle {
                x: num(&caps, 1)?,
                y: num(&caps, 2)?,
                radius,
            })
        }
        "text" => {
            let caps = TEXT_RE.captures(rest)?;
            Some(CueKind::Text {
                x: num(&caps, 1)?,
                y: num(&caps, 2)?,
                label: caps[3].to_string(),
            })
        }
        "blur" => {
            let caps = BLUR_RE.captures(rest)?;
            Some(CueKind::Blur {
                x: num(&caps, 1)?,
                y: num(&caps, 2)?,
                width: num(&caps, 3)?,
                height: num(&caps, 4)?,
            })
        }
        "cursor" => {
            let caps = CURSOR_RE.captures(rest)?;
            Some(CueKind::Cursor {
                x: num(&caps, 1)?,
                y: num(&caps, 2)?,
            })
        }
        "zoom" => {
            let caps = ZOOM_RE.captures(rest)?;
            Some(CueKind::Zoom {
                x: num(&caps, 1)?,
                y: num(&caps, 2)?,
            })
        }
        _ => None,
    }
}

fn num(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_with_label() {
        let cue = parse_annotation(r#"0:05 arrow (1200, 300) "Click here""#, DEFAULT_FPS).unwrap();
        assert_eq!(cue.timestamp, "0:05");
        assert_eq!(cue.start_frame, 150);
        assert_eq!(
            cue.kind,
            CueKind::Arrow {
                x: 1200,
                y: 300,
                label: Some("Click here".to_string())
            }
        );
    }

    #[test]
    fn test_arrow_without_label() {
        let cue = parse_annotation("0:01 arrow (1,2)", DEFAULT_FPS).unwrap();
        assert_eq!(cue.kind, CueKind::Arrow { x: 1, y: 2, label: None });
    }

    #[test]
    fn test_hour_timestamps_are_normalized() {
        let cue = parse_annotation("1:02:03 cursor (10, 20)", 25).unwrap();
        assert_eq!(cue.timestamp, "1:2:03");
        assert_eq!(cue.start_frame, (3600 + 120 + 3) * 25);

        let cue = parse_annotation("0:00:07 zoom (1, 1)", 30).unwrap();
        assert_eq!(cue.timestamp, "0:07");
    }

    #[test]
    fn test_circle_default_radius() {
        let cue = parse_annotation("0:10 circle (800, 400)", DEFAULT_FPS).unwrap();
        assert_eq!(cue.kind, CueKind::Circle { x: 800, y: 400, radius: 40 });

        let cue = parse_annotation("0:10 circle (800, 400) r=60", DEFAULT_FPS).unwrap();
        assert_eq!(cue.kind, CueKind::Circle { x: 800, y: 400, radius: 60 });
    }

    #[test]
    fn test_rectangles() {
        let cue = parse_annotation("0:20 highlight (100, 200, 400, 50)", DEFAULT_FPS).unwrap();
        assert_eq!(
            cue.kind,
            CueKind::Highlight { x: 100, y: 200, width: 400, height: 50 }
        );
        let cue = parse_annotation("0:21 blur (1, 2, 3, 4)", DEFAULT_FPS).unwrap();
        assert_eq!(cue.kind, CueKind::Blur { x: 1, y: 2, width: 3, height: 4 });
    }

    #[test]
    fn test_text_requires_label() {
        assert!(parse_annotation("0:30 text (600, 500)", DEFAULT_FPS).is_none());
        let cue = parse_annotation(r#"0:30 text (600, 500) "Enter your query""#, DEFAULT_FPS).unwrap();
        assert_eq!(
            cue.kind,
            CueKind::Text { x: 600, y: 500, label: "Enter your query".to_string() }
        );
    }

    #[test]
    fn test_non_cues() {
        assert!(parse_annotation("Show logo", DEFAULT_FPS).is_none());
        assert!(parse_annotation("0:05 sparkle (1, 2)", DEFAULT_FPS).is_none());
        assert!(parse_annotation("0:05 arrow here", DEFAULT_FPS).is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let cue = parse_annotation("0:02 circle (5, 6)", DEFAULT_FPS).unwrap();
        let json = serde_json::to_value(&cue).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "timestamp": "0:02",
                "startFrame": 60,
                "type": "circle",
                "x": 5,
                "y": 6,
                "radius": 40
            })
        );
    }
}
