//! LRC lyrics parser.
//!
//! Turns a timestamp-annotated lyrics blob into an ordered list of lines.
//! Each input line is matched independently against `[mm:ss.xx]text`:
//! - `mm`: two-digit minutes
//! - `ss`: two-digit seconds
//! - `xx`: two or three fractional digits (centiseconds or milliseconds)
//!
//! Lines that don't match (metadata tags like `[ar:Artist]`, plain text)
//! are dropped, as are timestamps with no text after them.

use std::sync::LazyLock;

use regex::Regex;

static TIMED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d{2}):(\d{2})\.(\d{2,3})\](.*)").expect("valid LRC line pattern")
});

/// A single timed lyric line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    /// Start offset from the beginning of the track, in milliseconds.
    pub offset_ms: u64,
    /// The lyric text, trimmed.
    pub text: String,
}

impl LyricLine {
    pub fn new(offset_ms: u64, text: impl Into<String>) -> Self {
        Self {
            offset_ms,
            text: text.into(),
        }
    }
}

/// Parse LRC formatted lyrics into timed lines.
///
/// Returns `None` when no line carried a usable timestamp, so the caller can
/// fall back to showing the raw text. Lines are returned in file order; they
/// are not sorted.
pub fn parse_synced(text: &str) -> Option<Vec<LyricLine>> {
    let lines: Vec<LyricLine> = text.lines().filter_map(parse_line).collect();

    if lines.is_empty() { None } else { Some(lines) }
}

/// Parse one line of LRC text.
fn parse_line(line: &str) -> Option<LyricLine> {
    let caps = TIMED_LINE.captures(line)?;

    let minutes: u64 = caps[1].parse().ok()?;
    let seconds: u64 = caps[2].parse().ok()?;
    let fraction = fraction_to_ms(&caps[3])?;

    let text = caps[4].trim();
    if text.is_empty() {
        return None;
    }

    Some(LyricLine::new(
        (minutes * 60 + seconds) * 1000 + fraction,
        text,
    ))
}

/// Convert a 2 or 3 digit fraction to milliseconds by right-padding to 3 digits.
fn fraction_to_ms(digits: &str) -> Option<u64> {
    let padded = format!("{digits:0<3}");
    padded.parse().ok()
}
