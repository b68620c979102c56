//! Lyrics documents shown for the current track.

use super::parser::{LyricLine, parse_synced};

/// Raw text shown when the lookup found nothing.
pub const NOT_AVAILABLE_TEXT: &str = "Lyrics not available for this track";

/// Raw text shown when the lookup itself failed.
pub const FAILED_TEXT: &str = "Failed to load lyrics";

/// Lyrics for one track, replaced wholesale when the track changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsDocument {
    /// Whether `lines` carries timed lines.
    pub synced: bool,
    /// Timed lines; empty when unsynced.
    pub lines: Vec<LyricLine>,
    /// Text shown when the document is not synced.
    pub raw: String,
}

impl LyricsDocument {
    /// Build a document from a lyrics payload.
    ///
    /// The document is synced only when the payload is flagged as synced and
    /// at least one timed line could be parsed from it.
    pub fn from_payload(text: impl Into<String>, synced: bool) -> Self {
        let raw = text.into();
        let lines = if synced { parse_synced(&raw) } else { None };

        match lines {
            Some(lines) => Self {
                synced: true,
                lines,
                raw,
            },
            None => Self::unsynced(raw),
        }
    }

    /// Plain-text document.
    pub fn unsynced(raw: impl Into<String>) -> Self {
        Self {
            synced: false,
            lines: Vec::new(),
            raw: raw.into(),
        }
    }

    /// Fallback for tracks without lyrics.
    pub fn not_available() -> Self {
        Self::unsynced(NOT_AVAILABLE_TEXT)
    }

    /// Fallback for a failed lookup.
    pub fn failed() -> Self {
        Self::unsynced(FAILED_TEXT)
    }
}
