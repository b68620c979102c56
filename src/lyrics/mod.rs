//! Synchronized lyrics.
//!
//! - `parser`: LRC text to timed lines
//! - `document`: the per-track lyrics document and its fallbacks
//! - `tracker`: playback progress to active line
//! - `lrclib`: LRCLIB lookup client used by the server

pub mod document;
pub mod lrclib;
pub mod parser;
pub mod tracker;

pub use document::LyricsDocument;
pub use lrclib::{LrclibClient, LrclibError};
pub use parser::{LyricLine, parse_synced};
pub use tracker::{PositionTracker, active_line_index};
