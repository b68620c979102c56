//! Models shared by the HTTP server and the sync client.

pub mod lyrics;
pub mod track;

pub use lyrics::LyricsResponse;
pub use track::{CurrentTrackResponse, TrackKey, TrackResponse, TrackSnapshot};
