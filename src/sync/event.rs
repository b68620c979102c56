//! Events published by the poll loop to the presentation layer.

use std::sync::Arc;

use crate::lyrics::LyricsDocument;
use crate::models::TrackSnapshot;

/// Shown when the playback endpoint rejects the credential.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Shown when a poll fails for any other reason.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch current track";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Fresh snapshot of the playing track, sent on every successful poll.
    TrackUpdated(TrackSnapshot),
    /// Nothing is playing any more.
    TrackCleared,
    /// New lyrics for the current track. The display scrolls back to the top.
    LyricsReplaced(Arc<LyricsDocument>),
    /// The lyrics were dropped (track ended or changed, lyrics pending).
    LyricsCleared,
    /// The highlighted line changed. The display scrolls the line into view
    /// when there is one.
    ActiveLineChanged(Option<usize>),
    /// The user-visible error message was set or cleared.
    ErrorChanged(Option<String>),
    /// The credential was rejected and polling stopped.
    SessionExpired,
}
