//! Where the poll loop gets playback state and lyrics from.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{LyricsResponse, TrackKey, TrackSnapshot};

/// Errors reported by a source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The credential was rejected (401/403).
    #[error("credential rejected with HTTP {0}")]
    Unauthorized(u16),

    #[error("request failed with HTTP {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),
}

/// Playback-state endpoint.
#[async_trait]
pub trait PlaybackSource: Send + Sync + 'static {
    /// The playing track, or `None` when nothing is playing.
    async fn current_track(&self, credential: &str) -> Result<Option<TrackSnapshot>, SourceError>;
}

/// Lyrics lookup endpoint.
#[async_trait]
pub trait LyricsSource: Send + Sync + 'static {
    /// Lyrics for the track, or `None` when there are none.
    async fn lyrics(&self, track: &TrackKey) -> Result<Option<LyricsResponse>, SourceError>;
}
