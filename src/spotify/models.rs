//! Spotify Web API payloads.
//!
//! Only the fields the player needs are modelled. Podcast episodes come back
//! through the same endpoint without artists or album, so most fields default.

use serde::Deserialize;

use crate::models::TrackSnapshot;

/// `GET /v1/me/player` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub item: Option<PlaybackItem>,
}

/// The track (or episode) being played.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackItem {
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

/// `POST /api/token` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

/// Playback state reduced to what the server reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    pub is_playing: bool,
    pub track: TrackSnapshot,
}

impl PlaybackState {
    /// Flatten into a [`Playback`]; `None` when nothing is loaded.
    pub fn into_playback(self) -> Option<Playback> {
        let item = self.item?;

        let artist = item
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let (album, album_art) = match item.album {
            Some(album) => (album.name, album.images.into_iter().next().map(|i| i.url)),
            None => (String::new(), None),
        };

        Some(Playback {
            is_playing: self.is_playing,
            track: TrackSnapshot {
                name: item.name,
                artist,
                album,
                album_art,
                duration_ms: item.duration_ms,
                progress_ms: self.progress_ms.unwrap_or(0),
            },
        })
    }
}
