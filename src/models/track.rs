//! Now-playing models.

use serde::{Deserialize, Serialize};

/// The track playing at the time of a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSnapshot {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub album_art: Option<String>,
    pub duration_ms: u64,
    pub progress_ms: u64,
}

impl TrackSnapshot {
    /// The identity used to decide whether lyrics must be refetched.
    pub fn key(&self) -> TrackKey {
        TrackKey {
            name: self.name.clone(),
            artist: self.artist.clone(),
        }
    }
}

/// Track identity: the `(name, artist)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey {
    pub name: String,
    pub artist: String,
}

/// `/api/current-track` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTrackResponse {
    #[serde(rename = "isPlaying")]
    pub is_playing: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub track: Option<TrackResponse>,
}

impl CurrentTrackResponse {
    pub fn not_playing() -> Self {
        Self {
            is_playing: false,
            track: None,
        }
    }

    /// The snapshot to display, if something is actually playing.
    pub fn into_snapshot(self) -> Option<TrackSnapshot> {
        if !self.is_playing {
            return None;
        }
        self.track.map(TrackSnapshot::from)
    }
}

/// Track details in the `/api/current-track` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackResponse {
    pub name: String,
    pub artist: String,
    pub album: String,
    #[serde(rename = "albumArt", skip_serializing_if = "Option::is_none", default)]
    pub album_art: Option<String>,
    /// Track length in milliseconds.
    pub duration: u64,
    /// Playback position in milliseconds.
    pub progress: u64,
}

impl From<TrackResponse> for TrackSnapshot {
    fn from(track: TrackResponse) -> Self {
        Self {
            name: track.name,
            artist: track.artist,
            album: track.album,
            album_art: track.album_art,
            duration_ms: track.duration,
            progress_ms: track.progress,
        }
    }
}

impl From<&TrackSnapshot> for TrackResponse {
    fn from(track: &TrackSnapshot) -> Self {
        Self {
            name: track.name.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            album_art: track.album_art.clone(),
            duration: track.duration_ms,
            progress: track.progress_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_playing_serialization() {
        let json = serde_json::to_string(&CurrentTrackResponse::not_playing()).unwrap();
        assert_eq!(json, r#"{"isPlaying":false}"#);
    }

    #[test]
    fn test_into_snapshot() {
        let body = r#"{
            "isPlaying": true,
            "track": {
                "name": "Song", "artist": "A, B", "album": "Record",
                "albumArt": "https://img/1", "duration": 200000, "progress": 1500
            }
        }"#;
        let response: CurrentTrackResponse = serde_json::from_str(body).unwrap();
        let snapshot = response.into_snapshot().unwrap();
        assert_eq!(snapshot.artist, "A, B");
        assert_eq!(snapshot.album_art.as_deref(), Some("https://img/1"));
        assert_eq!(snapshot.progress_ms, 1500);
        assert_eq!(
            snapshot.key(),
            TrackKey {
                name: "Song".into(),
                artist: "A, B".into()
            }
        );
    }

    #[test]
    fn test_paused_track_is_not_a_snapshot() {
        let response = CurrentTrackResponse {
            is_playing: false,
            track: Some(TrackResponse {
                name: "Song".into(),
                artist: "A".into(),
                album: "R".into(),
                album_art: None,
                duration: 1,
                progress: 0,
            }),
        };
        assert_eq!(response.into_snapshot(), None);
    }
}
