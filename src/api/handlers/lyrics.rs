//! Lyrics lookup handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::router::AppState;
use crate::models::LyricsResponse;

/// Query parameters for the lyrics endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LyricsParams {
    pub track: Option<String>,
    pub artist: Option<String>,
}

/// GET /api/lyrics?track=...&artist=...
///
/// Looks the pair up on LRCLIB, preferring synced lyrics over plain text.
pub async fn lyrics(
    State(state): State<AppState>,
    Query(params): Query<LyricsParams>,
) -> Result<Json<LyricsResponse>, ApiError> {
    let track = params.track.filter(|t| !t.trim().is_empty());
    let artist = params.artist.filter(|a| !a.trim().is_empty());
    let (Some(track), Some(artist)) = (track, artist) else {
        return Err(ApiError::MissingTrackOrArtist);
    };

    match state.lrclib.get_lyrics(&track, &artist).await {
        Ok(Some(record)) => record
            .into_payload()
            .map(Json)
            .ok_or(ApiError::LyricsNotFound),
        Ok(None) => {
            tracing::debug!("No lyrics for '{}' by '{}'", track, artist);
            Err(ApiError::LyricsNotFound)
        }
        Err(e) => {
            tracing::error!("Error fetching lyrics: {}", e);
            Err(ApiError::LyricsUnavailable)
        }
    }
}
