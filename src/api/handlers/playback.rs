//! Playback state handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::router::AppState;
use crate::models::{CurrentTrackResponse, TrackResponse};
use crate::spotify::SpotifyError;

/// Query parameters for the current-track endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrentTrackParams {
    pub access_token: Option<String>,
}

/// GET /api/current-track?access_token=...
///
/// Returns what the account is playing right now. A rejected token is
/// answered with Spotify's own 401/403 so the client can end the session.
pub async fn current_track(
    State(state): State<AppState>,
    Query(params): Query<CurrentTrackParams>,
) -> Result<Json<CurrentTrackResponse>, ApiError> {
    let token = params
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingAccessToken)?;

    match state.spotify.current_playback(&token).await {
        Ok(None) => Ok(Json(CurrentTrackResponse::not_playing())),
        Ok(Some(playback)) => Ok(Json(CurrentTrackResponse {
            is_playing: playback.is_playing,
            track: Some(TrackResponse::from(&playback.track)),
        })),
        Err(SpotifyError::Unauthorized(status)) => {
            tracing::warn!("Spotify rejected access token ({})", status);
            Err(ApiError::InvalidAccessToken(status))
        }
        Err(e) => {
            tracing::error!("Error fetching current track: {}", e);
            Err(ApiError::PlaybackUnavailable)
        }
    }
}
