//! API error types.
//!
//! Every error is answered with its HTTP status and a JSON body of the form
//! `{ "error": "<message>" }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::response::ErrorBody;

/// API errors that can be returned to clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No access token provided")]
    MissingAccessToken,

    #[error("Track and artist required")]
    MissingTrackOrArtist,

    /// Spotify rejected the access token; carries its 401/403.
    #[error("Access token is invalid or expired")]
    InvalidAccessToken(StatusCode),

    #[error("Lyrics not found")]
    LyricsNotFound,

    #[error("Failed to fetch current track")]
    PlaybackUnavailable,

    #[error("Failed to fetch lyrics")]
    LyricsUnavailable,
}

impl ApiError {
    /// Get the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingAccessToken => StatusCode::UNAUTHORIZED,
            ApiError::MissingTrackOrArtist => StatusCode::BAD_REQUEST,
            ApiError::InvalidAccessToken(status) => *status,
            ApiError::LyricsNotFound => StatusCode::NOT_FOUND,
            ApiError::PlaybackUnavailable | ApiError::LyricsUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
