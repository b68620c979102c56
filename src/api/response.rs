//! JSON bodies that only the server produces.
//!
//! Payloads shared with the sync client live in [`crate::models`].

use serde::{Deserialize, Serialize};

/// Name reported by `GET /api`.
pub const API_MESSAGE: &str = "Lyrica Spotify Lyrics API";

/// `GET /auth/login` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub url: String,
}

/// `GET /api` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
