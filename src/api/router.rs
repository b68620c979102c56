//! Router and shared application state.

use std::sync::Arc;

use axum::{Router, routing::get};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::config::ServerConfig;
use crate::lyrics::{LrclibClient, LrclibError};
use crate::spotify::{SpotifyClient, SpotifyError};

/// Errors building the application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to create Spotify client: {0}")]
    Spotify(#[from] SpotifyError),

    #[error("Failed to create LRCLIB client: {0}")]
    Lrclib(#[from] LrclibError),
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub spotify: SpotifyClient,
    pub lrclib: LrclibClient,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, StateError> {
        let spotify = SpotifyClient::new(config.spotify.clone())?;
        let lrclib = LrclibClient::with_base_url(config.lrclib_url.clone())?;
        Ok(Self {
            config: Arc::new(config),
            spotify,
            lrclib,
        })
    }
}

/// Create the main router with all API routes.
///
/// In production mode the built front end is served for every other path,
/// with `index.html` answering unknown routes.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Login
        .route("/auth/login", get(handlers::login))
        .route("/callback", get(handlers::callback))
        // API
        .route("/api", get(handlers::api_info))
        .route("/api/current-track", get(handlers::current_track))
        .route("/api/lyrics", get(handlers::lyrics));

    if state.config.production {
        let static_dir = &state.config.static_dir;
        let index = ServeFile::new(static_dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(static_dir).fallback(index));
    }

    router
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
