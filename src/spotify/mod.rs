//! Spotify integration: login and playback state.

pub mod client;
pub mod models;

pub use client::{SCOPES, SpotifyClient, SpotifyConfig, SpotifyError};
pub use models::{Playback, TokenGrant};
