//! Spotify now-playing display with synced lyrics.

pub mod api;
pub mod client;
pub mod config;
pub mod lyrics;
pub mod models;
pub mod spotify;
pub mod sync;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

/// User agent sent to upstream services.
pub const USER_AGENT: &str = concat!("lyrica/", env!("CARGO_PKG_VERSION"));
