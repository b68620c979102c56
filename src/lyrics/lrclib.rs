//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API that provides synchronized (LRC format) lyrics.
//! No API key is needed.
//! API Documentation: https://lrclib.net/docs

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::models::LyricsResponse;

#[derive(Debug, Error)]
pub enum LrclibError {
    #[error("LRCLIB API error: {0}")]
    Status(reqwest::StatusCode),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// LRCLIB API response
#[derive(Debug, Deserialize, Clone)]
pub struct LrclibRecord {
    #[serde(rename = "plainLyrics")]
    pub plain_lyrics: Option<String>,
    #[serde(rename = "syncedLyrics")]
    pub synced_lyrics: Option<String>,
    /// Track length in seconds.
    pub duration: Option<f64>,
}

impl LrclibRecord {
    /// Reduce to the payload served by `/api/lyrics`, preferring synced lyrics.
    ///
    /// Returns `None` when the record has neither kind of lyrics.
    pub fn into_payload(self) -> Option<LyricsResponse> {
        let synced = self.synced_lyrics.filter(|s| !s.is_empty());
        let plain = self.plain_lyrics.filter(|s| !s.is_empty());

        let (lyrics, synced) = match (synced, plain) {
            (Some(lyrics), _) => (lyrics, true),
            (None, Some(lyrics)) => (lyrics, false),
            (None, None) => return None,
        };

        Some(LyricsResponse {
            lyrics: Some(lyrics),
            synced,
            duration: self.duration,
        })
    }
}

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://lrclib.net/api";

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LrclibError> {
        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Get lyrics by exact track and artist name.
    ///
    /// Returns `Ok(None)` when LRCLIB has no record for the pair.
    pub async fn get_lyrics(
        &self,
        track_name: &str,
        artist_name: &str,
    ) -> Result<Option<LrclibRecord>, LrclibError> {
        let url = format!(
            "{}/get?track_name={}&artist_name={}",
            self.base_url,
            urlencoding::encode(track_name),
            urlencoding::encode(artist_name)
        );

        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(Some(response.json().await?))
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(None)
        } else {
            Err(LrclibError::Status(response.status()))
        }
    }
}
