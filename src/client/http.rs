//! HTTP client for a running Lyrica server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::api::LoginResponse;
use crate::models::{CurrentTrackResponse, LyricsResponse, TrackKey, TrackSnapshot};
use crate::sync::{LyricsSource, PlaybackSource, SourceError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server returned HTTP {0}")]
    Status(StatusCode),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Transport(e.to_string())
    }
}

/// Client for the server's login, playback and lyrics endpoints.
#[derive(Debug, Clone)]
pub struct LyricaClient {
    client: reqwest::Client,
    base_url: String,
}

impl LyricaClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The Spotify authorization URL to open in a browser.
    pub async fn login_url(&self) -> Result<String, ClientError> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        let body: LoginResponse = response.json().await?;
        Ok(body.url)
    }
}

#[async_trait]
impl PlaybackSource for LyricaClient {
    async fn current_track(&self, credential: &str) -> Result<Option<TrackSnapshot>, SourceError> {
        let url = format!(
            "{}/api/current-track?access_token={}",
            self.base_url,
            urlencoding::encode(credential)
        );
        let response = self.client.get(&url).send().await?;

        match response.status() {
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                Err(SourceError::Unauthorized(status.as_u16()))
            }
            status if !status.is_success() => Err(SourceError::Status(status.as_u16())),
            _ => {
                let body: CurrentTrackResponse = response.json().await?;
                Ok(body.into_snapshot())
            }
        }
    }
}

#[async_trait]
impl LyricsSource for LyricaClient {
    async fn lyrics(&self, track: &TrackKey) -> Result<Option<LyricsResponse>, SourceError> {
        let url = format!(
            "{}/api/lyrics?track={}&artist={}",
            self.base_url,
            urlencoding::encode(&track.name),
            urlencoding::encode(&track.artist)
        );
        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => Err(SourceError::Status(status.as_u16())),
            _ => Ok(Some(response.json().await?)),
        }
    }
}
