//! Spotify Accounts and Web API client.
//!
//! Covers the authorization code flow and the playback-state endpoint.
//! API documentation: https://developer.spotify.com/documentation/web-api

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use super::models::{Playback, PlaybackState, TokenGrant};

/// Scopes requested during login.
pub const SCOPES: &[&str] = &["user-read-playback-state", "user-read-currently-playing"];

/// Errors talking to Spotify.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// The access token was rejected (401/403).
    #[error("Spotify rejected the access token ({0})")]
    Unauthorized(StatusCode),

    #[error("Spotify API error: {0}")]
    Status(StatusCode),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client credentials and endpoints.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Accounts service base URL (authorize and token endpoints).
    pub accounts_url: String,
    /// Web API base URL.
    pub api_url: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            accounts_url: SpotifyClient::DEFAULT_ACCOUNTS_URL.to_string(),
            api_url: SpotifyClient::DEFAULT_API_URL.to_string(),
        }
    }
}

impl SpotifyConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            ..Default::default()
        }
    }
}

/// Spotify API client.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: reqwest::Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub const DEFAULT_ACCOUNTS_URL: &'static str = "https://accounts.spotify.com";
    pub const DEFAULT_API_URL: &'static str = "https://api.spotify.com/v1";

    pub fn new(config: SpotifyConfig) -> Result<Self, SpotifyError> {
        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    /// URL the user is sent to in order to grant access.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}/authorize?client_id={}&response_type=code&redirect_uri={}&scope={}",
            self.config.accounts_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(&SCOPES.join(" "))
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, SpotifyError> {
        let url = format!("{}/api/token", self.config.accounts_url);
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpotifyError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Current playback state for the token's account.
    ///
    /// Returns `None` when no device is active or nothing is loaded.
    pub async fn current_playback(
        &self,
        access_token: &str,
    ) -> Result<Option<Playback>, SpotifyError> {
        let url = format!("{}/me/player", self.config.api_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                Err(SpotifyError::Unauthorized(status))
            }
            status if status.is_success() => {
                let state: PlaybackState = response.json().await?;
                Ok(state.into_playback())
            }
            status => Err(SpotifyError::Status(status)),
        }
    }
}
