//! Credentials handed back by the login callback.

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The callback reported `error=...`.
    #[error("Authentication failed. Please try again.")]
    Failed,

    #[error("Invalid redirect URL: {0}")]
    InvalidUrl(String),

    #[error("No access token in redirect URL")]
    MissingAccessToken,
}

/// Tokens from a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds.
    pub expires_in: Option<u64>,
}

impl Credentials {
    /// Read the tokens from the URL the login callback redirected to.
    pub fn from_redirect(redirect: &str) -> Result<Self, AuthError> {
        let url = Url::parse(redirect).map_err(|e| AuthError::InvalidUrl(e.to_string()))?;

        let mut access_token = None;
        let mut refresh_token = None;
        let mut expires_in = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "error" => return Err(AuthError::Failed),
                "access_token" => access_token = Some(value.into_owned()),
                "refresh_token" => refresh_token = Some(value.into_owned()),
                "expires_in" => expires_in = value.parse().ok(),
                _ => {}
            }
        }

        let access_token = access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingAccessToken)?;
        Ok(Self {
            access_token,
            refresh_token: refresh_token.filter(|t| !t.is_empty()),
            expires_in,
        })
    }
}
