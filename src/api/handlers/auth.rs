//! Spotify login handlers (login, callback).

use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::api::response::LoginResponse;
use crate::api::router::AppState;
use crate::spotify::TokenGrant;

/// Query parameters Spotify sends back to the callback.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CallbackParams {
    /// Authorization code to exchange for tokens.
    pub code: Option<String>,
    /// Set instead of `code` when the user denied access.
    pub error: Option<String>,
}

/// GET /auth/login
///
/// Returns the Spotify authorization URL the front end should navigate to.
pub async fn login(State(state): State<AppState>) -> Json<LoginResponse> {
    Json(LoginResponse {
        url: state.spotify.authorize_url(),
    })
}

/// GET /callback
///
/// Exchanges the authorization code and sends the browser back to the client
/// with the tokens in the query string, or with `error=auth_failed`.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let client_url = &state.config.client_url;

    if let Some(error) = params.error {
        tracing::warn!("Spotify authorization denied: {}", error);
        return Redirect::to(&failure_redirect(client_url));
    }
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        tracing::warn!("Callback called without an authorization code");
        return Redirect::to(&failure_redirect(client_url));
    };

    match state.spotify.exchange_code(&code).await {
        Ok(grant) => {
            tracing::info!("Spotify login complete, token expires in {}s", grant.expires_in);
            Redirect::to(&success_redirect(client_url, &grant))
        }
        Err(e) => {
            tracing::error!("Error getting tokens: {}", e);
            Redirect::to(&failure_redirect(client_url))
        }
    }
}

/// Client URL carrying the granted tokens.
pub fn success_redirect(client_url: &str, grant: &TokenGrant) -> String {
    format!(
        "{}?access_token={}&refresh_token={}&expires_in={}",
        client_url,
        urlencoding::encode(&grant.access_token),
        urlencoding::encode(grant.refresh_token.as_deref().unwrap_or_default()),
        grant.expires_in
    )
}

/// Client URL reporting a failed login.
pub fn failure_redirect(client_url: &str) -> String {
    format!("{}?error=auth_failed", client_url)
}
