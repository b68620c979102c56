//! Local HTTP servers standing in for Spotify and LRCLIB in tests.
//!
//! Access tokens select the fake playback state:
//! - `playing`: Harvest Moon, 42s in
//! - `paused`: same track, not playing
//! - `idle`: 204 No Content
//! - `expired` / `forbidden`: 401 / 403
//! - anything else: 502

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{
    Form, Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const HARVEST_MOON_LRC: &str = "[ti:Harvest Moon]\n\
[00:20.10]Come a little bit closer\n\
[00:25.50]Hear what I have to say\n\
[00:40.00]Just like children sleepin'\n\
[00:45.80]We could dream this night away";

/// An axum app served on an ephemeral localhost port for the test's lifetime.
pub struct TestServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, task }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fake Spotify accounts/API and LRCLIB on one server.
pub struct FakeUpstream {
    server: TestServer,
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/player", get(player))
            .route("/lrclib/get", get(lrclib_get));
        Self {
            server: TestServer::start(app).await,
        }
    }

    pub fn base_url(&self) -> String {
        self.server.base_url()
    }
}

async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    if form.get("grant_type").map(String::as_str) != Some("authorization_code")
        || form.get("code").map(String::as_str) != Some("good-code")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" })))
            .into_response();
    }
    Json(json!({
        "access_token": "access-1",
        "token_type": "Bearer",
        "refresh_token": "refresh-1",
        "expires_in": 3600
    }))
    .into_response()
}

fn playback_body(is_playing: bool) -> serde_json::Value {
    json!({
        "is_playing": is_playing,
        "progress_ms": 42000,
        "item": {
            "name": "Harvest Moon",
            "duration_ms": 303000,
            "artists": [{ "name": "Neil Young" }],
            "album": {
                "name": "Harvest Moon",
                "images": [{ "url": "https://i.scdn.co/harvest" }]
            }
        }
    })
}

async fn player(headers: HeaderMap) -> Response {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    match token {
        "playing" => Json(playback_body(true)).into_response(),
        "paused" => Json(playback_body(false)).into_response(),
        "idle" => StatusCode::NO_CONTENT.into_response(),
        "expired" => StatusCode::UNAUTHORIZED.into_response(),
        "forbidden" => StatusCode::FORBIDDEN.into_response(),
        _ => StatusCode::BAD_GATEWAY.into_response(),
    }
}

async fn lrclib_get(Query(params): Query<HashMap<String, String>>) -> Response {
    let track = params.get("track_name").map(String::as_str);
    let artist = params.get("artist_name").map(String::as_str);

    match (track, artist) {
        (Some("Harvest Moon"), Some("Neil Young")) => Json(json!({
            "id": 1,
            "trackName": "Harvest Moon",
            "artistName": "Neil Young",
            "duration": 303.0,
            "plainLyrics": "Come a little bit closer",
            "syncedLyrics": HARVEST_MOON_LRC
        }))
        .into_response(),
        (Some("Plain Song"), _) => Json(json!({
            "id": 2,
            "trackName": "Plain Song",
            "artistName": "Someone",
            "duration": 120.0,
            "plainLyrics": "Only plain words",
            "syncedLyrics": null
        }))
        .into_response(),
        (Some("Broken"), _) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "code": 404 }))).into_response(),
    }
}
