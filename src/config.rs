//! Server configuration.

use std::path::PathBuf;

use crate::lyrics::LrclibClient;
use crate::spotify::SpotifyConfig;

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Front-end dev server used outside production mode.
pub const DEV_CLIENT_URL: &str = "http://localhost:5173";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Spotify application credentials and endpoints.
    pub spotify: SpotifyConfig,
    /// LRCLIB API base URL.
    pub lrclib_url: String,
    /// Where the OAuth callback sends the browser afterwards.
    pub client_url: String,
    /// Serve the built front end from `static_dir`.
    pub production: bool,
    /// Directory with the built front end.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            spotify: SpotifyConfig::default(),
            lrclib_url: LrclibClient::DEFAULT_BASE_URL.to_string(),
            client_url: DEV_CLIENT_URL.to_string(),
            production: false,
            static_dir: PathBuf::from("client/dist"),
        }
    }
}

impl ServerConfig {
    /// Create a configuration for the given port and Spotify credentials.
    ///
    /// The client URL follows the mode: the server itself in production,
    /// the front-end dev server otherwise.
    pub fn new(port: u16, spotify: SpotifyConfig, production: bool) -> Self {
        Self {
            port,
            spotify,
            production,
            client_url: default_client_url(production, port),
            ..Default::default()
        }
    }
}

/// Client URL used when none is configured explicitly.
pub fn default_client_url(production: bool, port: u16) -> String {
    if production {
        format!("http://localhost:{}", port)
    } else {
        DEV_CLIENT_URL.to_string()
    }
}
