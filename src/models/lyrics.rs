//! Lyrics lookup models.

use serde::{Deserialize, Serialize};

/// `/api/lyrics` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub synced: bool,
    /// Track length in seconds, as reported by the lyrics provider.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration: Option<f64>,
}
