//! System-related API handlers.

use axum::Json;

use crate::api::response::{API_MESSAGE, MessageResponse};

/// GET /api
///
/// Used to test connectivity with the server.
pub async fn api_info() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: API_MESSAGE.to_string(),
    })
}
