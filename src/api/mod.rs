//! HTTP API consumed by the front end and the sync client.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

pub use error::ApiError;
pub use response::{LoginResponse, MessageResponse};
pub use router::{AppState, StateError, create_router};
