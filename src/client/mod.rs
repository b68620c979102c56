//! Client side of the server API.

pub mod credentials;
pub mod http;

pub use credentials::{AuthError, Credentials};
pub use http::{ClientError, LyricaClient};
