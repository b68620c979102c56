//! API handlers.

pub mod auth;
pub mod lyrics;
pub mod playback;
pub mod system;

pub use auth::*;
pub use lyrics::*;
pub use playback::*;
pub use system::*;
