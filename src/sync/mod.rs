//! Now-playing synchronization.
//!
//! Keeps a session's track, lyrics and highlighted line current by polling
//! the playback endpoint and fetching lyrics whenever the track changes.

pub mod event;
pub mod fetcher;
pub mod poller;
pub mod session;
pub mod source;

pub use event::{FETCH_FAILED_MESSAGE, SESSION_EXPIRED_MESSAGE, SyncEvent};
pub use fetcher::{FetchedLyrics, LyricsFetcher, LyricsRequest, fetch_document};
pub use poller::{DEFAULT_POLL_INTERVAL_MS, PollHandle, Poller, PollerConfig, SessionController};
pub use session::{Session, Transition};
pub use source::{LyricsSource, PlaybackSource, SourceError};
