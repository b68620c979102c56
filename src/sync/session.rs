//! Session state and its transitions.
//!
//! A session is owned by exactly one poll loop. It holds the credential, the
//! track and lyrics on display, the active-line tracker and the current error
//! message, and turns poll results and lyrics lookups into [`SyncEvent`]s.

use std::sync::Arc;

use super::event::{FETCH_FAILED_MESSAGE, SESSION_EXPIRED_MESSAGE, SyncEvent};
use super::fetcher::{FetchedLyrics, LyricsRequest};
use super::source::SourceError;
use crate::lyrics::{LyricsDocument, PositionTracker};
use crate::models::TrackSnapshot;

/// Outcome of applying one poll result.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub events: Vec<SyncEvent>,
    /// Lyrics lookup to start for a new track.
    pub fetch: Option<LyricsRequest>,
    /// The session ended; polling must stop.
    pub halt: bool,
}

#[derive(Debug)]
pub struct Session {
    credential: Option<String>,
    track: Option<TrackSnapshot>,
    lyrics: Option<Arc<LyricsDocument>>,
    tracker: PositionTracker,
    error: Option<String>,
    /// Bumped on every track identity change; lyrics for older generations are stale.
    generation: u64,
}

impl Session {
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            credential: Some(credential.into()),
            track: None,
            lyrics: None,
            tracker: PositionTracker::new(),
            error: None,
            generation: 0,
        }
    }

    /// The credential, until the session expires.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn track(&self) -> Option<&TrackSnapshot> {
        self.track.as_ref()
    }

    pub fn lyrics(&self) -> Option<&Arc<LyricsDocument>> {
        self.lyrics.as_ref()
    }

    pub fn active_line(&self) -> Option<usize> {
        self.tracker.active()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply the result of one playback poll.
    pub fn apply_poll(&mut self, result: Result<Option<TrackSnapshot>, SourceError>) -> Transition {
        match result {
            Ok(Some(track)) => self.update_track(track),
            Ok(None) => Transition {
                events: self.clear_track(),
                ..Default::default()
            },
            Err(SourceError::Unauthorized(status)) => {
                tracing::info!("Credential rejected ({}), clearing session", status);
                self.expire()
            }
            Err(e) => {
                tracing::warn!("Error fetching track: {}", e);
                Transition {
                    events: self.set_error(FETCH_FAILED_MESSAGE),
                    ..Default::default()
                }
            }
        }
    }

    /// Apply a finished lyrics lookup.
    ///
    /// Results for an earlier track, or arriving after the session expired,
    /// are dropped.
    pub fn apply_lyrics(&mut self, fetched: FetchedLyrics) -> Vec<SyncEvent> {
        let current = self.track.as_ref().map(TrackSnapshot::key);
        if self.credential.is_none()
            || fetched.request.generation != self.generation
            || current.as_ref() != Some(&fetched.request.track)
        {
            tracing::debug!("Dropping stale lyrics for '{}'", fetched.request.track.name);
            return Vec::new();
        }

        let document = Arc::new(fetched.document);
        self.lyrics = Some(document.clone());
        self.tracker.reset();

        let mut events = vec![SyncEvent::LyricsReplaced(document)];
        events.extend(self.track_position());
        events
    }

    fn update_track(&mut self, track: TrackSnapshot) -> Transition {
        let mut transition = Transition::default();

        let changed = self.track.as_ref().map(TrackSnapshot::key) != Some(track.key());
        if changed {
            self.generation += 1;
            tracing::debug!("Track changed to '{}' by '{}'", track.name, track.artist);
            transition.fetch = Some(LyricsRequest {
                track: track.key(),
                generation: self.generation,
            });
            if self.lyrics.take().is_some() {
                transition.events.push(SyncEvent::LyricsCleared);
            }
            self.tracker.reset();
        }

        self.track = Some(track.clone());
        transition.events.push(SyncEvent::TrackUpdated(track));

        if self.error.take().is_some() {
            transition.events.push(SyncEvent::ErrorChanged(None));
        }
        if !changed {
            transition.events.extend(self.track_position());
        }
        transition
    }

    fn clear_track(&mut self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        if self.track.take().is_some() {
            self.generation += 1;
            events.push(SyncEvent::TrackCleared);
        }
        if self.lyrics.take().is_some() {
            events.push(SyncEvent::LyricsCleared);
        }
        self.tracker.reset();
        events
    }

    fn expire(&mut self) -> Transition {
        self.credential = None;
        let mut events = self.clear_track();
        events.extend(self.set_error(SESSION_EXPIRED_MESSAGE));
        events.push(SyncEvent::SessionExpired);

        Transition {
            events,
            fetch: None,
            halt: true,
        }
    }

    fn set_error(&mut self, message: &str) -> Vec<SyncEvent> {
        if self.error.as_deref() == Some(message) {
            return Vec::new();
        }
        self.error = Some(message.to_string());
        vec![SyncEvent::ErrorChanged(Some(message.to_string()))]
    }

    /// Re-evaluate the active line against the current progress.
    fn track_position(&mut self) -> Option<SyncEvent> {
        let (Some(track), Some(lyrics)) = (&self.track, &self.lyrics) else {
            return None;
        };
        if !lyrics.synced {
            return None;
        }
        let progress = i64::try_from(track.progress_ms).unwrap_or(i64::MAX);
        self.tracker
            .update(&lyrics.lines, progress)
            .map(SyncEvent::ActiveLineChanged)
    }
}
