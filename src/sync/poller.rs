//! Playback poller.
//!
//! Polls the playback endpoint at a fixed interval while a credential is held
//! and publishes [`SyncEvent`]s. Each session runs in its own task that owns
//! all of its state; lyrics lookups run in spawned tasks and report back to it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::event::SyncEvent;
use super::fetcher::LyricsFetcher;
use super::session::Session;
use super::source::{LyricsSource, PlaybackSource};

/// Default poll interval (1 second).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between playback polls.
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl PollerConfig {
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
        }
    }
}

/// Starts poll loops.
pub struct Poller<P, L> {
    playback: Arc<P>,
    lyrics: Arc<L>,
    config: PollerConfig,
    events: mpsc::UnboundedSender<SyncEvent>,
}

impl<P: PlaybackSource, L: LyricsSource> Poller<P, L> {
    pub fn with_config(
        playback: Arc<P>,
        lyrics: Arc<L>,
        events: mpsc::UnboundedSender<SyncEvent>,
        config: PollerConfig,
    ) -> Self {
        Self {
            playback,
            lyrics,
            config,
            events,
        }
    }

    /// Start polling for `credential` in the background.
    /// Returns a handle that can be used to stop the loop.
    pub fn start(&self, credential: impl Into<String>) -> PollHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let session = Session::new(credential);
        let playback = self.playback.clone();
        let lyrics = self.lyrics.clone();
        let interval = self.config.interval;
        let events = self.events.clone();

        let task = tokio::spawn(async move {
            run_poll_loop(session, playback, lyrics, interval, events, shutdown_rx).await;
        });

        PollHandle {
            shutdown_tx,
            task: Some(task),
        }
    }
}

/// Run the poll loop until stopped, the session expires, or nobody listens.
async fn run_poll_loop<P, L>(
    mut session: Session,
    playback: Arc<P>,
    lyrics: Arc<L>,
    interval: Duration,
    events: mpsc::UnboundedSender<SyncEvent>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    P: PlaybackSource,
    L: LyricsSource,
{
    tracing::info!("Playback poller started with interval {:?}", interval);

    let (results_tx, mut results_rx) = mpsc::unbounded_channel();
    let fetcher = LyricsFetcher::new(lyrics, results_tx);

    // First tick completes immediately.
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    tracing::info!("Playback poller received shutdown signal");
                    break;
                }
            }
            Some(fetched) = results_rx.recv() => {
                if !publish(&events, session.apply_lyrics(fetched)) {
                    break;
                }
            }
            _ = ticker.tick() => {
                let Some(credential) = session.credential().map(str::to_owned) else {
                    break;
                };
                tracing::trace!("Polling playback state");
                let result = playback.current_track(&credential).await;

                // Stopped while the request was in flight.
                if *shutdown_rx.borrow() {
                    break;
                }

                let transition = session.apply_poll(result);
                if let Some(request) = transition.fetch {
                    fetcher.request(request);
                }
                if !publish(&events, transition.events) || transition.halt {
                    break;
                }
            }
        }
    }

    tracing::info!("Playback poller stopped");
}

/// Send events; false once the receiver is gone.
fn publish(events: &mpsc::UnboundedSender<SyncEvent>, batch: Vec<SyncEvent>) -> bool {
    for event in batch {
        if events.send(event).is_err() {
            tracing::debug!("Event receiver dropped");
            return false;
        }
    }
    true
}

/// Handle for controlling a poll loop.
///
/// Dropping the handle stops the loop.
pub struct PollHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Ask the loop to stop. In-flight requests are not cancelled, but their
    /// results are discarded.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Whether the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the loop to exit on its own (session expiry) or after `stop`.
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::error!("Poll loop task failed: {}", e);
        }
    }

    /// Stop the loop and wait until it has exited.
    pub async fn shutdown(mut self) {
        self.stop();
        self.wait().await;
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Owns the poll loop for the current credential.
///
/// Logging in again replaces the previous loop, so at most one loop is live.
pub struct SessionController<P, L> {
    poller: Poller<P, L>,
    active: Option<PollHandle>,
}

impl<P: PlaybackSource, L: LyricsSource> SessionController<P, L> {
    pub fn new(poller: Poller<P, L>) -> Self {
        Self {
            poller,
            active: None,
        }
    }

    /// Start a session for `credential`, tearing down any previous one first.
    pub async fn login(&mut self, credential: impl Into<String>) {
        self.logout().await;
        self.active = Some(self.poller.start(credential));
    }

    /// Stop the current session, if any.
    pub async fn logout(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.shutdown().await;
        }
    }

    /// Whether a poll loop is currently running.
    pub fn is_polling(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LyricsResponse, TrackKey, TrackSnapshot};
    use crate::sync::source::SourceError;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    const TICK: Duration = Duration::from_millis(10);

    /// Plays back a script of poll results; the last one repeats.
    #[derive(Default)]
    struct ScriptedPlayback {
        script: Mutex<VecDeque<Result<Option<TrackSnapshot>, SourceError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedPlayback {
        fn new(script: Vec<Result<Option<TrackSnapshot>, SourceError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls_with(&self, credential: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| *c == credential).count()
        }
    }

    #[async_trait]
    impl PlaybackSource for ScriptedPlayback {
        async fn current_track(&self, credential: &str) -> Result<Option<TrackSnapshot>, SourceError> {
            self.calls.lock().unwrap().push(credential.to_string());
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap_or(Ok(None))
            }
        }
    }

    #[derive(Default)]
    struct CountingLyrics {
        calls: Mutex<HashMap<String, usize>>,
    }

    impl CountingLyrics {
        fn calls_for(&self, name: &str) -> usize {
            self.calls.lock().unwrap().get(name).copied().unwrap_or(0)
        }
    }

    #[async_trait]
    impl LyricsSource for CountingLyrics {
        async fn lyrics(&self, track: &TrackKey) -> Result<Option<LyricsResponse>, SourceError> {
            *self.calls.lock().unwrap().entry(track.name.clone()).or_default() += 1;
            Ok(Some(LyricsResponse {
                lyrics: Some("[00:00.00]First\n[00:05.00]Second".into()),
                synced: true,
                duration: None,
            }))
        }
    }

    fn track(name: &str, progress_ms: u64) -> TrackSnapshot {
        TrackSnapshot {
            name: name.into(),
            artist: "Artist".into(),
            album: "Album".into(),
            album_art: None,
            duration_ms: 60_000,
            progress_ms,
        }
    }

    fn poller(
        playback: &Arc<ScriptedPlayback>,
        lyrics: &Arc<CountingLyrics>,
    ) -> (Poller<ScriptedPlayback, CountingLyrics>, mpsc::UnboundedReceiver<SyncEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = PollerConfig {
            interval: TICK,
        };
        (Poller::with_config(playback.clone(), lyrics.clone(), tx, config), rx)
    }

    async fn next_matching(
        rx: &mut mpsc::UnboundedReceiver<SyncEvent>,
        pred: impl Fn(&SyncEvent) -> bool,
    ) -> SyncEvent {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let event = rx.recv().await.expect("event channel closed");
                if pred(&event) {
                    return event;
                }
            }
        })
        .await
        .expect("timed out waiting for event")
    }

    #[tokio::test]
    async fn test_unauthorized_halts_polling() {
        let playback = Arc::new(ScriptedPlayback::new(vec![
            Ok(Some(track("A", 0))),
            Err(SourceError::Unauthorized(401)),
        ]));
        let lyrics = Arc::new(CountingLyrics::default());
        let (poller, mut rx) = poller(&playback, &lyrics);

        let mut handle = poller.start("token");
        next_matching(&mut rx, |e| *e == SyncEvent::SessionExpired).await;
        tokio::time::timeout(Duration::from_secs(2), handle.wait())
            .await
            .unwrap();
        assert!(handle.is_finished());

        let calls = playback.calls_with("token");
        tokio::time::sleep(TICK * 5).await;
        assert_eq!(playback.calls_with("token"), calls);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_lyrics_fetched_once_per_track() {
        let playback = Arc::new(ScriptedPlayback::new(vec![
            Ok(Some(track("A", 0))),
            Ok(Some(track("A", 1000))),
            Ok(Some(track("A", 6000))),
            Ok(Some(track("B", 0))),
            Ok(Some(track("B", 1000))),
            Ok(Some(track("B", 6000))),
        ]));
        let lyrics = Arc::new(CountingLyrics::default());
        let (poller, mut rx) = poller(&playback, &lyrics);

        let handle = poller.start("token");
        next_matching(&mut rx, |e| matches!(e, SyncEvent::TrackUpdated(t) if t.name == "B")).await;
        next_matching(&mut rx, |e| *e == SyncEvent::ActiveLineChanged(Some(1))).await;
        tokio::time::sleep(TICK * 5).await;
        handle.shutdown().await;

        assert_eq!(lyrics.calls_for("A"), 1);
        assert_eq!(lyrics.calls_for("B"), 1);
    }

    #[tokio::test]
    async fn test_transient_errors_keep_polling() {
        let playback = Arc::new(ScriptedPlayback::new(vec![
            Err(SourceError::Status(500)),
            Err(SourceError::Transport("reset".into())),
            Ok(Some(track("A", 0))),
        ]));
        let lyrics = Arc::new(CountingLyrics::default());
        let (poller, mut rx) = poller(&playback, &lyrics);

        let handle = poller.start("token");
        next_matching(&mut rx, |e| matches!(e, SyncEvent::ErrorChanged(Some(_)))).await;
        next_matching(&mut rx, |e| *e == SyncEvent::ErrorChanged(None)).await;
        assert!(!handle.is_finished());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_stop_ends_loop() {
        let playback = Arc::new(ScriptedPlayback::new(vec![Ok(None)]));
        let lyrics = Arc::new(CountingLyrics::default());
        let (poller, _rx) = poller(&playback, &lyrics);

        let handle = poller.start("token");
        tokio::time::sleep(TICK * 3).await;
        handle.shutdown().await;

        let calls = playback.calls_with("token");
        assert!(calls >= 1);
        tokio::time::sleep(TICK * 5).await;
        assert_eq!(playback.calls_with("token"), calls);
        assert_eq!(lyrics.calls_for("A"), 0);
    }

    #[tokio::test]
    async fn test_login_replaces_previous_loop() {
        let playback = Arc::new(ScriptedPlayback::new(vec![Ok(None)]));
        let lyrics = Arc::new(CountingLyrics::default());
        let (poller, _rx) = poller(&playback, &lyrics);
        let mut controller = SessionController::new(poller);

        controller.login("first").await;
        tokio::time::sleep(TICK * 3).await;
        controller.login("second").await;

        let first_calls = playback.calls_with("first");
        tokio::time::sleep(TICK * 5).await;
        assert_eq!(playback.calls_with("first"), first_calls);
        assert!(playback.calls_with("second") >= 1);
        assert!(controller.is_polling());

        controller.logout().await;
        assert!(!controller.is_polling());
    }

    #[tokio::test]
    async fn test_login_after_expiry_resumes_with_new_credential() {
        let playback = Arc::new(ScriptedPlayback::new(vec![
            Err(SourceError::Unauthorized(401)),
            Ok(Some(track("A", 0))),
        ]));
        let lyrics = Arc::new(CountingLyrics::default());
        let (poller, mut rx) = poller(&playback, &lyrics);
        let mut controller = SessionController::new(poller);

        controller.login("old").await;
        next_matching(&mut rx, |e| *e == SyncEvent::SessionExpired).await;
        tokio::time::timeout(Duration::from_secs(2), async {
            while controller.is_polling() {
                tokio::time::sleep(TICK).await;
            }
        })
        .await
        .unwrap();
        assert_eq!(playback.calls_with("old"), 1);

        controller.login("new").await;
        next_matching(&mut rx, |e| matches!(e, SyncEvent::TrackUpdated(t) if t.name == "A")).await;
        assert!(controller.is_polling());

        tokio::time::sleep(TICK * 5).await;
        assert_eq!(playback.calls_with("old"), 1);
        assert!(playback.calls_with("new") >= 1);

        controller.logout().await;
    }
}
