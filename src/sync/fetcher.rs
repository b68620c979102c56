//! Lyrics fetching for the poll loop.
//!
//! Lookups never fail from the caller's point of view: missing lyrics and
//! failed requests both turn into a plain-text fallback document.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::source::LyricsSource;
use crate::lyrics::LyricsDocument;
use crate::models::{LyricsResponse, TrackKey};

/// A lyrics lookup the session asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsRequest {
    pub track: TrackKey,
    /// Session track generation the request belongs to.
    pub generation: u64,
}

/// A finished lookup, sent back to the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedLyrics {
    pub request: LyricsRequest,
    pub document: LyricsDocument,
}

/// Look up lyrics and build the document to display.
pub async fn fetch_document<L>(source: &L, track: &TrackKey) -> LyricsDocument
where
    L: LyricsSource + ?Sized,
{
    match source.lyrics(track).await {
        Ok(Some(LyricsResponse {
            lyrics: Some(text),
            synced,
            ..
        })) => LyricsDocument::from_payload(text, synced),
        Ok(_) => {
            tracing::debug!("No lyrics for '{}' by '{}'", track.name, track.artist);
            LyricsDocument::not_available()
        }
        Err(e) => {
            tracing::warn!("Error fetching lyrics for '{}': {}", track.name, e);
            LyricsDocument::failed()
        }
    }
}

/// Runs lookups in the background and reports results on a channel.
pub struct LyricsFetcher<L> {
    source: Arc<L>,
    results: mpsc::UnboundedSender<FetchedLyrics>,
}

impl<L: LyricsSource> LyricsFetcher<L> {
    pub fn new(source: Arc<L>, results: mpsc::UnboundedSender<FetchedLyrics>) -> Self {
        Self { source, results }
    }

    /// Start a lookup. The result arrives on the results channel; nothing is
    /// sent if the receiver has gone away.
    pub fn request(&self, request: LyricsRequest) {
        let source = self.source.clone();
        let results = self.results.clone();

        tokio::spawn(async move {
            let document = fetch_document(source.as_ref(), &request.track).await;
            let _ = results.send(FetchedLyrics { request, document });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::document::{FAILED_TEXT, NOT_AVAILABLE_TEXT};
    use crate::sync::source::SourceError;
    use async_trait::async_trait;

    struct Fixed(Result<Option<LyricsResponse>, SourceError>);

    #[async_trait]
    impl LyricsSource for Fixed {
        async fn lyrics(&self, _track: &TrackKey) -> Result<Option<LyricsResponse>, SourceError> {
            self.0.clone()
        }
    }

    fn key() -> TrackKey {
        TrackKey {
            name: "Song".into(),
            artist: "Artist".into(),
        }
    }

    fn payload(lyrics: Option<&str>, synced: bool) -> LyricsResponse {
        LyricsResponse {
            lyrics: lyrics.map(String::from),
            synced,
            duration: None,
        }
    }

    #[tokio::test]
    async fn test_synced_payload() {
        let source = Fixed(Ok(Some(payload(Some("[00:01.00]Hi"), true))));
        let doc = fetch_document(&source, &key()).await;
        assert!(doc.synced);
        assert_eq!(doc.lines.len(), 1);
    }

    #[tokio::test]
    async fn test_plain_payload() {
        let source = Fixed(Ok(Some(payload(Some("words"), false))));
        let doc = fetch_document(&source, &key()).await;
        assert!(!doc.synced);
        assert_eq!(doc.raw, "words");
    }

    #[tokio::test]
    async fn test_missing_payload() {
        let doc = fetch_document(&Fixed(Ok(None)), &key()).await;
        assert_eq!(doc, LyricsDocument::unsynced(NOT_AVAILABLE_TEXT));

        let doc = fetch_document(&Fixed(Ok(Some(payload(None, false)))), &key()).await;
        assert_eq!(doc.raw, NOT_AVAILABLE_TEXT);
    }

    #[tokio::test]
    async fn test_failed_request() {
        let source = Fixed(Err(SourceError::Status(500)));
        let doc = fetch_document(&source, &key()).await;
        assert_eq!(doc, LyricsDocument::unsynced(FAILED_TEXT));
    }

    #[tokio::test]
    async fn test_request_reports_on_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let fetcher = LyricsFetcher::new(Arc::new(Fixed(Ok(None))), tx);
        let request = LyricsRequest {
            track: key(),
            generation: 7,
        };

        fetcher.request(request.clone());

        let fetched = rx.recv().await.unwrap();
        assert_eq!(fetched.request, request);
        assert_eq!(fetched.document, LyricsDocument::not_available());
    }
}
