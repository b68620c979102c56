//! Terminal presentation of sync events.
//!
//! Prints the track header when the track changes and each lyric line as it
//! becomes active. Unsynced lyrics are printed in full once.

use std::io::{self, Write};
use std::sync::Arc;

use crate::lyrics::LyricsDocument;
use crate::models::TrackSnapshot;
use crate::sync::SyncEvent;

pub const NO_TRACK_TEXT: &str = "No track playing";
pub const LOADING_TEXT: &str = "Loading lyrics...";

/// Format milliseconds as `m:ss`.
pub fn format_time(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `progress / duration`, both as `m:ss`.
pub fn format_progress(track: &TrackSnapshot) -> String {
    format!(
        "{} / {}",
        format_time(track.progress_ms),
        format_time(track.duration_ms)
    )
}

/// Renders [`SyncEvent`]s to a writer.
pub struct TerminalView<W> {
    out: W,
    track: Option<TrackSnapshot>,
    lyrics: Option<Arc<LyricsDocument>>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            track: None,
            lyrics: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn handle(&mut self, event: &SyncEvent) -> io::Result<()> {
        match event {
            SyncEvent::TrackUpdated(track) => {
                let is_new = self
                    .track
                    .as_ref()
                    .is_none_or(|current| current.key() != track.key());
                if is_new {
                    self.print_header(track)?;
                }
                self.track = Some(track.clone());
            }
            SyncEvent::TrackCleared => {
                self.track = None;
                writeln!(self.out, "{}", NO_TRACK_TEXT)?;
            }
            SyncEvent::LyricsReplaced(document) => {
                self.scroll_to_top()?;
                if !document.synced {
                    writeln!(self.out, "{}", document.raw)?;
                }
                self.lyrics = Some(document.clone());
            }
            SyncEvent::LyricsCleared => {
                self.lyrics = None;
            }
            SyncEvent::ActiveLineChanged(Some(index)) => self.scroll_into_view(*index)?,
            SyncEvent::ActiveLineChanged(None) => {}
            SyncEvent::ErrorChanged(Some(message)) => writeln!(self.out, "! {}", message)?,
            SyncEvent::ErrorChanged(None) | SyncEvent::SessionExpired => {}
        }
        self.out.flush()
    }

    fn print_header(&mut self, track: &TrackSnapshot) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "♪ {} - {} [{}]",
            track.name,
            track.artist,
            format_progress(track)
        )?;
        if !track.album.is_empty() {
            writeln!(self.out, "  {}", track.album)?;
        }
        writeln!(self.out, "  {}", LOADING_TEXT)
    }

    fn scroll_to_top(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(40))
    }

    fn scroll_into_view(&mut self, index: usize) -> io::Result<()> {
        let Some(line) = self.lyrics.as_ref().and_then(|doc| doc.lines.get(index)) else {
            return Ok(());
        };
        let position = match &self.track {
            Some(track) => format_progress(track),
            None => format_time(line.offset_ms),
        };
        writeln!(self.out, "[{}] {}", position, line.text)
    }
}
