//! Maps playback progress to the active lyric line.

use super::parser::LyricLine;

/// Find the line that should be highlighted at `progress_ms`.
///
/// Returns the greatest index whose offset is at or before the progress, or
/// `None` when playback hasn't reached the first line yet.
pub fn active_line_index(lines: &[LyricLine], progress_ms: i64) -> Option<usize> {
    if progress_ms < 0 {
        return None;
    }
    let progress = progress_ms as u64;

    lines.iter().rposition(|line| line.offset_ms <= progress)
}

/// Remembers the displayed line and reports only real changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionTracker {
    active: Option<usize>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed line index.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Recompute the active line.
    ///
    /// Returns `Some(new_index)` when it differs from the displayed one,
    /// `None` when nothing changed. `new_index` itself may be `None` when
    /// playback moved back before the first line.
    pub fn update(&mut self, lines: &[LyricLine], progress_ms: i64) -> Option<Option<usize>> {
        let index = active_line_index(lines, progress_ms);
        if index == self.active {
            return None;
        }
        self.active = index;
        Some(index)
    }

    /// Forget the displayed line (new document).
    pub fn reset(&mut self) {
        self.active = None;
    }
}
