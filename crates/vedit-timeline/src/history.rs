//! Snapshot-based undo/redo.
//!
//! Each discrete edit records a full copy of the editable state. The
//! history is a bounded list with a cursor pointing at the snapshot that
//! matches the live state.

use std::time::SystemTime;
use tracing::debug;

use crate::editing::EditingState;
use crate::project::Timeline;

/// Full copy of the editable state at one point in time.
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    /// What produced this snapshot ("split clip", "import media", ...)
    pub label: String,
    pub captured_at: SystemTime,
    pub timeline: Timeline,
    pub editing: EditingState,
}

impl EditorSnapshot {
    pub fn capture(label: impl Into<String>, timeline: &Timeline, editing: &EditingState) -> Self {
        Self {
            label: label.into(),
            captured_at: SystemTime::now(),
            timeline: timeline.clone(),
            editing: editing.clone(),
        }
    }

    /// Whether two snapshots hold the same editable state, ignoring
    /// label and capture time.
    pub fn same_state(&self, other: &Self) -> bool {
        self.timeline == other.timeline && self.editing == other.editing
    }
}

/// Bounded undo/redo list with a cursor.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<EditorSnapshot>,
    cursor: usize,
    max_entries: usize,
}

impl HistoryManager {
    /// Create an empty history keeping at most `max_entries` snapshots.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Seed the history with the starting state. Does nothing once any
    /// snapshot exists. Returns whether the seed was taken.
    pub fn initialize(&mut self, snapshot: EditorSnapshot) -> bool {
        if !self.entries.is_empty() {
            return false;
        }
        self.entries.push(snapshot);
        self.cursor = 0;
        true
    }

    /// Record a snapshot after the cursor, discarding any redo entries and
    /// the oldest entries beyond the limit.
    pub fn save(&mut self, snapshot: EditorSnapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(snapshot);
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
        debug!(
            label = %self.entries[self.cursor].label,
            cursor = self.cursor,
            len = self.entries.len(),
            "history saved"
        );
    }

    /// Step back one snapshot. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&EditorSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "undo");
        self.entries.get(self.cursor)
    }

    /// Step forward one snapshot. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&EditorSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "redo");
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor < self.entries.len() - 1
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&EditorSnapshot> {
        self.entries.get(self.cursor)
    }

    /// Cursor position, `None` while empty.
    pub fn cursor(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Labels from oldest to newest.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.label.as_str())
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(vedit_core::defaults::HISTORY_LIMIT)
    }
}
