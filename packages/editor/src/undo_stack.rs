//! # Undo/Redo History
//!
//! Linear log of full-document snapshots with a cursor.
//!
//! ## Design
//!
//! - Entry 0 is the document as loaded; every committed mutation appends
//!   a snapshot of the resulting document
//! - The entry under the cursor always equals the live document
//! - Undo/redo only move the cursor; entries are never rewritten
//! - Recording after an undo discards the entries past the cursor
//! - Past `max_entries` the oldest entry is evicted
//!
//! Snapshots are owned clones. Nothing in a snapshot is shared with the
//! live document, so editing the live tree can never reach back into
//! history.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = UndoStack::new(DesignDocument::default());
//! history.record("Add hero section", doc.clone());
//!
//! let previous = history.undo().cloned();
//! let next = history.redo().cloned();
//! ```

use crate::DesignDocument;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Description of the action that produced this snapshot
    pub label: String,
    pub snapshot: DesignDocument,
}

#[derive(Debug, Clone)]
pub struct UndoStack {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    max_entries: usize,
}

impl UndoStack {
    /// Create a history whose first entry is `initial`
    pub fn new(initial: DesignDocument) -> Self {
        Self::with_max_entries(initial, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_entries(initial: DesignDocument, max_entries: usize) -> Self {
        let mut stack = Self {
            entries: VecDeque::new(),
            cursor: 0,
            max_entries: max_entries.max(1),
        };
        stack.reset(initial);
        stack
    }

    /// Drop all history and start over from `initial`
    pub fn reset(&mut self, initial: DesignDocument) {
        self.entries.clear();
        self.entries.push_back(HistoryEntry {
            label: "Initial state".to_string(),
            snapshot: initial,
        });
        self.cursor = 0;
    }

    /// Append a snapshot after the cursor, discarding any redo branch
    pub fn record(&mut self, label: impl Into<String>, snapshot: DesignDocument) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(HistoryEntry {
            label: label.into(),
            snapshot,
        });
        self.cursor = self.entries.len() - 1;

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
            self.cursor -= 1;
        }
    }

    /// Step back one entry and return the snapshot now under the cursor
    pub fn undo(&mut self) -> Option<&DesignDocument> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(|e| &e.snapshot)
    }

    /// Step forward one entry and return the snapshot now under the cursor
    pub fn redo(&mut self) -> Option<&DesignDocument> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).map(|e| &e.snapshot)
    }

    pub fn current(&self) -> Option<&DesignDocument> {
        self.entries.get(self.cursor).map(|e| &e.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Label of the action the next undo would revert
    pub fn undo_label(&self) -> Option<&str> {
        if self.can_undo() {
            self.entries.get(self.cursor).map(|e| e.label.as_str())
        } else {
            None
        }
    }

    /// Label of the action the next redo would reapply
    pub fn redo_label(&self) -> Option<&str> {
        self.entries.get(self.cursor + 1).map(|e| e.label.as_str())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
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
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DesignDocument::default())
    }
}
