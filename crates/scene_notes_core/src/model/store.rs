//! Ordered note sequence with an active-index cursor.
//!
//! # Responsibility
//! - Own every mutation of the note sequence (append, remove, move cursor).
//! - Produce the one-line status summary for the most recent note.
//!
//! # Invariants
//! - Insertion order is the only order; notes are never re-sorted.
//! - `active_index < notes.len()` whenever `notes` is non-empty.
//! - `active_index == 0` whenever `notes` is empty.
//! - Only `text` of an existing note is ever mutated.

use crate::model::note::{created_at_now, Note, ViewSnapshot};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Character width available to the status-bar summary.
pub const SUMMARY_WIDTH: usize = 80;
const SUMMARY_ELLIPSIS: &str = "...";

/// Cursor movement for `NoteStore::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Previous,
}

/// Frame and view context supplied by the caller on append.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCapture {
    pub frame: i64,
    pub view: Option<ViewSnapshot>,
}

/// Errors for store operations that require an active note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteStoreError {
    /// The store has no notes, so there is no active note.
    Empty,
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "note store is empty; no active note"),
        }
    }
}

impl Error for NoteStoreError {}

/// Ordered notes plus the active-index cursor.
///
/// Serialize-only: persisted stores come back through `from_parts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NoteStore {
    notes: Vec<Note>,
    active_index: usize,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted parts.
    ///
    /// An out-of-range `active_index` is clamped to the last note (or `0`
    /// when empty) so a stale cursor can never escape the sequence.
    pub fn from_parts(notes: Vec<Note>, active_index: usize) -> Self {
        let active_index = active_index.min(notes.len().saturating_sub(1));
        Self {
            notes,
            active_index,
        }
    }

    /// Appends a new empty note stamped with the current local time.
    pub fn append(&mut self, capture: ViewCapture) -> &Note {
        self.append_at(capture, created_at_now())
    }

    /// Appends a new empty note with an explicit creation timestamp.
    ///
    /// The new note always becomes active.
    pub fn append_at(&mut self, capture: ViewCapture, created_at: impl Into<String>) -> &Note {
        let mut note = Note::new();
        note.created_at = Some(created_at.into());
        note.frame = capture.frame;
        note.view = capture.view;
        self.notes.push(note);
        self.active_index = self.notes.len() - 1;
        &self.notes[self.active_index]
    }

    /// Moves the cursor one step without wrapping.
    ///
    /// Returns `true` when the cursor moved. Boundaries and an empty store are
    /// no-ops.
    pub fn advance(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Next if self.active_index + 1 < self.notes.len() => {
                self.active_index += 1;
                true
            }
            Direction::Previous if self.active_index > 0 && !self.notes.is_empty() => {
                self.active_index -= 1;
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the active note; `None` on an empty store.
    pub fn delete_active(&mut self) -> Option<Note> {
        if self.notes.is_empty() {
            return None;
        }

        let removed = self.notes.remove(self.active_index);
        if self.notes.is_empty() {
            self.active_index = 0;
        } else if self.active_index >= self.notes.len() {
            self.active_index = self.notes.len() - 1;
        }
        Some(removed)
    }

    /// Replaces the text of the active note in place.
    pub fn edit_active_text(&mut self, text: impl Into<String>) -> Result<(), NoteStoreError> {
        let note = self
            .notes
            .get_mut(self.active_index)
            .ok_or(NoteStoreError::Empty)?;
        note.text = text.into();
        Ok(())
    }

    /// Status-bar summary of the last note, or `None` when empty.
    pub fn summary(&self) -> Option<String> {
        let last = self.notes.len().checked_sub(1)?;
        Some(summarize(last, &self.notes[last].text))
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> Option<&Note> {
        self.notes.get(self.active_index)
    }

    pub fn last(&self) -> Option<&Note> {
        self.notes.last()
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Renders the `V{n} - text` label for the note at zero-based `index`.
///
/// Newlines become spaces and the text is cut to fit `SUMMARY_WIDTH`
/// characters including the prefix, with `...` appended after a cut.
pub fn summarize(index: usize, text: &str) -> String {
    let label = format!("V{}", index + 1);
    if text.is_empty() {
        return label;
    }

    let prefix = format!("{label} - ");
    let budget = SUMMARY_WIDTH.saturating_sub(prefix.chars().count());
    let flattened = text.replace('\n', " ");
    let mut display = if flattened.chars().count() > budget {
        let mut cut = flattened.chars().take(budget).collect::<String>();
        cut.push_str(SUMMARY_ELLIPSIS);
        cut
    } else {
        flattened
    };
    display.insert_str(0, &prefix);
    display
}
