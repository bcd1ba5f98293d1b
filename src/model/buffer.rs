//! Text buffer - one document's content and its undo/redo history
//!
//! All mutation goes through [`EditCommand`] so every change can be undone.
//! Offsets are character offsets into the content; lines are delimited by
//! `\n` only.

use std::cell::OnceCell;

use ropey::Rope;

use super::command::EditCommand;
use super::history::EditHistory;

/// What a committed mutation changed, for the owner to turn into notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferChange {
    /// The text content changed
    pub content_changed: bool,
    /// The dirty flag flipped to this value
    pub dirty_changed: Option<bool>,
    /// The line count changed to this value
    pub line_count_changed: Option<usize>,
}

impl BufferChange {
    /// True when nothing observable changed
    pub fn is_empty(&self) -> bool {
        !self.content_changed
            && self.dirty_changed.is_none()
            && self.line_count_changed.is_none()
    }
}

/// Result of an edit primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStatus {
    /// The edit was applied and recorded
    Applied(BufferChange),
    /// Nothing to do (empty edit, identical content, nothing to undo/redo)
    Unchanged,
    /// Position or length fell outside the content; nothing was recorded
    OutOfRange,
}

impl EditStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The change report, if the edit was applied
    pub fn change(&self) -> Option<BufferChange> {
        match self {
            Self::Applied(change) => Some(*change),
            _ => None,
        }
    }
}

/// A text buffer with a linear undo/redo history
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    history: EditHistory,
    /// Dirty flag as last reported, used to detect transitions
    reported_dirty: bool,
    /// Line count as last reported, tracked per buffer
    last_known_line_count: usize,
    /// Flattened content, rebuilt lazily after a mutation
    content_cache: OnceCell<String>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer with unbounded history
    pub fn new() -> Self {
        Self::with_history_limit(None)
    }

    /// Create an empty buffer keeping at most `limit` history entries
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            rope: Rope::new(),
            history: EditHistory::with_max_size(limit),
            reported_dirty: false,
            last_known_line_count: 1,
            content_cache: OnceCell::new(),
        }
    }

    /// Create a clean buffer holding `text`
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.load_from(text);
        buffer
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Replace the content wholesale and forget all history.
    ///
    /// The loaded text becomes the saved state.
    pub fn load_from(&mut self, text: &str) -> BufferChange {
        self.rope = Rope::from_str(text);
        self.history.clear();
        self.after_mutation(true)
    }

    /// Full current content
    pub fn content(&self) -> &str {
        self.content_cache.get_or_init(|| self.rope.to_string())
    }

    /// The underlying rope, for zero-copy iteration
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Replace the whole content with `text` as a single undoable edit
    pub fn set_content(&mut self, text: &str) -> EditStatus {
        if self.content() == text {
            return EditStatus::Unchanged;
        }
        let old = self.content().to_owned();
        EditStatus::Applied(self.commit(EditCommand::replace(0, old, text)))
    }

    /// Insert `text` at character offset `position`
    pub fn insert(&mut self, position: usize, text: &str) -> EditStatus {
        if position > self.len_chars() {
            tracing::trace!(position, len = self.len_chars(), "insert out of range");
            return EditStatus::OutOfRange;
        }
        if text.is_empty() {
            return EditStatus::Unchanged;
        }
        EditStatus::Applied(self.commit(EditCommand::insert(position, text)))
    }

    /// Remove `length` characters starting at `position`
    pub fn remove(&mut self, position: usize, length: usize) -> EditStatus {
        let Some(end) = self.checked_span(position, length) else {
            tracing::trace!(position, length, "remove out of range");
            return EditStatus::OutOfRange;
        };
        if length == 0 {
            return EditStatus::Unchanged;
        }
        let removed = self.rope.slice(position..end).to_string();
        EditStatus::Applied(self.commit(EditCommand::remove(position, removed)))
    }

    /// Replace `length` characters starting at `position` with `text`
    pub fn replace(&mut self, position: usize, length: usize, text: &str) -> EditStatus {
        let Some(end) = self.checked_span(position, length) else {
            tracing::trace!(position, length, "replace out of range");
            return EditStatus::OutOfRange;
        };
        let removed = self.rope.slice(position..end).to_string();
        if removed == text {
            return EditStatus::Unchanged;
        }
        EditStatus::Applied(self.commit(EditCommand::replace(position, removed, text)))
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Revert the most recent applied command
    pub fn undo(&mut self) -> EditStatus {
        let Some(command) = self.history.step_back() else {
            return EditStatus::Unchanged;
        };
        command.revert(&mut self.rope);
        EditStatus::Applied(self.after_mutation(true))
    }

    /// Re-apply the most recently undone command
    pub fn redo(&mut self) -> EditStatus {
        let Some(command) = self.history.step_forward() else {
            return EditStatus::Unchanged;
        };
        command.apply(&mut self.rope);
        EditStatus::Applied(self.after_mutation(true))
    }

    /// Record the current state as saved
    pub fn mark_saved(&mut self) -> BufferChange {
        self.history.mark_clean();
        self.after_mutation(false)
    }

    /// True iff the history cursor differs from the saved position
    pub fn is_dirty(&self) -> bool {
        !self.history.is_clean()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    /// Total number of recorded commands, applied or undone
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Content length in characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of lines: one more than the number of `\n`
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of line `line`, without its terminating newline
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    /// Character offset where line `line` starts
    pub fn line_start_offset(&self, line: usize) -> Option<usize> {
        if line >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.line_to_char(line))
    }

    /// Length of line `line` in characters, excluding the newline
    pub fn line_length(&self, line: usize) -> Option<usize> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        let newline = len > 0 && slice.char(len - 1) == '\n';
        Some(len - usize::from(newline))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// End offset of `position + length`, if the span lies within the content
    fn checked_span(&self, position: usize, length: usize) -> Option<usize> {
        position
            .checked_add(length)
            .filter(|end| *end <= self.rope.len_chars())
    }

    fn commit(&mut self, command: EditCommand) -> BufferChange {
        command.apply(&mut self.rope);
        self.history.push(command);
        self.after_mutation(true)
    }

    fn after_mutation(&mut self, content_changed: bool) -> BufferChange {
        if content_changed {
            self.content_cache = OnceCell::new();
        }

        let dirty = self.is_dirty();
        let dirty_changed = (dirty != self.reported_dirty).then_some(dirty);
        self.reported_dirty = dirty;

        let lines = self.rope.len_lines();
        let line_count_changed = (lines != self.last_known_line_count).then_some(lines);
        self.last_known_line_count = lines;

        BufferChange {
            content_changed,
            dirty_changed,
            line_count_changed,
        }
    }
}
