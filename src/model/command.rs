//! Reversible edit commands recorded in a buffer's history

use ropey::Rope;

/// A single reversible mutation of a text buffer.
///
/// A command replaces `removed_text` at `position` with `inserted_text`.
/// Pure inserts have an empty `removed_text`, pure deletes an empty
/// `inserted_text`. Commands are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    /// Character offset where the edit starts
    position: usize,
    /// Text present at `position` before the edit
    removed_text: String,
    /// Text present at `position` after the edit
    inserted_text: String,
}

impl EditCommand {
    /// Create an insert command
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            removed_text: String::new(),
            inserted_text: text.into(),
        }
    }

    /// Create a delete command
    pub fn remove(position: usize, removed: impl Into<String>) -> Self {
        Self {
            position,
            removed_text: removed.into(),
            inserted_text: String::new(),
        }
    }

    /// Create a replace command
    pub fn replace(
        position: usize,
        removed: impl Into<String>,
        inserted: impl Into<String>,
    ) -> Self {
        Self {
            position,
            removed_text: removed.into(),
            inserted_text: inserted.into(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn removed_text(&self) -> &str {
        &self.removed_text
    }

    pub fn inserted_text(&self) -> &str {
        &self.inserted_text
    }

    /// Number of characters removed by the forward edit
    pub fn removed_len(&self) -> usize {
        self.removed_text.chars().count()
    }

    /// Number of characters inserted by the forward edit
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// The command that reverses this one
    pub fn inverse(&self) -> Self {
        Self {
            position: self.position,
            removed_text: self.inserted_text.clone(),
            inserted_text: self.removed_text.clone(),
        }
    }

    /// Apply the forward effect to `rope`.
    ///
    /// The caller guarantees the rope holds `removed_text` at `position`;
    /// this is true by construction for every command replayed from history.
    pub fn apply(&self, rope: &mut Rope) {
        let end = self.position + self.removed_len();
        if end > self.position {
            rope.remove(self.position..end);
        }
        if !self.inserted_text.is_empty() {
            rope.insert(self.position, &self.inserted_text);
        }
    }

    /// Apply the reverse effect to `rope`
    pub fn revert(&self, rope: &mut Rope) {
        let end = self.position + self.inserted_len();
        if end > self.position {
            rope.remove(self.position..end);
        }
        if !self.removed_text.is_empty() {
            rope.insert(self.position, &self.removed_text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_command() {
        let cmd = EditCommand::insert(5, "hello");
        assert_eq!(cmd.position(), 5);
        assert!(cmd.removed_text().is_empty());
        assert_eq!(cmd.inserted_text(), "hello");
    }

    #[test]
    fn test_inverse_swaps_texts() {
        let cmd = EditCommand::replace(5, "old", "new");
        let inv = cmd.inverse();
        assert_eq!(inv.position(), 5);
        assert_eq!(inv.removed_text(), "new");
        assert_eq!(inv.inserted_text(), "old");
        assert_eq!(inv.inverse(), cmd);
    }

    #[test]
    fn test_apply_then_revert_restores_rope() {
        let mut rope = Rope::from_str("hello world");
        let cmd = EditCommand::replace(6, "world", "there, friend");

        cmd.apply(&mut rope);
        assert_eq!(rope.to_string(), "hello there, friend");

        cmd.revert(&mut rope);
        assert_eq!(rope.to_string(), "hello world");
    }

    #[test]
    fn test_lengths_count_chars_not_bytes() {
        let cmd = EditCommand::replace(0, "héllo", "日本");
        assert_eq!(cmd.removed_len(), 5);
        assert_eq!(cmd.inserted_len(), 2);

        let mut rope = Rope::from_str("héllo!");
        cmd.apply(&mut rope);
        assert_eq!(rope.to_string(), "日本!");
        cmd.revert(&mut rope);
        assert_eq!(rope.to_string(), "héllo!");
    }
}
