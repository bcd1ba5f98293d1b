//! Linear edit history with a cursor and a clean mark

use super::command::EditCommand;

/// Ordered log of edit commands.
///
/// Commands before `cursor` are applied, commands at or after it have been
/// undone and can be redone. `clean_mark` is the cursor position that matches
/// the last save; `None` means the saved state is no longer reachable.
#[derive(Debug, Clone)]
pub struct EditHistory {
    commands: Vec<EditCommand>,
    cursor: usize,
    clean_mark: Option<usize>,
    max_size: Option<usize>,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            clean_mark: Some(0),
            max_size: None,
        }
    }

    /// Create a history that keeps at most `max_size` commands
    pub fn with_max_size(max_size: Option<usize>) -> Self {
        Self {
            max_size,
            ..Self::new()
        }
    }

    /// Record a newly applied command.
    ///
    /// Drops any undone tail first. When the size limit is exceeded the
    /// oldest commands are evicted and the cursor and clean mark shift with
    /// them.
    pub fn push(&mut self, command: EditCommand) {
        if self.cursor < self.commands.len() {
            self.commands.truncate(self.cursor);
            if self.clean_mark.is_some_and(|mark| mark > self.cursor) {
                self.clean_mark = None;
            }
        }
        self.commands.push(command);
        self.cursor += 1;

        if let Some(max) = self.max_size {
            let excess = self.commands.len().saturating_sub(max);
            if excess > 0 {
                self.commands.drain(..excess);
                self.cursor -= excess;
                self.clean_mark = self
                    .clean_mark
                    .and_then(|mark| mark.checked_sub(excess));
            }
        }
    }

    /// Move the cursor back one step, returning the command to revert
    pub fn step_back(&mut self) -> Option<&EditCommand> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.commands.get(self.cursor)
    }

    /// Move the cursor forward one step, returning the command to re-apply
    pub fn step_forward(&mut self) -> Option<&EditCommand> {
        if self.cursor >= self.commands.len() {
            return None;
        }
        self.cursor += 1;
        self.commands.get(self.cursor - 1)
    }

    /// Record the current cursor as the saved state
    pub fn mark_clean(&mut self) {
        self.clean_mark = Some(self.cursor);
    }

    /// True iff the cursor sits on the clean mark
    pub fn is_clean(&self) -> bool {
        self.clean_mark == Some(self.cursor)
    }

    /// Forget every command and treat the empty history as saved
    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
        self.clean_mark = Some(0);
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Number of applied commands
    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    /// Number of undone commands still available for redo
    pub fn redo_count(&self) -> usize {
        self.commands.len() - self.cursor
    }

    /// Total number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clean_mark(&self) -> Option<usize> {
        self.clean_mark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(pos: usize, text: &str) -> EditCommand {
        EditCommand::insert(pos, text)
    }

    #[test]
    fn test_history_undo_redo() {
        let mut history = EditHistory::new();
        history.push(insert(0, "a"));
        history.push(insert(1, "b"));

        assert_eq!(history.undo_count(), 2);
        assert!(!history.can_redo());

        let undone = history.step_back().cloned().unwrap();
        assert_eq!(undone.inserted_text(), "b");
        assert!(history.can_redo());

        let redone = history.step_forward().cloned().unwrap();
        assert_eq!(redone, undone);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_step_past_ends_is_none() {
        let mut history = EditHistory::new();
        assert!(history.step_back().is_none());
        assert!(history.step_forward().is_none());

        history.push(insert(0, "a"));
        assert!(history.step_forward().is_none());
        assert!(history.step_back().is_some());
        assert!(history.step_back().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_push_truncates_undone_tail() {
        let mut history = EditHistory::new();
        history.push(insert(0, "a"));
        history.push(insert(1, "b"));
        history.step_back();

        history.push(insert(1, "c"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_clean_mark_follows_cursor() {
        let mut history = EditHistory::new();
        assert!(history.is_clean());

        history.push(insert(0, "a"));
        assert!(!history.is_clean());

        history.mark_clean();
        assert!(history.is_clean());

        history.step_back();
        assert!(!history.is_clean());
        history.step_forward();
        assert!(history.is_clean());
    }

    #[test]
    fn test_clean_mark_in_discarded_tail_is_lost() {
        let mut history = EditHistory::new();
        history.push(insert(0, "a"));
        history.mark_clean();
        history.step_back();

        history.push(insert(0, "b"));
        assert_eq!(history.clean_mark(), None);

        history.step_back();
        assert!(!history.is_clean());
    }

    #[test]
    fn test_history_max_size() {
        let mut history = EditHistory::with_max_size(Some(3));
        for i in 0..5 {
            history.push(insert(i, &i.to_string()));
        }

        assert_eq!(history.undo_count(), 3);
        assert_eq!(history.len(), 3);
        // the initial clean state was evicted
        assert_eq!(history.clean_mark(), None);
    }

    #[test]
    fn test_max_size_shifts_clean_mark() {
        let mut history = EditHistory::with_max_size(Some(2));
        history.push(insert(0, "a"));
        history.push(insert(1, "b"));
        history.mark_clean();
        history.push(insert(2, "c"));

        assert_eq!(history.clean_mark(), Some(1));
        history.step_back();
        assert!(history.is_clean());
    }

    #[test]
    fn test_clear_resets_to_clean() {
        let mut history = EditHistory::new();
        history.push(insert(0, "a"));
        history.clear();

        assert!(history.is_empty());
        assert!(history.is_clean());
        assert!(!history.can_undo());
    }
}
