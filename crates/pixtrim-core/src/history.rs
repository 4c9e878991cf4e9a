//! Linear undo/redo history of buffer snapshots.
//!
//! The top of the undo stack is always the active buffer. The first entry is
//! never popped by `undo`; it is the loaded image unless a history limit has
//! evicted it. Recording a new edit drops every redo entry.

use crate::buffer::ImageBuffer;

#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<ImageBuffer>,
    redo_stack: Vec<ImageBuffer>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` entries (at least one).
    ///
    /// Once full, recording evicts the oldest entries, including the loaded
    /// image: undo then stops at the oldest surviving snapshot. `None` keeps
    /// every entry.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|limit| limit.max(1)),
            ..Self::default()
        }
    }

    /// Push a committed snapshot and clear the redo stack.
    pub fn record(&mut self, snapshot: ImageBuffer) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            let overflow = self.undo_stack.len().saturating_sub(limit);
            if overflow > 0 {
                self.undo_stack.drain(..overflow);
                tracing::debug!(overflow, limit, "evicted oldest history entries");
            }
        }
    }

    /// Step back one entry. Returns the new active buffer, or `None` when only
    /// the base entry is left.
    pub fn undo(&mut self) -> Option<&ImageBuffer> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let top = self.undo_stack.pop()?;
        self.redo_stack.push(top);
        self.undo_stack.last()
    }

    /// Re-apply the most recently undone entry.
    pub fn redo(&mut self) -> Option<&ImageBuffer> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(snapshot);
        self.undo_stack.last()
    }

    /// The active (most recently committed) snapshot.
    pub fn current(&self) -> Option<&ImageBuffer> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of entries in the undo stack, including the active one.
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> ImageBuffer {
        ImageBuffer::new(width, height, vec![value; (width * height * 3) as usize]).unwrap()
    }

    #[test]
    fn empty_history_has_nothing_to_do() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn undo_on_single_entry_is_noop() {
        let mut history = History::new();
        history.record(solid(4, 4, 1));

        assert!(history.undo().is_none());
        assert_eq!(history.len(), 1);
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.current(), Some(&solid(4, 4, 1)));
    }

    #[test]
    fn undo_restores_previous_snapshot() {
        let mut history = History::new();
        history.record(solid(4, 4, 1));
        history.record(solid(2, 2, 2));

        assert_eq!(history.undo(), Some(&solid(4, 4, 1)));
        assert_eq!(history.len(), 1);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn redo_restores_undone_snapshot() {
        let mut history = History::new();
        history.record(solid(4, 4, 1));
        history.record(solid(2, 2, 2));
        history.undo();

        assert_eq!(history.redo(), Some(&solid(2, 2, 2)));
        assert_eq!(history.len(), 2);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn redo_with_empty_stack_is_noop() {
        let mut history = History::new();
        history.record(solid(4, 4, 1));

        assert!(history.redo().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn record_clears_redo_stack() {
        let mut history = History::new();
        history.record(solid(4, 4, 1));
        history.record(solid(3, 3, 2));
        history.undo();
        assert!(history.can_redo());

        history.record(solid(2, 2, 3));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn multiple_undo_redo_walk_in_order() {
        let mut history = History::new();
        for value in 1..=4 {
            history.record(solid(2, 2, value));
        }

        assert_eq!(history.undo(), Some(&solid(2, 2, 3)));
        assert_eq!(history.undo(), Some(&solid(2, 2, 2)));
        assert_eq!(history.undo(), Some(&solid(2, 2, 1)));
        assert!(history.undo().is_none());

        assert_eq!(history.redo(), Some(&solid(2, 2, 2)));
        assert_eq!(history.redo(), Some(&solid(2, 2, 3)));
        assert_eq!(history.redo(), Some(&solid(2, 2, 4)));
        assert!(history.redo().is_none());
    }

    #[test]
    fn limit_evicts_oldest_entries() {
        let mut history = History::with_limit(Some(2));
        history.record(solid(2, 2, 1));
        history.record(solid(2, 2, 2));
        history.record(solid(2, 2, 3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(), Some(&solid(2, 2, 2)));
        assert!(history.undo().is_none());
    }

    #[test]
    fn unlimited_history_keeps_loaded_image() {
        let mut history = History::with_limit(None);
        for value in 1..=50 {
            history.record(solid(1, 1, value));
        }

        while history.undo().is_some() {}
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(&solid(1, 1, 1)));
    }

    #[test]
    fn zero_limit_keeps_one_entry() {
        let mut history = History::with_limit(Some(0));
        history.record(solid(2, 2, 1));
        history.record(solid(2, 2, 2));

        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(&solid(2, 2, 2)));
    }

    #[test]
    fn clear_drops_everything() {
        let mut history = History::new();
        history.record(solid(2, 2, 1));
        history.record(solid(2, 2, 2));
        history.undo();
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.redo_len(), 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
