//! Linear undo/redo over whole-pipeline snapshots.
//!
//! History stores complete [`Pipeline`]s, never parameter deltas, so
//! stepping back or forward always restores a consistent set of
//! operations. Recording a new edit discards the redo stack: there is no
//! branching.

use std::collections::VecDeque;

use crate::pipeline::Pipeline;

#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: VecDeque<Pipeline>,
    redo_stack: Vec<Pipeline>,
    limit: Option<usize>,
}

impl History {
    /// Unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` undo steps, dropping the oldest.
    /// A limit of zero disables undo entirely.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Save the pipeline that is about to be replaced by a new edit.
    pub fn record(&mut self, old: Pipeline) {
        self.redo_stack.clear();
        self.undo_stack.push_back(old);
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
    }

    /// Step back. Returns `None` (and changes nothing) when there is no
    /// earlier state; otherwise `current` moves onto the redo stack.
    pub fn undo(&mut self, current: Pipeline) -> Option<Pipeline> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward. Returns `None` (and changes nothing) when nothing has
    /// been undone since the last edit.
    pub fn redo(&mut self, current: Pipeline) -> Option<Pipeline> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        Some(next)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;

    fn pipeline(brightness: i32) -> Pipeline {
        Pipeline::new(vec![Operation::brightness_contrast(brightness, 1.0)])
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::new();
        assert_eq!(history.undo(pipeline(1)), None);
        assert_eq!(history.redo(pipeline(1)), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_returns_recorded_pipeline() {
        let mut history = History::new();
        history.record(Pipeline::empty());

        let restored = history.undo(pipeline(10));
        assert_eq!(restored, Some(Pipeline::empty()));
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn test_redo_returns_undone_pipeline() {
        let mut history = History::new();
        history.record(Pipeline::empty());
        let previous = history.undo(pipeline(10)).unwrap();

        assert_eq!(history.redo(previous), Some(pipeline(10)));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(Pipeline::empty());
        history.record(pipeline(1));
        let _ = history.undo(pipeline(2));
        assert!(history.can_redo());

        history.record(pipeline(1));
        assert!(!history.can_redo());
        assert_eq!(history.redo(pipeline(3)), None);
    }

    #[test]
    fn test_failed_undo_does_not_mutate() {
        let mut history = History::new();
        history.record(Pipeline::empty());
        let _ = history.undo(pipeline(1));
        assert_eq!(history.undo(pipeline(2)), None);
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 1);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.record(Pipeline::empty());
        history.record(pipeline(1));
        let _ = history.undo(pipeline(2));
        history.clear();
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(2));
        history.record(pipeline(1));
        history.record(pipeline(2));
        history.record(pipeline(3));
        assert_eq!(history.undo_depth(), 2);

        assert_eq!(history.undo(pipeline(4)), Some(pipeline(3)));
        assert_eq!(history.undo(pipeline(3)), Some(pipeline(2)));
        assert_eq!(history.undo(pipeline(2)), None);
    }

    #[test]
    fn test_zero_limit_disables_undo() {
        let mut history = History::with_limit(Some(0));
        history.record(pipeline(1));
        assert!(!history.can_undo());
    }
}
