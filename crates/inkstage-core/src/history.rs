//! Bounded linear undo/redo history.
//!
//! The history stores whole snapshots. Callers decide what a snapshot is; the
//! canvas records its shared element collection so that an unchanged
//! collection compares equal by pointer and costs nothing to keep.

use std::collections::VecDeque;

/// Undo and redo stacks of snapshots.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    future: Vec<T>,
    limit: usize,
    same: fn(&T, &T) -> bool,
}

impl<T: PartialEq> History<T> {
    /// History that coalesces snapshots comparing equal with `==`.
    pub fn new(limit: usize) -> Self {
        Self::with_equality(limit, |a, b| a == b)
    }
}

impl<T> History<T> {
    /// History that coalesces snapshots for which `same` returns true.
    pub fn with_equality(limit: usize, same: fn(&T, &T) -> bool) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit: limit.max(1),
            same,
        }
    }

    /// Record a transition from `previous` to `next`.
    ///
    /// Returns false when the two snapshots are the same, in which case
    /// nothing is recorded. Any redo history is discarded otherwise.
    pub fn record(&mut self, previous: T, next: &T) -> bool {
        if (self.same)(&previous, next) {
            return false;
        }
        self.past.push_back(previous);
        if self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
        true
    }

    /// Step back. Takes the current snapshot and returns the one to restore.
    pub fn undo(&mut self, current: T) -> Result<T, T> {
        match self.past.pop_back() {
            Some(previous) => {
                self.future.push(current);
                Ok(previous)
            }
            None => Err(current),
        }
    }

    /// Step forward. Takes the current snapshot and returns the one to restore.
    pub fn redo(&mut self, current: T) -> Result<T, T> {
        match self.future.pop() {
            Some(next) => {
                self.past.push_back(current);
                if self.past.len() > self.limit {
                    self.past.pop_front();
                }
                Ok(next)
            }
            None => Err(current),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_record_and_undo() {
        let mut history = History::new(10);
        assert!(history.record(1, &2));
        assert!(history.record(2, &3));
        assert_eq!(history.undo_depth(), 2);

        assert_eq!(history.undo(3), Ok(2));
        assert_eq!(history.undo(2), Ok(1));
        assert_eq!(history.undo(1), Err(1));
        assert_eq!(history.redo_depth(), 2);
    }

    #[test]
    fn test_redo() {
        let mut history = History::new(10);
        history.record(1, &2);
        assert_eq!(history.undo(2), Ok(1));
        assert_eq!(history.redo(1), Ok(2));
        assert_eq!(history.redo(2), Err(2));
        assert!(history.can_undo());
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut history = History::new(10);
        history.record(1, &2);
        history.undo(2).unwrap();
        assert!(history.can_redo());

        history.record(1, &5);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_equal_snapshots_coalesce() {
        let mut history = History::new(10);
        assert!(!history.record(4, &4));
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn test_identity_equality() {
        let mut history = History::with_equality(10, Arc::<Vec<i32>>::ptr_eq);
        let a = Arc::new(vec![1]);
        let same_values = Arc::new(vec![1]);

        assert!(!history.record(a.clone(), &a));
        assert!(history.record(a.clone(), &same_values));
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_limit() {
        let mut history = History::new(3);
        for i in 0..10 {
            history.record(i, &(i + 1));
        }
        assert_eq!(history.undo_depth(), 3);
        assert_eq!(history.undo(10), Ok(9));
        assert_eq!(history.undo(9), Ok(8));
        assert_eq!(history.undo(8), Ok(7));
        assert!(!history.can_undo());
    }
}
