use std::collections::VecDeque;

use tracing::debug;

use super::snapshot::Snapshot;
use crate::table::Table;

/// Snapshot-based undo/redo.
///
/// Callers take a `snapshot` before mutating; `undo` and `redo` then swap
/// whole tables in and out. Taking a snapshot discards the redo branch.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Oldest undo entries are dropped past this depth; `None` is unbounded
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self { limit, ..Self::default() }
    }

    /// Record the current state of `table` (clears redo stack)
    pub fn snapshot(&mut self, table: &Table) {
        self.push_undo(Snapshot::capture(table));
        self.redo_stack.clear();
    }

    /// Restore the most recent snapshot. Returns false if there was nothing
    /// to undo.
    pub fn undo(&mut self, table: &mut Table) -> bool {
        let Some(snapshot) = self.undo_stack.pop_back() else {
            return false;
        };
        let current = snapshot.restore(table);
        self.redo_stack.push(current);
        debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "undo");
        true
    }

    /// Re-apply the most recently undone state. Returns false if there was
    /// nothing to redo.
    pub fn redo(&mut self, table: &mut Table) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let current = snapshot.restore(table);
        self.push_undo(current);
        debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "redo");
        true
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
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

    /// Peek at the state the next undo would restore
    pub fn peek_undo(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
