//! Snapshot stack for single-step undo.

use crate::score::ScoreState;

/// Snapshots of the score taken before each mutation, most recent on
/// top. Popping past the bottom means "before anything happened", which
/// callers map to the zero state.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    snapshots: Vec<ScoreState>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: ScoreState) {
        self.snapshots.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<ScoreState> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
