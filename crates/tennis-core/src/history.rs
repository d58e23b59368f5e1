//! Bounded match-event log, newest entry first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Entries kept before the oldest one is evicted.
const HISTORY_CAP: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: VecDeque<String>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event at the front; the oldest entry falls off the
    /// back once the cap is reached.
    pub fn push(&mut self, message: String) {
        self.entries.push_front(message);
        if self.entries.len() > HISTORY_CAP {
            self.entries.pop_back();
        }
    }

    /// Entries newest-first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
