use std::sync::Mutex;

use crate::record::ScoreRecord;
use crate::store::ScoreStore;

/// Default store: lives as long as the process, like the original
/// serverless in-memory object.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<ScoreRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<ScoreRecord>> {
        Ok(self.record.lock().unwrap().clone())
    }

    fn save(&self, record: &ScoreRecord) -> anyhow::Result<()> {
        *self.record.lock().unwrap() = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let record = ScoreRecord {
            player1: 3,
            player2: 2,
            total_games: 1,
            advantage: None,
            is_tiebreak: false,
            last_update: Utc::now(),
        };
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));
    }
}
