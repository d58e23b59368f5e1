//! Match session: owns the scoreboard, gates concurrent mutations and
//! fans updates out to storage and the optional remote mirror.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tennis_core::Scoreboard;
use tokio::sync::Mutex;

use crate::clients::sync::SyncClient;
use crate::error::AppError;
use crate::record::ScoreRecord;
use crate::store::ScoreStore;

struct Inner {
    board: Scoreboard,
    last_update: DateTime<Utc>,
}

/// One live match. Mutations take the lock with `try_lock`: a second
/// action while one is in flight is rejected with 409 rather than
/// queued, since callers retry cheaply and the UI debounces anyway.
pub struct MatchSession {
    inner: Mutex<Inner>,
    store: Arc<dyn ScoreStore>,
    sync: Option<Arc<SyncClient>>,
}

impl MatchSession {
    /// Build a session, seeding the board from the store when it holds
    /// a previous record. Load failures are logged and the match
    /// starts from zero.
    pub fn new(store: Arc<dyn ScoreStore>, sync: Option<Arc<SyncClient>>) -> Self {
        let inner = match store.load() {
            Ok(Some(record)) => {
                tracing::info!("Loaded score from store: {:?}", record.to_state());
                Inner {
                    board: Scoreboard::from_state(record.to_state()),
                    last_update: record.last_update,
                }
            }
            Ok(None) => Inner {
                board: Scoreboard::new(),
                last_update: Utc::now(),
            },
            Err(e) => {
                tracing::warn!("Failed to load score from store, starting fresh: {e}");
                Inner {
                    board: Scoreboard::new(),
                    last_update: Utc::now(),
                }
            }
        };

        Self {
            inner: Mutex::new(inner),
            store,
            sync,
        }
    }

    pub async fn current(&self) -> ScoreRecord {
        let inner = self.inner.lock().await;
        ScoreRecord::from_state(inner.board.state(), inner.last_update)
    }

    /// Match history, newest entry first.
    pub async fn history(&self) -> Vec<String> {
        self.inner.lock().await.board.history().entries()
    }

    /// Replace local state with a record fetched from the mirror at
    /// startup. History and undo start empty, as for a fresh process.
    pub async fn adopt_remote(&self, record: ScoreRecord) {
        let mut inner = self.inner.lock().await;
        inner.board = Scoreboard::from_state(record.to_state());
        inner.last_update = record.last_update;
        if let Err(e) = self.store.save(&record) {
            tracing::warn!("Failed to persist adopted score: {e}");
        }
    }

    /// Run one mutation under the single-flight gate, then persist the
    /// result and push it to the mirror in the background.
    pub fn mutate(&self, f: impl FnOnce(&mut Scoreboard)) -> Result<ScoreRecord, AppError> {
        let mut inner = self.inner.try_lock().map_err(|_| {
            tracing::warn!("Rejected score action: another update is in flight");
            AppError::Conflict("Another score update is in flight".to_string())
        })?;

        f(&mut inner.board);
        inner.last_update = Utc::now();
        let record = ScoreRecord::from_state(inner.board.state(), inner.last_update);
        drop(inner);

        // Local state is authoritative; persistence and the mirror are
        // best-effort.
        if let Err(e) = self.store.save(&record) {
            tracing::warn!("Failed to persist score: {e}");
        }
        if let Some(sync) = &self.sync {
            let sync = Arc::clone(sync);
            let pushed = record.clone();
            tokio::spawn(async move {
                if let Err(e) = sync.push(&pushed).await {
                    tracing::warn!("Score mirror push failed: {e}");
                }
            });
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use tennis_core::Player;

    fn session() -> MatchSession {
        MatchSession::new(Arc::new(MemoryStore::new()), None)
    }

    #[tokio::test]
    async fn test_mutate_updates_record_and_store() {
        let store = Arc::new(MemoryStore::new());
        let session = MatchSession::new(store.clone() as Arc<dyn ScoreStore>, None);

        let record = session.mutate(|b| b.add_point(Player::One)).unwrap();
        assert_eq!(record.player1, 1);
        assert_eq!(session.current().await.player1, 1);

        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved, record);
    }

    #[tokio::test]
    async fn test_gate_rejects_while_locked() {
        let session = session();
        let _held = session.inner.try_lock().unwrap();
        let err = session.mutate(|b| b.add_point(Player::One)).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_seeds_from_store() {
        let store = Arc::new(MemoryStore::new());
        let record = ScoreRecord {
            player1: 2,
            player2: 1,
            total_games: 5,
            advantage: None,
            is_tiebreak: true,
            last_update: Utc::now(),
        };
        store.save(&record).unwrap();

        let session = MatchSession::new(store as Arc<dyn ScoreStore>, None);
        let current = session.current().await;
        assert_eq!(current, record);
    }
}
