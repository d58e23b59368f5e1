pub mod file;
pub mod memory;

use crate::record::ScoreRecord;

/// Injected storage for the canonical score record. Implementations
/// are best-effort mirrors; the in-memory session state stays
/// authoritative even when a save fails.
pub trait ScoreStore: Send + Sync {
    /// Load the last saved record, if any.
    fn load(&self) -> anyhow::Result<Option<ScoreRecord>>;

    /// Persist the record.
    fn save(&self, record: &ScoreRecord) -> anyhow::Result<()>;
}
