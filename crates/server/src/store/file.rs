use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::record::ScoreRecord;
use crate::store::ScoreStore;

/// JSON-file-backed store so the score survives a restart. Writes go
/// through a temp file and rename to avoid a torn record.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> anyhow::Result<Option<ScoreRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let record = serde_json::from_str(&data)
            .with_context(|| format!("Invalid score record in {}", self.path.display()))?;
        Ok(Some(record))
    }

    fn save(&self, record: &ScoreRecord) -> anyhow::Result<()> {
        let data = serde_json::to_string_pretty(record)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}
