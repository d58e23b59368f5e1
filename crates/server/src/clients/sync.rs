//! Client for an upstream score mirror (e.g. the original Vercel
//! endpoint). Pushes are fire-and-forget; the local session is always
//! the source of truth.

use reqwest::Client;

use crate::record::ScoreRecord;

pub struct SyncClient {
    client: Client,
    base_url: String,
}

impl SyncClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .user_agent("TennisScoreboard/1.0")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the mirror's current record, used once at startup to pick
    /// up a score published before this process came up.
    pub async fn fetch(&self) -> Result<ScoreRecord, String> {
        let url = format!("{}/api/score", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Sync fetch request error: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("Sync fetch HTTP {}", resp.status()));
        }

        resp.json()
            .await
            .map_err(|e| format!("Sync fetch JSON parse error: {e}"))
    }

    /// Push the new canonical record to the mirror.
    pub async fn push(&self, record: &ScoreRecord) -> Result<(), String> {
        let url = format!("{}/api/score", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| format!("Sync push request error: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("Sync push HTTP {}", resp.status()));
        }

        Ok(())
    }
}
