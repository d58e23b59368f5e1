use std::sync::Arc;

use server::clients::sync::SyncClient;
use server::config;
use server::session::MatchSession;
use server::store::{file::FileStore, memory::MemoryStore, ScoreStore};

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    // Injected storage: file-backed when STORE_PATH is set.
    let store: Arc<dyn ScoreStore> = match &config.store_path {
        Some(path) => {
            tracing::info!("Using file store at {path}");
            Arc::new(FileStore::new(path))
        }
        None => {
            tracing::info!("Using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    // Optional upstream mirror
    let sync = config.sync_url.as_deref().map(|url| {
        tracing::info!("Mirroring score to {url}");
        Arc::new(SyncClient::new(url))
    });

    let session = Arc::new(MatchSession::new(store, sync.clone()));

    // Pick up a score published to the mirror before this process
    // came up. Failures leave the locally loaded state in place.
    if let Some(sync) = &sync {
        match sync.fetch().await {
            Ok(record) => {
                tracing::info!("Loaded initial score from mirror");
                session.adopt_remote(record).await;
            }
            Err(e) => tracing::warn!("Could not load initial score from mirror: {e}"),
        }
    }

    let app = server::app(session, config.clone());

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
