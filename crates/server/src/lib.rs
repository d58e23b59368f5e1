pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod record;
pub mod routes;
pub mod session;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::session::MatchSession;

/// Build the application router. Shared with the integration tests,
/// which serve it on an ephemeral port.
pub fn app(session: Arc<MatchSession>, config: Config) -> Router {
    // Wide-open CORS so the browser UI and the ESP32 can poll from
    // anywhere; this also answers OPTIONS preflight.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Polled score record
        .route(
            "/api/score",
            get(routes::score::get_score)
                .post(routes::score::update_score)
                .put(routes::score::replace_score),
        )
        // Scoring actions
        .route("/api/match/point", post(routes::match_actions::add_point))
        .route("/api/match/undo", post(routes::match_actions::undo))
        .route("/api/match/new-game", post(routes::match_actions::new_game))
        .route("/api/match/tiebreak", post(routes::match_actions::toggle_tiebreak))
        .route("/api/match/reset", post(routes::match_actions::reset))
        .route("/api/match/history", get(routes::match_actions::get_history))
        // Shared state
        .layer(Extension(session))
        .layer(Extension(config))
        .layer(cors)
}
