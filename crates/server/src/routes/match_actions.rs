//! Scoring actions: the state machine runs server-side so every
//! client sees the same advantage/deuce/tiebreak resolution.

use std::sync::Arc;

use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tennis_core::Player;

use crate::auth::ApiKeyGuard;
use crate::error::AppError;
use crate::session::MatchSession;

#[derive(Deserialize)]
pub struct PointRequest {
    pub player: i64,
}

/// POST /api/match/point
pub async fn add_point(
    Extension(session): Extension<Arc<MatchSession>>,
    _guard: ApiKeyGuard,
    Json(req): Json<PointRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let player = Player::from_number(req.player)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let record = session.mutate(|board| board.add_point(player))?;

    Ok(Json(json!({
        "message": format!("Point added to Player {}", player.number()),
        "score": record,
    })))
}

/// POST /api/match/undo
pub async fn undo(
    Extension(session): Extension<Arc<MatchSession>>,
    _guard: ApiKeyGuard,
) -> Result<Json<JsonValue>, AppError> {
    let record = session.mutate(|board| board.undo())?;

    Ok(Json(json!({
        "message": "Last action undone",
        "score": record,
    })))
}

/// POST /api/match/new-game
pub async fn new_game(
    Extension(session): Extension<Arc<MatchSession>>,
    _guard: ApiKeyGuard,
) -> Result<Json<JsonValue>, AppError> {
    let record = session.mutate(|board| board.new_game())?;

    Ok(Json(json!({
        "message": "New game started",
        "score": record,
    })))
}

/// POST /api/match/tiebreak
pub async fn toggle_tiebreak(
    Extension(session): Extension<Arc<MatchSession>>,
    _guard: ApiKeyGuard,
) -> Result<Json<JsonValue>, AppError> {
    let record = session.mutate(|board| board.toggle_tiebreak())?;

    let message = if record.is_tiebreak {
        "Tiebreak mode activated"
    } else {
        "Regular game mode activated"
    };
    Ok(Json(json!({
        "message": message,
        "score": record,
    })))
}

/// POST /api/match/reset — the confirmation prompt lives in the UI;
/// reaching this endpoint is the confirmation.
pub async fn reset(
    Extension(session): Extension<Arc<MatchSession>>,
    _guard: ApiKeyGuard,
) -> Result<Json<JsonValue>, AppError> {
    let record = session.mutate(|board| board.reset_all())?;

    Ok(Json(json!({
        "message": "Match reset",
        "score": record,
    })))
}

/// GET /api/match/history — newest entries first, capped at 10.
pub async fn get_history(
    Extension(session): Extension<Arc<MatchSession>>,
) -> Json<JsonValue> {
    let history = session.history().await;
    let total = history.len();

    Json(json!({
        "history": history,
        "total": total,
    }))
}
