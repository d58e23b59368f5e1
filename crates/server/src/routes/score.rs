//! The polled score endpoint: GET returns the canonical record, POST
//! applies a partial update, PUT replaces the record outright.

use std::sync::Arc;

use axum::{Extension, Json};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value as JsonValue};
use tennis_core::{Player, ScoreState};

use crate::auth::ApiKeyGuard;
use crate::error::AppError;
use crate::record::ScoreRecord;
use crate::session::MatchSession;

/// Distinguishes a field sent as null from one left out entirely.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdateRequest {
    pub player1: Option<u32>,
    pub player2: Option<u32>,
    pub total_games: Option<u32>,
    // null and 0 both mean "no advantage", matching older clients.
    #[serde(default, deserialize_with = "double_option")]
    pub advantage: Option<Option<u32>>,
    pub is_tiebreak: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReplaceRequest {
    pub player1: Option<u32>,
    pub player2: Option<u32>,
    pub total_games: Option<u32>,
    pub advantage: Option<u32>,
    pub is_tiebreak: Option<bool>,
}

fn advantage_from_wire(value: Option<u32>) -> Option<Player> {
    match value {
        Some(1) => Some(Player::One),
        Some(2) => Some(Player::Two),
        _ => None,
    }
}

/// GET /api/score
pub async fn get_score(
    Extension(session): Extension<Arc<MatchSession>>,
) -> Json<ScoreRecord> {
    Json(session.current().await)
}

/// POST /api/score — partial update; unspecified fields keep their
/// previous values.
pub async fn update_score(
    Extension(session): Extension<Arc<MatchSession>>,
    _guard: ApiKeyGuard,
    Json(req): Json<ScoreUpdateRequest>,
) -> Result<Json<JsonValue>, AppError> {
    tracing::info!("POST /api/score received: {req:?}");

    if req.player1.is_none()
        && req.player2.is_none()
        && req.total_games.is_none()
        && req.advantage.is_none()
        && req.is_tiebreak.is_none()
    {
        return Err(AppError::BadRequest(
            "Missing score data. Provide at least one of: player1, player2, totalGames, advantage, isTiebreak".to_string(),
        ));
    }

    let record = session.mutate(move |board| {
        let mut state = board.state();
        if let Some(p1) = req.player1 {
            state.player1_points = p1;
        }
        if let Some(p2) = req.player2 {
            state.player2_points = p2;
        }
        if let Some(games) = req.total_games {
            state.total_games = games;
        }
        if let Some(adv) = req.advantage {
            state.advantage = advantage_from_wire(adv);
        }
        if let Some(tiebreak) = req.is_tiebreak {
            state.is_tiebreak = tiebreak;
        }
        board.set_state(state);
    })?;

    Ok(Json(json!({
        "message": "Score updated successfully",
        "score": record,
    })))
}

/// PUT /api/score — full replace; the three counters are required.
pub async fn replace_score(
    Extension(session): Extension<Arc<MatchSession>>,
    _guard: ApiKeyGuard,
    Json(req): Json<ScoreReplaceRequest>,
) -> Result<Json<JsonValue>, AppError> {
    tracing::info!("PUT /api/score received: {req:?}");

    let mut missing = Vec::new();
    if req.player1.is_none() {
        missing.push("player1");
    }
    if req.player2.is_none() {
        missing.push("player2");
    }
    if req.total_games.is_none() {
        missing.push("totalGames");
    }
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let state = ScoreState {
        player1_points: req.player1.unwrap_or(0),
        player2_points: req.player2.unwrap_or(0),
        total_games: req.total_games.unwrap_or(0),
        is_tiebreak: req.is_tiebreak.unwrap_or(false),
        advantage: advantage_from_wire(req.advantage),
    };

    let record = session.mutate(move |board| board.set_state(state))?;

    Ok(Json(json!({
        "message": "Score updated successfully",
        "score": record,
    })))
}
