//! Wire-level score record shared by the HTTP API, the store and the
//! remote mirror.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tennis_core::{Player, ScoreState};

/// The flat record polled by the browser UI and the ESP32 display.
/// `advantage` is the player number or null; older clients that send 0
/// for "no advantage" are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub player1: u32,
    pub player2: u32,
    pub total_games: u32,
    pub advantage: Option<u32>,
    pub is_tiebreak: bool,
    pub last_update: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn from_state(state: ScoreState, last_update: DateTime<Utc>) -> Self {
        Self {
            player1: state.player1_points,
            player2: state.player2_points,
            total_games: state.total_games,
            advantage: state.advantage.map(|p| p.number()),
            is_tiebreak: state.is_tiebreak,
            last_update,
        }
    }

    pub fn to_state(&self) -> ScoreState {
        ScoreState {
            player1_points: self.player1,
            player2_points: self.player2,
            total_games: self.total_games,
            is_tiebreak: self.is_tiebreak,
            // 0 means "none" on the wire; anything but 1 or 2 is ignored.
            advantage: match self.advantage {
                Some(1) => Some(Player::One),
                Some(2) => Some(Player::Two),
                _ => None,
            },
        }
    }
}
