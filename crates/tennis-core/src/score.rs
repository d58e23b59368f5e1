//! Tennis score state machine — points, advantage/deuce, tiebreaks, undo.

use serde::{Deserialize, Serialize};

use crate::history::HistoryLog;
use crate::undo::UndoStack;

/// Point display for regular games: 0, 15, 30, 40.
const POINT_NAMES: [&str; 4] = ["0", "15", "30", "40"];

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("Invalid player number: {0} (expected 1 or 2)")]
    InvalidPlayer(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Parse a wire-level player identifier (1 or 2).
    pub fn from_number(n: i64) -> Result<Self, ScoreError> {
        match n {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(ScoreError::InvalidPlayer(other)),
        }
    }

    pub fn number(&self) -> u32 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// One full snapshot of the match score. Cheap to copy; a snapshot is
/// pushed to the undo stack before every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub player1_points: u32,
    pub player2_points: u32,
    pub total_games: u32,
    pub is_tiebreak: bool,
    pub advantage: Option<Player>,
}

impl ScoreState {
    fn points_of(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1_points,
            Player::Two => self.player2_points,
        }
    }

    fn leader(&self) -> Player {
        if self.player1_points > self.player2_points {
            Player::One
        } else {
            Player::Two
        }
    }

    fn diff(&self) -> u32 {
        self.player1_points.abs_diff(self.player2_points)
    }

    /// Human-readable current score, e.g. "40-30", "Ad-40" or "6-5" in
    /// a tiebreak. Display only; advantage is tracked in its own field
    /// rather than by counting points past 40.
    pub fn score_text(&self) -> String {
        if self.is_tiebreak {
            return format!("{}-{}", self.player1_points, self.player2_points);
        }
        let name = |player: Player| -> &str {
            if self.advantage == Some(player) {
                "Ad"
            } else {
                POINT_NAMES
                    .get(self.points_of(player) as usize)
                    .copied()
                    .unwrap_or("40")
            }
        };
        format!("{}-{}", name(Player::One), name(Player::Two))
    }
}

/// Owns the canonical score plus the event history and undo stack, and
/// applies the scoring rules. All mutations are infallible.
#[derive(Debug, Default)]
pub struct Scoreboard {
    state: ScoreState,
    history: HistoryLog,
    undo_stack: UndoStack,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board around a known state (e.g. loaded from storage).
    /// History and undo start empty.
    pub fn from_state(state: ScoreState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> ScoreState {
        self.state
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Score a point for `player` and apply the completion rules for
    /// the current mode.
    pub fn add_point(&mut self, player: Player) {
        self.undo_stack.push(self.state);

        if self.state.is_tiebreak {
            self.tiebreak_point(player);
        } else {
            self.regular_point(player);
        }

        self.history.push(format!(
            "Player {} scores - {}",
            player.number(),
            self.state.score_text()
        ));
    }

    fn regular_point(&mut self, player: Player) {
        match player {
            Player::One => self.state.player1_points += 1,
            Player::Two => self.state.player2_points += 1,
        }

        if self.state.player1_points < 4 && self.state.player2_points < 4 {
            return;
        }

        match self.state.diff() {
            d if d >= 2 => {
                let winner = self.state.leader();
                self.history
                    .push(format!("Player {} wins the game!", winner.number()));
                self.state.total_games += 1;
                self.reset_game_points();
            }
            1 => {
                let leader = self.state.leader();
                self.state.advantage = Some(leader);
                self.history
                    .push(format!("Advantage Player {}", leader.number()));
            }
            // Both at 4 or beyond and level: back to deuce.
            _ => {
                self.state.advantage = None;
                self.history.push("Deuce!".to_string());
            }
        }
    }

    fn tiebreak_point(&mut self, player: Player) {
        match player {
            Player::One => self.state.player1_points += 1,
            Player::Two => self.state.player2_points += 1,
        }

        let reached_seven =
            self.state.player1_points >= 7 || self.state.player2_points >= 7;
        if reached_seven && self.state.diff() >= 2 {
            let winner = self.state.leader();
            self.history
                .push(format!("Player {} wins tiebreak!", winner.number()));
            self.state.total_games += 1;
            self.reset_game_points();
            // Tiebreak decided; the match goes back to regular games.
            self.state.is_tiebreak = false;
        }
    }

    fn reset_game_points(&mut self) {
        self.state.player1_points = 0;
        self.state.player2_points = 0;
        self.state.advantage = None;
    }

    /// Overwrite the score wholesale, e.g. from a remote client that
    /// pushed its own computed state. Still undoable like any other
    /// mutation. Advantage cannot survive into tiebreak mode.
    pub fn set_state(&mut self, mut state: ScoreState) {
        if state.is_tiebreak {
            state.advantage = None;
        }
        self.undo_stack.push(self.state);
        self.state = state;
        self.history
            .push(format!("Score updated - {}", self.state.score_text()));
    }

    /// Restore the state as it was before the last mutation. With no
    /// snapshots left this resets to the zero state.
    pub fn undo(&mut self) {
        self.state = self.undo_stack.pop().unwrap_or_default();
        self.history.push("Last action undone".to_string());
    }

    /// Start a fresh game: points and advantage cleared, games played
    /// and mode untouched.
    pub fn new_game(&mut self) {
        self.undo_stack.push(self.state);
        self.reset_game_points();
        self.history.push("New game started".to_string());
    }

    /// Switch between regular and tiebreak scoring. Points in the
    /// current game are discarded.
    pub fn toggle_tiebreak(&mut self) {
        self.undo_stack.push(self.state);
        self.state.is_tiebreak = !self.state.is_tiebreak;
        self.reset_game_points();
        self.history.push(if self.state.is_tiebreak {
            "Tiebreak mode activated".to_string()
        } else {
            "Regular game mode activated".to_string()
        });
    }

    /// Wipe the whole match: score, history and undo stack.
    pub fn reset_all(&mut self) {
        self.state = ScoreState::default();
        self.history.clear();
        self.undo_stack.clear();
        self.history.push("Match reset - Ready to play".to_string());
    }
}
