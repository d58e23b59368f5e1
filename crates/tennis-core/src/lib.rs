pub mod history;
pub mod score;
pub mod undo;

pub use history::HistoryLog;
pub use score::{Player, ScoreError, ScoreState, Scoreboard};
pub use undo::UndoStack;
