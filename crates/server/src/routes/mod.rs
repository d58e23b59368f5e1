pub mod health;
pub mod match_actions;
pub mod score;
