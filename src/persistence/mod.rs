//! Persistence module - session score and saved high score.

mod high_score;
mod plugin;

pub use high_score::{HighScore, PersistenceError, HIGH_SCORE_PATH};
pub use plugin::PersistencePlugin;
