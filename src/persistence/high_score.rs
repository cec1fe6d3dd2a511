//! Session score and the persisted best score.

use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File the best score is kept in, relative to the working directory.
pub const HIGH_SCORE_PATH: &str = "overworld_highscore.txt";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to write high score to '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Score of the running session and the best ever recorded.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HighScore {
    current: u32,
    best: u32,
    path: PathBuf,
}

impl HighScore {
    /// Read the best score from `path`. A missing or unreadable file means
    /// no best score yet.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let best = match fs::read_to_string(&path) {
            Ok(contents) => contents.trim().parse().unwrap_or_else(|_| {
                warn!("Corrupt high score file {:?}, starting from 0", path);
                0
            }),
            Err(_) => {
                info!("No high score file at {:?}", path);
                0
            }
        };

        Self {
            current: 0,
            best,
            path,
        }
    }

    /// Set the session score, raising the best when it is beaten.
    pub fn record(&mut self, score: u32) {
        self.current = score;
        if score > self.best {
            self.best = score;
        }
    }

    pub fn add_point(&mut self) {
        self.record(self.current.saturating_add(1));
    }

    /// Start a new session; the best score is kept.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Write the best score, replacing the whole file.
    pub fn save(&self) -> Result<(), PersistenceError> {
        fs::write(&self.path, self.best.to_string()).map_err(|source| PersistenceError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn best(&self) -> u32 {
        self.best
    }
}
