//! Persistence plugin - score keeping and high score saving.

use bevy::prelude::*;

use super::high_score::{HighScore, HIGH_SCORE_PATH};
use crate::core::{EnemyEvent, GameState, GameplaySet};

/// Persistence plugin - tracks the score and saves the best one.
pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HighScore::load(HIGH_SCORE_PATH))
            .add_systems(OnEnter(GameState::InGame), reset_score)
            .add_systems(Update, count_defeats.in_set(GameplaySet::Feedback))
            .add_systems(OnEnter(GameState::GameOver), save_high_score)
            .add_systems(Last, save_on_exit);
    }
}

fn reset_score(mut score: ResMut<HighScore>) {
    score.reset();
}

/// One point per defeated enemy.
fn count_defeats(mut events: EventReader<EnemyEvent>, mut score: ResMut<HighScore>) {
    for event in events.read() {
        if matches!(event, EnemyEvent::Defeated { .. }) {
            score.add_point();
        }
    }
}

fn save_high_score(score: Res<HighScore>) {
    match score.save() {
        Ok(()) => info!("Saved high score {}", score.best()),
        Err(e) => error!("{}", e),
    }
}

fn save_on_exit(mut exit: EventReader<AppExit>, score: Res<HighScore>) {
    if exit.read().next().is_some() {
        if let Err(e) = score.save() {
            error!("{}", e);
        }
    }
}
