//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::spawning::{reset_waves, spawn_wave, WaveCounter};
use super::visuals;
use crate::core::{GameState, GameplaySet};

/// Enemy plugin - handles enemy data, waves, AI and rendering sync.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .init_resource::<WaveCounter>()
            // Definitions are read once; a session only resets the wave count
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(OnEnter(GameState::InGame), reset_waves)
            // Spawn, think, then move
            .add_systems(
                Update,
                (spawn_wave, ai::enemy_think, ai::enemy_move)
                    .chain()
                    .in_set(GameplaySet::Enemies),
            )
            .add_systems(
                Update,
                (visuals::sync_enemy_bodies, visuals::draw_projectiles)
                    .in_set(GameplaySet::Render),
            );
    }
}
