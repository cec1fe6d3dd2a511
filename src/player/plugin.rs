//! Player plugin - input, movement and sprite systems.

use bevy::prelude::*;

use super::movement;

/// Player plugin - handles player input, movement and rendering sync.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
    }
}
