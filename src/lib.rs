//! Overworld - a top-down action adventure prototype in Bevy.
//!
//! The player explores a generated tile world, fights Octoroks with a sword
//! and dodges their rock projectiles.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, config, frame ordering
//! - **Player**: Input, two-phase movement, sword, sprite animation
//! - **Enemies**: Octorok AI, projectiles, wave spawning
//! - **Combat**: Health, hit tests, sword and projectile resolution
//! - **World**: Tile map generation, collision, follow camera
//! - **Audio**: Sound manager, kira backend, music director
//! - **Rendering**: Visual config, sprite sheets and placeholders
//! - **Persistence**: Score and saved high score
//! - **UI**: Menus and HUD
//!
//! Game logic lives in plain structs (`Player`, `Enemy`, `TileMap`,
//! `FollowCamera`, `SoundManager`) that can be driven without an `App`.

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod persistence;
pub mod player;
pub mod rendering;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Expects `DefaultPlugins` with Bevy's own audio disabled and
/// `bevy_kira_audio::AudioPlugin` added.
pub struct OverworldPlugin;

impl Plugin for OverworldPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Rendering resources are needed by world and player setup
            .add_plugins(rendering::RenderingPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Audio systems
            .add_plugins(audio::AudioPlugin)

            // Score keeping
            .add_plugins(persistence::PersistencePlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
