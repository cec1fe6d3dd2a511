//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Player movement,
//! enemy AI and combat only run while exploring; menus only run in their
//! own states.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while config and data files are read
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts or retries
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Title screen
    MainMenu,
    /// Active gameplay (see [`PlayState`])
    InGame,
    /// Player has died
    GameOver,
}

/// Sub-states for gameplay - only active when `GameState::InGame`.
///
/// Leaving `Paused` does not re-run `OnEnter(GameState::InGame)`.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay - movement, combat, exploration
    #[default]
    Exploring,
    /// Simulation frozen, world still visible under the pause overlay
    Paused,
}
