//! Core plugin that sets up game states, events, config and frame ordering.

use bevy::prelude::*;

use super::config::GameConfig;
use super::events::*;
use super::rng::GameRng;
use super::states::*;

/// Per-frame ordering of gameplay systems.
///
/// Mirrors the data flow of one frame: input is sampled, the player moves
/// and is validated against the world, the camera follows, enemies think and
/// move, hits are resolved, feedback (audio, score) reacts, and finally the
/// render state is synced.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    Input,
    Movement,
    Camera,
    Enemies,
    Combat,
    Feedback,
    Render,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, GameOver) and the pause sub-state
/// - Global events (PlayerEvent, EnemyEvent)
/// - Gameplay config resources
/// - The chained `GameplaySet` ordering
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        GameConfig::load().insert_into(app);

        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Shared randomness
            .init_resource::<GameRng>()

            // Register global events
            .add_event::<PlayerEvent>()
            .add_event::<EnemyEvent>()

            // Gameplay only advances while exploring
            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Movement,
                    GameplaySet::Camera,
                    GameplaySet::Enemies,
                    GameplaySet::Combat,
                    GameplaySet::Feedback,
                )
                    .chain()
                    .run_if(in_state(PlayState::Exploring)),
            )
            // Render sync also runs while paused so the frozen frame stays drawn
            .configure_sets(
                Update,
                GameplaySet::Render
                    .after(GameplaySet::Feedback)
                    .run_if(in_state(GameState::InGame)),
            )

            // Data files are read synchronously, so loading completes at once
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(in_state(PlayState::Exploring).or(in_state(PlayState::Paused))),
            );
    }
}

/// Leave the loading state once startup data is in place.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Exploring => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Exploring),
        }
    }
}
