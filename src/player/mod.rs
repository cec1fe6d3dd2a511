//! Player module - player state machine, input and movement.

mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::{forward_player_events, read_player_input, spawn_player};
pub use plugin::PlayerPlugin;
