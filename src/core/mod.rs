//! Core game module - states, events, configuration and frame ordering.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod events;
mod plugin;
mod rng;
mod states;

pub use config::{asset_exists, GameConfig};
pub use events::*;
pub use plugin::{CorePlugin, GameplaySet};
pub use rng::GameRng;
pub use states::*;
