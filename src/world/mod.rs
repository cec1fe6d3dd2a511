//! World module - tile map, follow camera and world setup.

mod camera;
mod error;
mod plugin;
mod tiles;

pub use camera::{CameraConfig, FollowCamera};
pub use error::DataLoadError;
pub use plugin::{player_start, setup_world, WorldConfig, WorldPlugin};
pub use tiles::{map_to_translation, LevelEntity, Tile, TileKind, TileMap, TileSprite};
