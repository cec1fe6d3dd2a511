//! Rendering module - visual config, sprite sheets and placeholders.

mod placeholder;
mod plugin;
mod visual_config;

pub use placeholder::{placeholder_sheet, sheet_pixels};
pub use plugin::{PlayerSpriteSheet, RenderingPlugin, TilesetAtlas};
pub use visual_config::VisualConfig;
