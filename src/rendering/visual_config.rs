//! Visual configuration loaded from external RON file.
//!
//! Allows tweaking colours and sprite paths without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use crate::world::TileKind;

/// Path of the visual config, relative to the working directory.
pub const VISUAL_CONFIG_PATH: &str = "assets/data/rendering/visual_config.ron";

/// Visual configuration loaded from assets/data/rendering/visual_config.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub clear_color: (f32, f32, f32),
    // Fallback tile colours, used when no tileset image is present
    pub grass_color: (f32, f32, f32),
    pub water_color: (f32, f32, f32),
    pub stone_color: (f32, f32, f32),
    pub sand_color: (f32, f32, f32),
    pub wall_color: (f32, f32, f32),
    /// Enemy tint while the hit flash is active
    pub flash_color: (f32, f32, f32),
    pub projectile_color: (f32, f32, f32),
    pub sword_color: (f32, f32, f32),
    /// Tileset image, one column per terrain in atlas order
    pub tileset_path: String,
    /// Edge length of one tileset cell in pixels
    pub tileset_cell: u32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            clear_color: (0.05, 0.05, 0.08),
            grass_color: (0.2, 0.6, 0.2),
            water_color: (0.2, 0.4, 0.8),
            stone_color: (0.5, 0.5, 0.5),
            sand_color: (0.8, 0.7, 0.4),
            wall_color: (0.3, 0.2, 0.1),
            flash_color: (1.0, 1.0, 1.0),
            projectile_color: (1.0, 0.5, 0.0),
            sword_color: (0.85, 0.85, 0.95),
            tileset_path: "sprites/overworld_tileset.png".to_string(),
            tileset_cell: 32,
        }
    }
}

impl VisualConfig {
    /// Load visual config from RON file.
    pub fn load() -> Self {
        let path = VISUAL_CONFIG_PATH;
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded visual config from {}", path);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    pub fn tile_color(&self, kind: TileKind) -> Color {
        let (r, g, b) = match kind {
            TileKind::Grass => self.grass_color,
            TileKind::Water => self.water_color,
            TileKind::Stone => self.stone_color,
            TileKind::Sand => self.sand_color,
            TileKind::Wall => self.wall_color,
        };
        Color::srgb(r, g, b)
    }

    pub fn color(rgb: (f32, f32, f32)) -> Color {
        Color::srgb(rgb.0, rgb.1, rgb.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_default_colours() {
        let config: VisualConfig = ron::from_str("(water_color: (0.0, 0.0, 1.0))").unwrap();
        assert_eq!(config.water_color, (0.0, 0.0, 1.0));
        assert_eq!(config.grass_color, VisualConfig::default().grass_color);
        assert_eq!(config.tile_color(TileKind::Water), Color::srgb(0.0, 0.0, 1.0));
    }
}
