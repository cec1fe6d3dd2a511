//! Gameplay configuration loaded from an external RON file.
//!
//! Allows tuning movement, combat, audio and world parameters without
//! recompilation. Every section falls back to its defaults when omitted.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::audio::AudioConfig;
use crate::combat::CombatConfig;
use crate::enemies::SpawnConfig;
use crate::player::PlayerConfig;
use crate::world::{CameraConfig, DataLoadError, WorldConfig};

/// Path of the gameplay config, relative to the working directory.
pub const GAME_CONFIG_PATH: &str = "assets/data/game.ron";

/// Root directory the asset server reads from.
pub const ASSET_ROOT: &str = "assets";

/// Whether an asset-relative path exists on disk.
pub fn asset_exists(path: &str) -> bool {
    Path::new(ASSET_ROOT).join(path).exists()
}

/// Top-level gameplay configuration loaded from `assets/data/game.ron`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub combat: CombatConfig,
    pub spawning: SpawnConfig,
    pub audio: AudioConfig,
}

impl GameConfig {
    /// Parse a config from RON text.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Read and parse a config file.
    pub fn read(path: &str) -> Result<Self, DataLoadError> {
        if !Path::new(path).exists() {
            return Err(DataLoadError::FileNotFound(path.to_string()));
        }
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(path, &contents)
    }

    /// Load the gameplay config, falling back to defaults on any failure.
    pub fn load() -> Self {
        match Self::read(GAME_CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded game config from {}", GAME_CONFIG_PATH);
                config
            }
            Err(DataLoadError::FileNotFound(path)) => {
                info!("No game config at {}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                warn!("{}. Using default game config.", e);
                Self::default()
            }
        }
    }

    /// Split the config into the per-plugin resources.
    pub fn insert_into(self, app: &mut App) {
        app.insert_resource(self.world)
            .insert_resource(self.camera)
            .insert_resource(self.player)
            .insert_resource(self.combat)
            .insert_resource(self.spawning)
            .insert_resource(self.audio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = GameConfig::from_ron(
            "inline",
            "(world: (width: 20, height: 12), player: (speed: 200.0))",
        )
        .expect("valid config");

        assert_eq!(config.world.width, 20);
        assert_eq!(config.world.height, 12);
        assert_eq!(config.world.tile_size, WorldConfig::default().tile_size);
        assert_eq!(config.player.speed, 200.0);
        assert_eq!(config.player.attack_duration, PlayerConfig::default().attack_duration);
        assert_eq!(config.camera.smoothing, 0.1);
    }

    #[test]
    fn malformed_config_reports_parse_error() {
        let err = GameConfig::from_ron("broken.ron", "(world: (width: \"wide\"))").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = GameConfig::read("assets/data/does_not_exist.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ron");
        fs::write(&path, "(spawning: (enemy_count: 2))").unwrap();

        let config = GameConfig::read(path.to_str().unwrap()).unwrap();
        assert_eq!(config.spawning.enemy_count, 2);
        assert_eq!(config.spawning.enemy_type, "octorok");
    }
}
