//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::EnemyKind;
use crate::world::DataLoadError;

/// Directory scanned for `*.ron` enemy definitions.
pub const ENEMY_DATA_DIR: &str = "assets/data/enemies";

/// Ranged attack parameters for enemies that shoot.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RangedAttack {
    /// Seconds between shots
    pub cooldown: f32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemyDefinition {
    pub name: String,
    pub kind: EnemyKind,
    pub max_health: f32,
    pub move_speed: f32,
    pub detection_range: f32,
    /// Body half extent, used for the hitbox and the drawn circle
    pub radius: f32,
    /// Seconds a wander heading is held
    pub wander_dwell: f32,
    /// Seconds the hit flash lasts
    pub flash_duration: f32,
    #[serde(default)]
    pub ranged: Option<RangedAttack>,
    /// Body color as linear RGB
    pub color: (f32, f32, f32),
}

impl EnemyDefinition {
    /// Built-in Octorok stats, used when no data file overrides them.
    pub fn octorok() -> Self {
        Self {
            name: "Octorok".to_string(),
            kind: EnemyKind::Octorok,
            max_health: 3.0,
            move_speed: 80.0,
            detection_range: 300.0,
            radius: 16.0,
            wander_dwell: 2.0,
            flash_duration: 0.2,
            ranged: Some(RangedAttack {
                cooldown: 1.5,
                projectile_speed: 150.0,
                projectile_radius: 4.0,
            }),
            color: (0.8, 0.1, 0.1),
        }
    }

    pub fn from_ron(path: &str, contents: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Debug)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert("octorok".to_string(), EnemyDefinition::octorok());
        Self { definitions }
    }
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Read every `*.ron` file in `dir`, keyed by file stem. Files that fail
    /// to load are returned alongside the successful ones.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<DataLoadError>, DataLoadError> {
        let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
            path: dir.display().to_string(),
            details: e.to_string(),
        })?;

        let mut failures = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }

            let Some(enemy_type) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let display = path.display().to_string();

            let loaded = fs::read_to_string(&path)
                .map_err(|e| DataLoadError::ReadError {
                    path: display.clone(),
                    details: e.to_string(),
                })
                .and_then(|contents| EnemyDefinition::from_ron(&display, &contents));

            match loaded {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    self.definitions.insert(enemy_type.to_string(), definition);
                }
                Err(e) => failures.push(e),
            }
        }

        Ok(failures)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(ENEMY_DATA_DIR);

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}, using built-ins", enemies_dir);
        return;
    }

    match registry.load_dir(enemies_dir) {
        Ok(failures) => {
            for failure in failures {
                error!("{}", failure);
            }
        }
        Err(e) => warn!("{}", e),
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    const OCTOROK_RON: &str = r#"(
        name: "Octorok",
        kind: Octorok,
        max_health: 5.0,
        move_speed: 60.0,
        detection_range: 250.0,
        radius: 16.0,
        wander_dwell: 2.0,
        flash_duration: 0.2,
        ranged: Some((cooldown: 1.0, projectile_speed: 120.0, projectile_radius: 4.0)),
        color: (0.8, 0.1, 0.1),
    )"#;

    #[test]
    fn registry_starts_with_builtin_octorok() {
        let registry = EnemyRegistry::default();
        let octorok = registry.get("octorok").unwrap();
        assert_eq!(octorok.max_health, 3.0);
        assert_eq!(octorok.ranged.as_ref().unwrap().cooldown, 1.5);
    }

    #[test]
    fn directory_files_override_builtins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("octorok.ron"), OCTOROK_RON).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut registry = EnemyRegistry::default();
        let failures = registry.load_dir(dir.path()).unwrap();

        assert!(failures.is_empty());
        let octorok = registry.get("octorok").unwrap();
        assert_eq!(octorok.max_health, 5.0);
        assert_eq!(octorok.move_speed, 60.0);
    }

    #[test]
    fn broken_file_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("moblin.ron"), "(name: ").unwrap();

        let mut registry = EnemyRegistry::default();
        let failures = registry.load_dir(dir.path()).unwrap();

        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], DataLoadError::ParseError { .. }));
        assert!(registry.get("moblin").is_none());
        assert!(registry.get("octorok").is_some());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = EnemyRegistry::default();
        let result = registry.load_dir(&dir.path().join("absent"));
        assert!(matches!(result, Err(DataLoadError::ReadError { .. })));
    }
}
