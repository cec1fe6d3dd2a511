//! Enemy wave spawning.
//!
//! A new wave is placed whenever the arena holds no enemies at all, dead
//! ones with projectiles still in flight included.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::components::{Enemy, EnemyBody, SpawnConfig};
use super::data::{EnemyDefinition, EnemyRegistry};
use crate::combat::Actor;
use crate::core::GameRng;
use crate::player::Player;
use crate::world::{map_to_translation, LevelEntity, TileMap};

/// Enemies draw above tiles, below the player.
pub const ENEMY_Z: f32 = 5.0;

/// Number of waves spawned this session.
#[derive(Resource, Debug, Default)]
pub struct WaveCounter(pub u32);

/// Choose up to `count` distinct walkable tile centres at least
/// `min_distance` from `avoid`.
pub fn pick_spawn_points(
    map: &TileMap,
    avoid: Vec2,
    count: usize,
    min_distance: f32,
    rng: &mut impl Rng,
) -> Vec<Vec2> {
    let candidates: Vec<Vec2> = map
        .walkable_cells()
        .map(|cell| map.tile_center(cell.x, cell.y))
        .filter(|center| center.distance(avoid) >= min_distance)
        .collect();

    candidates.choose_multiple(rng, count).copied().collect()
}

/// Spawn one enemy entity with its body mesh.
pub fn spawn_enemy(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    definition: &EnemyDefinition,
    position: Vec2,
    arena: Vec2,
) -> Entity {
    let (r, g, b) = definition.color;
    let color = Color::srgb(r, g, b);

    commands
        .spawn((
            Enemy::new(definition, position, arena),
            EnemyBody { color },
            Mesh2d(meshes.add(Circle::new(definition.radius))),
            MeshMaterial2d(materials.add(color)),
            Transform::from_translation(map_to_translation(position, ENEMY_Z)),
            LevelEntity,
        ))
        .id()
}

/// Place a fresh wave once every enemy is gone.
#[allow(clippy::too_many_arguments)]
pub fn spawn_wave(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut rng: ResMut<GameRng>,
    mut waves: ResMut<WaveCounter>,
    registry: Res<EnemyRegistry>,
    config: Res<SpawnConfig>,
    map: Option<Res<TileMap>>,
    player_query: Query<&Player>,
    enemy_query: Query<(), With<Enemy>>,
) {
    if !enemy_query.is_empty() {
        return;
    }
    let (Some(map), Ok(player)) = (map, player_query.get_single()) else {
        return;
    };
    let Some(definition) = registry.get(&config.enemy_type) else {
        warn!("Unknown enemy type in spawn config: {}", config.enemy_type);
        return;
    };

    let points = pick_spawn_points(
        &map,
        player.position(),
        config.enemy_count,
        config.min_player_distance,
        &mut rng.0,
    );
    if points.is_empty() {
        warn!("No room to spawn enemies");
        return;
    }

    for &position in &points {
        spawn_enemy(
            &mut commands,
            &mut meshes,
            &mut materials,
            definition,
            position,
            map.size(),
        );
    }

    waves.0 += 1;
    info!("Wave {}: spawned {} {}", waves.0, points.len(), definition.name);
}

/// Reset the wave count for a new session.
pub fn reset_waves(mut waves: ResMut<WaveCounter>) {
    waves.0 = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawn_points_are_walkable_distinct_and_far() {
        let mut rng = StdRng::seed_from_u64(11);
        let map = TileMap::generate(30, 30, 32.0, &mut rng);
        let avoid = Vec2::new(480.0, 480.0);

        let points = pick_spawn_points(&map, avoid, 6, 160.0, &mut rng);

        assert_eq!(points.len(), 6);
        for (i, point) in points.iter().enumerate() {
            assert!(map.is_walkable(*point));
            assert!(point.distance(avoid) >= 160.0);
            assert!(!points[i + 1..].contains(point));
        }
    }

    #[test]
    fn spawn_points_capped_by_room() {
        use crate::world::TileKind::{Grass, Wall};

        let mut rng = StdRng::seed_from_u64(2);
        let map = TileMap::from_rows(
            &[
                vec![Wall, Wall, Wall, Wall],
                vec![Wall, Grass, Grass, Wall],
                vec![Wall, Wall, Wall, Wall],
            ],
            32.0,
        );

        let points = pick_spawn_points(&map, Vec2::new(-1000.0, 0.0), 6, 10.0, &mut rng);
        assert_eq!(points.len(), 2);

        let none = pick_spawn_points(&map, Vec2::new(64.0, 48.0), 6, 500.0, &mut rng);
        assert!(none.is_empty());
    }
}
