//! World plugin - map generation, tile rendering and the follow camera.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::Actor;
use crate::core::{GameRng, GameState, GameplaySet};
use crate::player::{spawn_player, Player, PlayerConfig};
use crate::rendering::{PlayerSpriteSheet, TilesetAtlas, VisualConfig};

use super::camera::{CameraConfig, FollowCamera};
use super::tiles::{map_to_translation, LevelEntity, TileMap, TileSprite};

/// Map shape, loaded as the `world` section of the game config.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Columns
    pub width: u32,
    /// Rows
    pub height: u32,
    /// Edge length of one tile in pixels
    pub tile_size: f32,
    /// Preferred player start; the nearest walkable tile is used
    pub player_start: (f32, f32),
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 40,
            tile_size: 32.0,
            player_start: (400.0, 300.0),
        }
    }
}

/// Tiles sit below everything else.
const TILE_Z: f32 = 0.0;

/// World plugin - handles world setup and camera follow.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), setup_world)
            .add_systems(OnExit(GameState::InGame), cleanup_world)
            .add_systems(Update, follow_player.in_set(GameplaySet::Camera))
            .add_systems(
                Update,
                (sync_camera_transform, cull_tiles)
                    .chain()
                    .in_set(GameplaySet::Render),
            );
    }
}

/// Walkable tile centre closest to `preferred`, or the map centre when
/// nothing is walkable.
pub fn player_start(map: &TileMap, preferred: Vec2) -> Vec2 {
    map.walkable_cells()
        .map(|cell| map.tile_center(cell.x, cell.y))
        .min_by(|a, b| a.distance_squared(preferred).total_cmp(&b.distance_squared(preferred)))
        .unwrap_or_else(|| map.bounds().center())
}

/// Generate the map and spawn tiles, camera and player.
#[allow(clippy::too_many_arguments)]
pub fn setup_world(
    mut commands: Commands,
    mut rng: ResMut<GameRng>,
    world_config: Res<WorldConfig>,
    camera_config: Res<CameraConfig>,
    player_config: Res<PlayerConfig>,
    visual_config: Res<VisualConfig>,
    player_sheet: Res<PlayerSpriteSheet>,
    tileset: Option<Res<TilesetAtlas>>,
) {
    let map = TileMap::generate(
        world_config.width,
        world_config.height,
        world_config.tile_size,
        &mut rng.0,
    );
    info!(
        "Generated {}x{} world ({} walkable tiles)",
        map.width(),
        map.height(),
        map.walkable_cells().count()
    );

    spawn_tiles(&mut commands, &map, &visual_config, tileset.as_deref());

    let preferred = Vec2::new(world_config.player_start.0, world_config.player_start.1);
    let start = player_start(&map, preferred);

    let mut camera = FollowCamera::from_config(&camera_config, map.bounds());
    camera.snap_to(start);
    commands.spawn((
        Camera2d,
        Transform::from_translation(map_to_translation(camera.center(), 0.0)),
        camera,
        LevelEntity,
    ));

    spawn_player(&mut commands, start, &player_config, &player_sheet);
    commands.insert_resource(map);
}

fn spawn_tiles(
    commands: &mut Commands,
    map: &TileMap,
    visual_config: &VisualConfig,
    tileset: Option<&TilesetAtlas>,
) {
    let size = Vec2::splat(map.tile_size());

    for (cell, tile) in map.iter() {
        let sprite = match tileset {
            Some(atlas) => Sprite {
                image: atlas.image.clone(),
                texture_atlas: Some(TextureAtlas {
                    layout: atlas.layout.clone(),
                    index: tile.kind.atlas_index(),
                }),
                custom_size: Some(size),
                ..default()
            },
            None => Sprite::from_color(visual_config.tile_color(tile.kind), size),
        };

        commands.spawn((
            sprite,
            Transform::from_translation(map_to_translation(map.tile_center(cell.x, cell.y), TILE_Z)),
            TileSprite { cell },
            LevelEntity,
        ));
    }
}

/// Ease the camera toward the player.
fn follow_player(
    player_query: Query<&Player>,
    mut camera_query: Query<&mut FollowCamera>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    for mut camera in camera_query.iter_mut() {
        camera.update(player.position());
    }
}

fn sync_camera_transform(mut query: Query<(&FollowCamera, &mut Transform)>) {
    for (camera, mut transform) in query.iter_mut() {
        transform.translation = map_to_translation(camera.center(), transform.translation.z);
    }
}

/// Hide coloured tiles outside the camera view. Atlas tiles are left to
/// Bevy's own frustum culling.
fn cull_tiles(
    map: Option<Res<TileMap>>,
    tileset: Option<Res<TilesetAtlas>>,
    camera_query: Query<&FollowCamera>,
    mut tiles: Query<(&TileSprite, &mut Visibility)>,
) {
    if tileset.is_some() {
        return;
    }
    let (Some(map), Ok(camera)) = (map, camera_query.get_single()) else {
        return;
    };

    let (columns, rows) = map.visible_range(camera.view_bounds());
    for (tile, mut visibility) in tiles.iter_mut() {
        let shown = columns.contains(&tile.cell.x) && rows.contains(&tile.cell.y);
        visibility.set_if_neq(if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

/// Clean up world entities when leaving InGame state.
fn cleanup_world(mut commands: Commands, query: Query<Entity, With<LevelEntity>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<TileMap>();
}
