//! Player input, two-phase movement and sprite sync.

use bevy::prelude::*;

use super::components::*;
use crate::combat::Actor;
use crate::core::{GameplaySet, PlayerEvent};
use crate::rendering::{PlayerSpriteSheet, VisualConfig};
use crate::world::{map_to_translation, LevelEntity, TileMap};

/// Player draws above tiles and enemies.
const PLAYER_Z: f32 = 10.0;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(Update, read_player_input.in_set(GameplaySet::Input))
        .add_systems(
            Update,
            (update_player, validate_player_move)
                .chain()
                .in_set(GameplaySet::Movement),
        )
        .add_systems(Update, forward_player_events.in_set(GameplaySet::Feedback))
        .add_systems(
            Update,
            (sync_player_sprite, draw_sword).in_set(GameplaySet::Render),
        );
}

/// Sample the keyboard into a [`PlayerInput`].
///
/// Movement: WASD or arrows. Attack: Space. Debug health: H heals, K hurts.
pub fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player_query: Query<&mut Player>,
) {
    let Ok(mut player) = player_query.get_single_mut() else {
        return;
    };

    let mut movement = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        movement.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        movement.x += 1.0;
    }
    // Map space is y-down
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        movement.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        movement.y += 1.0;
    }

    player.handle_input(PlayerInput {
        movement,
        attack: keyboard.just_pressed(KeyCode::Space),
        heal: keyboard.pressed(KeyCode::KeyH),
        hurt: keyboard.pressed(KeyCode::KeyK),
    });
}

/// Advance the player's state machine, producing a pending position.
fn update_player(time: Res<Time>, mut player_query: Query<&mut Player>) {
    for mut player in player_query.iter_mut() {
        player.update(time.delta_secs());
    }
}

/// Commit the pending position only if the world does not block it.
fn validate_player_move(map: Option<Res<TileMap>>, mut player_query: Query<&mut Player>) {
    for mut player in player_query.iter_mut() {
        let blocked = match (&map, player.pending_bounds()) {
            (Some(map), Some(bounds)) => map.check_collision(bounds),
            _ => false,
        };
        player.commit_pending(blocked);
    }
}

/// Forward the player's queued lifecycle events into Bevy's event queue.
pub fn forward_player_events(
    mut player_query: Query<&mut Player>,
    mut events: EventWriter<PlayerEvent>,
) {
    for mut player in player_query.iter_mut() {
        let drained = player.drain_events();
        if drained.contains(&PlayerEvent::Died) {
            info!("Player died");
        }
        events.send_batch(drained);
    }
}

fn sync_player_sprite(mut query: Query<(&Player, &mut Transform, &mut Sprite, &mut Visibility)>) {
    for (player, mut transform, mut sprite, mut visibility) in query.iter_mut() {
        transform.translation = map_to_translation(player.position(), PLAYER_Z);

        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = player.sprite_index();
        }

        visibility.set_if_neq(if player.blink_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

/// Outline the blade while a swing is active.
fn draw_sword(mut gizmos: Gizmos, player_query: Query<&Player>, visual_config: Res<VisualConfig>) {
    let color = VisualConfig::color(visual_config.sword_color);
    for player in player_query.iter() {
        let Some((center, angle)) = player.sword_pose() else {
            continue;
        };
        // Flip into Bevy's y-up space
        let isometry = Isometry2d::new(Vec2::new(center.x, -center.y), Rot2::radians(-angle));
        gizmos.rect_2d(isometry, player.sword_size(), color);
    }
}

/// Spawn the player entity at a map position.
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec2,
    config: &PlayerConfig,
    sheet: &PlayerSpriteSheet,
) -> Entity {
    let player = Player::new(position, config);
    let index = player.sprite_index();

    commands
        .spawn((
            player,
            Sprite {
                image: sheet.image.clone(),
                texture_atlas: Some(TextureAtlas {
                    layout: sheet.layout.clone(),
                    index,
                }),
                custom_size: Some(Vec2::splat(config.sprite_size)),
                ..default()
            },
            Transform::from_translation(map_to_translation(position, PLAYER_Z)),
            Visibility::default(),
            LevelEntity,
        ))
        .id()
}
