//! Enemy rendering sync: body transform, hit flash and projectile gizmos.

use bevy::prelude::*;

use super::components::{Enemy, EnemyBody};
use super::spawning::ENEMY_Z;
use crate::combat::Actor;
use crate::rendering::VisualConfig;
use crate::world::map_to_translation;

/// Copy enemy state into transform, visibility and tint.
pub fn sync_enemy_bodies(
    visual_config: Res<VisualConfig>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(
        &Enemy,
        &EnemyBody,
        &MeshMaterial2d<ColorMaterial>,
        &mut Transform,
        &mut Visibility,
    )>,
) {
    let flash = VisualConfig::color(visual_config.flash_color);

    for (enemy, body, material, mut transform, mut visibility) in query.iter_mut() {
        transform.translation = map_to_translation(enemy.position(), ENEMY_Z);

        // The body disappears on death; its projectiles are drawn separately
        visibility.set_if_neq(if enemy.is_alive() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });

        let tint = if enemy.is_flashing() { flash } else { body.color };
        if let Some(material) = materials.get_mut(&material.0) {
            if material.color != tint {
                material.color = tint;
            }
        }
    }
}

/// Draw every live projectile as a circle.
pub fn draw_projectiles(
    mut gizmos: Gizmos,
    visual_config: Res<VisualConfig>,
    query: Query<&Enemy>,
) {
    let color = VisualConfig::color(visual_config.projectile_color);

    for enemy in query.iter() {
        for projectile in enemy.projectiles().iter().filter(|p| p.is_alive()) {
            let (center, radius) = projectile.circle();
            let isometry = Isometry2d::from_translation(Vec2::new(center.x, -center.y));
            gizmos.circle_2d(isometry, radius, color);
        }
    }
}
