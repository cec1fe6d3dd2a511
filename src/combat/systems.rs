//! Combat resolution - sword hits, projectile hits and deaths.

use bevy::prelude::*;

use super::collision::{circle_overlaps_rect, rects_overlap};
use super::components::*;
use crate::core::{EnemyEvent, GameState, GameplaySet};
use crate::enemies::Enemy;
use crate::player::Player;

/// Ordering of combat resolution inside [`GameplaySet::Combat`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Hits,
    Deaths,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (CombatSet::Hits, CombatSet::Deaths)
            .chain()
            .in_set(GameplaySet::Combat),
    )
    .add_systems(
        Update,
        (process_sword_hits, process_projectile_hits)
            .chain()
            .in_set(CombatSet::Hits),
    )
    .add_systems(
        Update,
        (despawn_spent_enemies, check_player_death).in_set(CombatSet::Deaths),
    );
}

/// Strike `enemy` with the player's active swing.
///
/// Each swing damages a given enemy at most once, however many frames the
/// blade overlaps it.
pub fn resolve_sword_hit(player: &Player, enemy: &mut Enemy, damage: f32) -> Option<HitOutcome> {
    let hitbox = player.sword_hitbox()?;
    if !enemy.is_alive() || !rects_overlap(hitbox, enemy.bounds()) {
        return None;
    }
    if !enemy.register_swing(player.swing()) || !enemy.take_damage(damage) {
        return None;
    }

    Some(if enemy.is_alive() {
        HitOutcome::Wounded
    } else {
        HitOutcome::Defeated
    })
}

/// Consume every projectile of `enemy` touching the player and damage the
/// player for each. Returns how many projectiles struck.
///
/// A projectile that reaches an invincible player is still consumed.
pub fn resolve_projectile_hits(player: &mut Player, enemy: &mut Enemy, damage: f32) -> usize {
    if !player.is_alive() {
        return 0;
    }

    let body = player.bounds();
    let mut struck = 0;
    for projectile in enemy.projectiles_mut().iter_mut() {
        if !projectile.is_alive() || !rects_overlap(projectile.bounds(), body) {
            continue;
        }
        let (center, radius) = projectile.circle();
        if circle_overlaps_rect(center, radius, body) {
            projectile.mark_for_deletion();
            player.take_damage(damage);
            struck += 1;
        }
    }
    struck
}

fn process_sword_hits(
    config: Res<CombatConfig>,
    player_query: Query<&Player>,
    mut enemy_query: Query<(Entity, &mut Enemy)>,
    mut events: EventWriter<EnemyEvent>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    if !player.is_attacking() {
        return;
    }

    for (entity, mut enemy) in enemy_query.iter_mut() {
        match resolve_sword_hit(player, &mut enemy, config.sword_damage) {
            Some(HitOutcome::Wounded) => {
                events.send(EnemyEvent::Hit { enemy: entity });
            }
            Some(HitOutcome::Defeated) => {
                info!("{:?} defeated", enemy.kind());
                events.send(EnemyEvent::Defeated {
                    enemy: entity,
                    kind: enemy.kind(),
                });
            }
            None => {}
        }
    }
}

fn process_projectile_hits(
    config: Res<CombatConfig>,
    mut player_query: Query<&mut Player>,
    mut enemy_query: Query<&mut Enemy>,
) {
    let Ok(mut player) = player_query.get_single_mut() else {
        return;
    };

    for mut enemy in enemy_query.iter_mut() {
        resolve_projectile_hits(&mut player, &mut enemy, config.projectile_damage);
    }
}

/// Dead enemies linger until their last projectile is gone.
fn despawn_spent_enemies(mut commands: Commands, query: Query<(Entity, &Enemy)>) {
    for (entity, enemy) in query.iter() {
        if enemy.is_spent() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

fn check_player_death(
    player_query: Query<&Player>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if player_query.iter().any(|player| !player.is_alive()) {
        next_state.set(GameState::GameOver);
    }
}
