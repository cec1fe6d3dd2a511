//! Enemy AI and movement systems.

use bevy::prelude::*;

use super::components::{AiBehavior, Enemy};
use crate::combat::Actor;
use crate::core::GameRng;
use crate::player::Player;
use crate::world::TileMap;

/// Pick each enemy's heading from the player's position.
pub fn enemy_think(
    time: Res<Time>,
    mut rng: ResMut<GameRng>,
    player_query: Query<&Player>,
    mut enemy_query: Query<&mut Enemy>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let player_position = player.position();

    for mut enemy in enemy_query.iter_mut() {
        enemy.update_ai(player_position, time.delta_secs(), &mut rng.0);
    }
}

/// Move enemies, fire their shots and advance their projectiles.
pub fn enemy_move(
    time: Res<Time>,
    map: Option<Res<TileMap>>,
    mut enemy_query: Query<&mut Enemy>,
) {
    for mut enemy in enemy_query.iter_mut() {
        let was_alive = enemy.is_alive();
        enemy.update(time.delta_secs());

        // A body reaching into a blocked tile turns the enemy around
        if let Some(map) = &map {
            if was_alive && map.check_collision(enemy.bounds()) {
                enemy.bounce_back();
            }
        }
    }
}

/// True while any living enemy is chasing the player.
pub fn any_enemy_chasing<'a>(enemies: impl IntoIterator<Item = &'a Enemy>) -> bool {
    enemies
        .into_iter()
        .any(|enemy| enemy.is_alive() && enemy.behavior() == AiBehavior::Chase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::data::EnemyDefinition;
    use crate::world::TileKind::{Grass, Wall};

    fn octorok_at(position: Vec2) -> Enemy {
        Enemy::new(&EnemyDefinition::octorok(), position, Vec2::new(160.0, 96.0))
    }

    /// 6 × 5 grass room ringed by wall; the interior spans x 32..160, y 32..128.
    fn room() -> TileMap {
        let mut rows = vec![vec![Wall; 6]];
        for _ in 0..3 {
            rows.push(vec![Wall, Grass, Grass, Grass, Grass, Wall]);
        }
        rows.push(vec![Wall; 6]);
        TileMap::from_rows(&rows, 32.0)
    }

    fn step_enemy(position: Vec2, millis: u64) -> Enemy {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(room())
            .add_systems(Update, enemy_move);
        let entity = app.world_mut().spawn(octorok_at(position)).id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(std::time::Duration::from_millis(millis));
        app.update();

        app.world_mut().entity_mut(entity).take::<Enemy>().unwrap()
    }

    #[test]
    fn enemy_bounces_off_walls() {
        // Heading +x; a 20 px step pushes the body's east edge past x = 160
        let enemy = step_enemy(Vec2::new(128.0, 80.0), 250);

        assert_eq!(enemy.position(), Vec2::new(128.0, 80.0));
        assert_eq!(enemy.move_direction(), Vec2::NEG_X);
    }

    #[test]
    fn body_flush_with_tile_edges_keeps_moving() {
        // Body starts exactly filling tile (2, 2)
        let enemy = step_enemy(Vec2::new(80.0, 80.0), 200);

        assert_eq!(enemy.position(), Vec2::new(96.0, 80.0));
        assert_eq!(enemy.move_direction(), Vec2::X);
    }

    #[test]
    fn chasing_requires_a_living_chaser() {
        let mut rng = GameRng::seeded(1);
        let mut near = octorok_at(Vec2::new(10.0, 10.0));
        let far = octorok_at(Vec2::new(1000.0, 1000.0));
        near.update_ai(Vec2::new(50.0, 10.0), 0.016, &mut rng.0);

        assert!(any_enemy_chasing([&near, &far]));
        assert!(!any_enemy_chasing([&far]));

        near.take_damage(10.0);
        assert!(!any_enemy_chasing([&near, &far]));
    }
}
