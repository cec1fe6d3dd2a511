//! Drives the per-frame gameplay pipeline through the library API:
//! input, movement validation, enemy AI, hit resolution.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use overworld::combat::{resolve_projectile_hits, resolve_sword_hit, Actor, HitOutcome};
use overworld::core::PlayerEvent;
use overworld::enemies::{Enemy, EnemyDefinition, Projectile};
use overworld::player::{Player, PlayerConfig, PlayerInput};
use overworld::world::{TileKind, TileMap};

const DT: f32 = 1.0 / 60.0;

/// 25 × 19 grass field ringed by wall.
fn field() -> TileMap {
    let (width, height) = (25, 19);
    let rows: Vec<Vec<TileKind>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        TileKind::Wall
                    } else {
                        TileKind::Grass
                    }
                })
                .collect()
        })
        .collect();
    TileMap::from_rows(&rows, 32.0)
}

struct Frame {
    map: TileMap,
    player: Player,
    enemy: Enemy,
    rng: StdRng,
    events: Vec<PlayerEvent>,
}

impl Frame {
    fn new(player_at: Vec2, enemy_at: Vec2) -> Self {
        let map = field();
        let arena = map.size();
        Self {
            player: Player::new(player_at, &PlayerConfig::default()),
            enemy: Enemy::new(&EnemyDefinition::octorok(), enemy_at, arena),
            map,
            rng: StdRng::seed_from_u64(99),
            events: Vec::new(),
        }
    }

    /// One frame in system order. Returns the sword outcome, if any.
    fn step(&mut self, input: PlayerInput) -> Option<HitOutcome> {
        self.player.handle_input(input);
        self.player.update(DT);
        let blocked = self
            .player
            .pending_bounds()
            .is_some_and(|bounds| self.map.check_collision(bounds));
        self.player.commit_pending(blocked);

        self.enemy.update_ai(self.player.position(), DT, &mut self.rng);
        let was_alive = self.enemy.is_alive();
        self.enemy.update(DT);
        if was_alive && self.map.check_collision(self.enemy.bounds()) {
            self.enemy.bounce_back();
        }

        let outcome = resolve_sword_hit(&self.player, &mut self.enemy, 1.0);
        resolve_projectile_hits(&mut self.player, &mut self.enemy, 1.0);
        self.events.extend(self.player.drain_events());
        outcome
    }
}

fn attack() -> PlayerInput {
    PlayerInput {
        attack: true,
        ..default()
    }
}

fn face(direction: Vec2) -> PlayerInput {
    PlayerInput {
        movement: direction,
        ..default()
    }
}

#[test]
fn sword_swing_in_front_costs_exactly_one_health() {
    let mut frame = Frame::new(Vec2::new(400.0, 300.0), Vec2::new(430.0, 300.0));
    // Stationary target
    frame.enemy.set_move_direction(Vec2::ZERO);

    // Face right without moving
    frame.player.handle_input(face(Vec2::X));

    let mut hits = Vec::new();
    hits.extend(frame.step(attack()));
    for _ in 0..30 {
        hits.extend(frame.step(PlayerInput::default()));
    }

    assert_eq!(hits, vec![HitOutcome::Wounded]);
    assert_eq!(frame.enemy.health().current, 2.0);
    assert!(frame.events.contains(&PlayerEvent::Attacked));
}

#[test]
fn defeated_enemy_stops_thinking_but_its_shot_flies_on() {
    let mut frame = Frame::new(Vec2::new(400.0, 300.0), Vec2::new(430.0, 300.0));
    frame.enemy.set_move_direction(Vec2::ZERO);
    frame.player.handle_input(face(Vec2::X));

    // A rock already in flight, heading away from the player
    frame
        .enemy
        .projectiles_mut()
        .spawn(Projectile::new(Vec2::new(500.0, 100.0), Vec2::new(0.0, -150.0), 4.0));
    frame.enemy.take_damage(2.0);

    let outcome = frame.step(attack());
    assert_eq!(outcome, Some(HitOutcome::Defeated));
    assert!(!frame.enemy.is_alive());

    let position = frame.enemy.position();
    let direction = frame.enemy.move_direction();
    let shot_before = frame.enemy.projectiles().iter().next().unwrap().position();

    frame.step(PlayerInput::default());

    assert_eq!(frame.enemy.position(), position);
    assert_eq!(frame.enemy.move_direction(), direction);
    let shot_after = frame.enemy.projectiles().iter().next().unwrap().position();
    assert!(shot_after.y < shot_before.y);

    // Once the rock leaves the arena the enemy can be cleaned up
    for _ in 0..120 {
        frame.step(PlayerInput::default());
    }
    assert!(frame.enemy.is_spent());
}

#[test]
fn walls_stop_the_player() {
    let mut frame = Frame::new(Vec2::new(48.0, 300.0), Vec2::new(700.0, 500.0));

    for _ in 0..60 {
        frame.step(face(Vec2::NEG_X));
    }

    // Body is 16 px wide; the wall tile ends at x = 32
    assert!(frame.player.position().x - 8.0 >= 32.0);
    assert!(frame.player.position().x < 48.0);
    assert_eq!(frame.events.first(), Some(&PlayerEvent::WalkStarted));
}

#[test]
fn enemy_shots_wound_the_player_once_per_invincibility_window() {
    let mut frame = Frame::new(Vec2::new(400.0, 300.0), Vec2::new(600.0, 300.0));

    // Chase turns the Octorok toward the player; shots follow its heading
    for _ in 0..200 {
        frame.step(PlayerInput::default());
    }
    assert!(frame.enemy.position().distance(frame.player.position()) < 300.0);

    let hits = frame
        .events
        .iter()
        .filter(|&&event| event == PlayerEvent::Hit)
        .count();
    assert!(hits >= 1);
    assert!(frame.player.health().current <= 5.0);
    assert!(frame.player.is_alive());
}
