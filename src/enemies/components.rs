//! Enemy components: the shared enemy body, its AI state and spawn tuning.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;
use std::f32::consts::TAU;

use super::data::{EnemyDefinition, RangedAttack};
use super::projectile::{Projectile, ProjectileArena};
use crate::combat::{Actor, Health};

/// Below this distance an enemy stops steering toward the player.
pub const MIN_CHASE_DISTANCE: f32 = 1.0;

/// Enemy variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum EnemyKind {
    Octorok,
}

/// Which movement rule chose the current direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiBehavior {
    /// Hold a random heading, re-rolled after a dwell time
    #[default]
    Wander,
    /// Head straight at the player
    Chase,
}

/// An enemy body with its AI, ranged attack and owned projectiles.
#[derive(Component, Debug, Clone)]
pub struct Enemy {
    kind: EnemyKind,
    position: Vec2,
    previous_position: Vec2,
    health: Health,
    speed: f32,
    radius: f32,
    move_direction: Vec2,
    behavior: AiBehavior,
    detection_range: f32,
    wander_dwell: f32,
    wander_timer: f32,
    ranged: Option<RangedAttack>,
    shoot_timer: f32,
    flash_duration: f32,
    flash_timer: Option<f32>,
    /// Area projectiles may fly in before being culled
    arena: Vec2,
    projectiles: ProjectileArena,
    struck_by_swing: Option<u32>,
}

impl Enemy {
    pub fn new(definition: &EnemyDefinition, position: Vec2, arena: Vec2) -> Self {
        Self {
            kind: definition.kind,
            position,
            previous_position: position,
            health: Health::new(definition.max_health),
            speed: definition.move_speed,
            radius: definition.radius,
            move_direction: Vec2::X,
            behavior: AiBehavior::Wander,
            detection_range: definition.detection_range,
            wander_dwell: definition.wander_dwell,
            wander_timer: 0.0,
            ranged: definition.ranged.clone(),
            shoot_timer: 0.0,
            flash_duration: definition.flash_duration,
            flash_timer: None,
            arena,
            projectiles: ProjectileArena::default(),
            struck_by_swing: None,
        }
    }

    /// Choose this frame's heading: chase inside the detection range,
    /// otherwise wander.
    pub fn update_ai(&mut self, player_position: Vec2, dt: f32, rng: &mut impl Rng) {
        if !self.is_alive() {
            return;
        }

        let offset = player_position - self.position;
        let distance = offset.length();

        if distance < self.detection_range && distance > MIN_CHASE_DISTANCE {
            self.move_direction = offset / distance;
            self.behavior = AiBehavior::Chase;
        } else {
            self.behavior = AiBehavior::Wander;
            self.wander_timer += dt.max(0.0);
            if self.wander_timer > self.wander_dwell {
                let angle = rng.gen_range(0.0..TAU);
                self.move_direction = Vec2::from_angle(angle);
                self.wander_timer = 0.0;
            }
        }
    }

    fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        if self.is_alive() {
            if let Some(elapsed) = self.flash_timer.as_mut() {
                *elapsed += dt;
                if *elapsed >= self.flash_duration {
                    self.flash_timer = None;
                }
            }

            self.previous_position = self.position;
            self.position += self.move_direction * self.speed * dt;

            if let Some(ranged) = &self.ranged {
                self.shoot_timer += dt;
                if self.shoot_timer >= ranged.cooldown {
                    let projectile = Projectile::new(
                        self.position,
                        self.move_direction * ranged.projectile_speed,
                        ranged.projectile_radius,
                    );
                    self.projectiles.spawn(projectile);
                    self.shoot_timer = 0.0;
                }
            }
        }

        // In-flight projectiles outlive their shooter.
        self.projectiles.advance(dt, self.arena);
    }

    /// Undo the last step and turn around, used when the step hit a wall.
    pub fn bounce_back(&mut self) {
        self.position = self.previous_position;
        self.move_direction = -self.move_direction;
        self.wander_timer = 0.0;
    }

    /// Record a sword swing; false if this swing already struck the enemy.
    pub fn register_swing(&mut self, swing: u32) -> bool {
        if self.struck_by_swing == Some(swing) {
            return false;
        }
        self.struck_by_swing = Some(swing);
        true
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn move_direction(&self) -> Vec2 {
        self.move_direction
    }

    pub fn set_move_direction(&mut self, direction: Vec2) {
        self.move_direction = direction;
    }

    pub fn behavior(&self) -> AiBehavior {
        self.behavior
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer.is_some()
    }

    pub fn projectiles(&self) -> &ProjectileArena {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut ProjectileArena {
        &mut self.projectiles
    }

    /// Dead and with nothing left in flight.
    pub fn is_spent(&self) -> bool {
        !self.is_alive() && self.projectiles.is_empty()
    }
}

impl Actor for Enemy {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn health(&self) -> &Health {
        &self.health
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_half_size(self.position, Vec2::splat(self.radius))
    }

    fn update(&mut self, dt: f32) {
        self.advance(dt);
    }

    fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        if self.health.take_damage(amount) <= 0.0 {
            return false;
        }
        self.flash_timer = Some(0.0);
        true
    }
}

/// Render-side data for an enemy body.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyBody {
    pub color: Color,
}

/// Wave spawning tuning, loaded as the `spawning` section of the game config.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Enemies per wave
    pub enemy_count: usize,
    /// Registry key of the enemy type to spawn
    pub enemy_type: String,
    /// Enemies never spawn closer than this to the player
    pub min_player_distance: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            enemy_count: 6,
            enemy_type: "octorok".to_string(),
            min_player_distance: 160.0,
        }
    }
}
