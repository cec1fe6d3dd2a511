//! Player state machine, input snapshot and tuning.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::{Actor, Health};
use crate::core::PlayerEvent;

/// Animation/behaviour state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Walk,
    Attack,
    /// Reserved for a dodge move; never entered yet.
    Dash,
}

/// One frame of sampled input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Raw direction, each axis in `-1..=1` (y down)
    pub movement: Vec2,
    /// Attack key went down this frame
    pub attack: bool,
    /// Debug: restore health
    pub heal: bool,
    /// Debug: take damage
    pub hurt: bool,
}

/// Player tuning, loaded as the `player` section of the game config.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Movement speed in pixels per second
    pub speed: f32,
    pub max_health: f32,
    /// Body used for world collision, in pixels
    pub body_size: (f32, f32),
    /// Seconds per walk animation frame
    pub frame_time: f32,
    /// Size of one sprite sheet cell in texels
    pub frame_size: u32,
    /// Animation frames per direction row
    pub frames_per_row: u32,
    /// Rendered sprite size in pixels
    pub sprite_size: f32,
    /// Sword swing length in seconds
    pub attack_duration: f32,
    /// Blade length from the player's center
    pub sword_reach: f32,
    /// Blade thickness across the facing direction
    pub sword_width: f32,
    /// Seconds of invincibility after being hit
    pub invincibility_duration: f32,
    /// Minimum seconds between debug heal/damage key activations
    pub debug_key_cooldown: f32,
    /// Health restored or removed per debug key press
    pub debug_key_amount: f32,
    /// Sprite sheet path relative to `assets/`
    pub sprite_sheet: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 140.0,
            max_health: 6.0,
            body_size: (16.0, 16.0),
            frame_time: 0.04,
            frame_size: 16,
            frames_per_row: 4,
            sprite_size: 32.0,
            attack_duration: 0.3,
            sword_reach: 32.0,
            sword_width: 32.0,
            invincibility_duration: 1.0,
            debug_key_cooldown: 0.25,
            debug_key_amount: 1.0,
            sprite_sheet: "sprites/link_64x64_spritesheet.png".to_string(),
        }
    }
}

/// The player character.
///
/// Movement is two-phase: `update` computes a pending position, the world
/// validates its bounds, and `commit_pending` applies or discards it.
#[derive(Component, Debug, Clone)]
pub struct Player {
    position: Vec2,
    pending: Option<Vec2>,
    health: Health,
    speed: f32,
    body_size: Vec2,
    movement: Vec2,
    facing: Vec2,
    state: PlayerState,
    // animation
    frame: u32,
    frame_acc: f32,
    frame_time: f32,
    frames_per_row: u32,
    // sword
    attack_requested: bool,
    attack_elapsed: f32,
    attack_duration: f32,
    swing: u32,
    sword_reach: f32,
    sword_width: f32,
    // timers
    invincible_for: f32,
    invincibility_duration: f32,
    debug_cooldown: f32,
    debug_key_cooldown: f32,
    debug_key_amount: f32,
    walking: bool,
    events: Vec<PlayerEvent>,
}

impl Player {
    pub fn new(position: Vec2, config: &PlayerConfig) -> Self {
        Self {
            position,
            pending: None,
            health: Health::new(config.max_health),
            speed: config.speed,
            body_size: Vec2::new(config.body_size.0, config.body_size.1),
            movement: Vec2::ZERO,
            facing: Vec2::new(0.0, 1.0),
            state: PlayerState::Idle,
            frame: 0,
            frame_acc: 0.0,
            frame_time: config.frame_time,
            frames_per_row: config.frames_per_row.max(1),
            attack_requested: false,
            attack_elapsed: 0.0,
            attack_duration: config.attack_duration,
            swing: 0,
            sword_reach: config.sword_reach,
            sword_width: config.sword_width,
            invincible_for: 0.0,
            invincibility_duration: config.invincibility_duration,
            debug_cooldown: 0.0,
            debug_key_cooldown: config.debug_key_cooldown,
            debug_key_amount: config.debug_key_amount,
            walking: false,
            events: Vec::new(),
        }
    }

    /// Record this frame's input: movement, facing, attack intent and the
    /// debug health keys.
    pub fn handle_input(&mut self, input: PlayerInput) {
        if !self.is_alive() {
            self.movement = Vec2::ZERO;
            return;
        }

        self.movement = input.movement;
        if let Some(direction) = input.movement.try_normalize() {
            self.facing = direction;
        }
        if input.attack {
            self.attack_requested = true;
        }

        if (input.heal || input.hurt) && self.debug_cooldown <= 0.0 {
            if input.heal {
                self.heal(self.debug_key_amount);
            }
            if input.hurt {
                self.take_damage(self.debug_key_amount);
            }
            self.debug_cooldown = self.debug_key_cooldown;
        }
    }

    fn advance(&mut self, dt: f32) {
        if !self.is_alive() {
            return;
        }
        let dt = dt.max(0.0);

        self.invincible_for = (self.invincible_for - dt).max(0.0);
        self.debug_cooldown = (self.debug_cooldown - dt).max(0.0);

        if self.attack_requested && self.state != PlayerState::Attack {
            self.state = PlayerState::Attack;
            self.attack_elapsed = 0.0;
            self.frame = 0;
            self.swing = self.swing.wrapping_add(1);
            self.events.push(PlayerEvent::Attacked);
        }
        self.attack_requested = false;

        if self.state == PlayerState::Attack {
            self.attack_elapsed += dt;
            if self.attack_elapsed >= self.attack_duration {
                self.state = PlayerState::Idle;
                self.attack_elapsed = 0.0;
            }
            self.pending = Some(self.position);
        } else if let Some(direction) = self.movement.try_normalize() {
            self.state = PlayerState::Walk;
            self.advance_animation(dt);
            self.pending = Some(self.position + direction * self.speed * dt);
        } else {
            self.state = PlayerState::Idle;
            self.frame = 0;
            self.frame_acc = 0.0;
            self.pending = Some(self.position);
        }

        self.set_walking(self.state == PlayerState::Walk);
    }

    fn advance_animation(&mut self, dt: f32) {
        if self.frame_time <= 0.0 {
            return;
        }
        self.frame_acc += dt;
        while self.frame_acc >= self.frame_time {
            self.frame_acc -= self.frame_time;
            self.frame = (self.frame + 1) % self.frames_per_row;
        }
    }

    fn set_walking(&mut self, walking: bool) {
        if walking == self.walking {
            return;
        }
        self.walking = walking;
        self.events.push(if walking {
            PlayerEvent::WalkStarted
        } else {
            PlayerEvent::WalkStopped
        });
    }

    /// Bounds the player would occupy at the pending position.
    pub fn pending_bounds(&self) -> Option<Rect> {
        self.pending
            .map(|position| Rect::from_center_size(position, self.body_size))
    }

    /// Apply the pending position unless the world blocked it. The pending
    /// slot is consumed either way.
    pub fn commit_pending(&mut self, blocked: bool) {
        if let Some(position) = self.pending.take() {
            if !blocked {
                self.position = position;
            }
        }
    }

    /// Restore health, clamped to the maximum. The dead stay dead.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() {
            return 0.0;
        }
        self.health.heal(amount)
    }

    fn apply_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() || self.is_invincible() {
            return false;
        }
        if self.health.take_damage(amount) <= 0.0 {
            return false;
        }

        self.invincible_for = self.invincibility_duration;
        self.events.push(PlayerEvent::Hit);

        if self.health.is_dead() {
            self.force_stop();
            self.events.push(PlayerEvent::Died);
        }
        true
    }

    /// Halt all motion outside the normal state transitions.
    fn force_stop(&mut self) {
        self.state = PlayerState::Idle;
        self.movement = Vec2::ZERO;
        self.pending = None;
        self.attack_requested = false;
        self.frame = 0;
        self.frame_acc = 0.0;
        self.set_walking(false);
    }

    /// Axis-aligned bounds of the sword blade while a swing is active.
    ///
    /// The blade runs `sword_reach` from the player's center along the
    /// facing direction and is `sword_width` thick.
    pub fn sword_hitbox(&self) -> Option<Rect> {
        if self.state != PlayerState::Attack {
            return None;
        }
        let direction = self.facing;
        let across = direction.perp() * (self.sword_width / 2.0);
        let tip = self.position + direction * self.sword_reach;

        let corners = [
            self.position + across,
            self.position - across,
            tip + across,
            tip - across,
        ];
        let min = corners.iter().copied().fold(Vec2::MAX, Vec2::min);
        let max = corners.iter().copied().fold(Vec2::MIN, Vec2::max);
        Some(Rect::from_corners(min, max))
    }

    /// Center and rotation (radians) of the blade, for drawing.
    pub fn sword_pose(&self) -> Option<(Vec2, f32)> {
        if self.state != PlayerState::Attack {
            return None;
        }
        let center = self.position + self.facing * (self.sword_reach / 2.0);
        Some((center, self.facing.y.atan2(self.facing.x)))
    }

    /// Blade length and thickness.
    pub fn sword_size(&self) -> Vec2 {
        Vec2::new(self.sword_reach, self.sword_width)
    }

    /// Sprite sheet row for the facing direction: down, left, right, up.
    /// Horizontal wins when both axes are equal.
    pub fn direction_row(&self) -> u32 {
        if self.facing.x.abs() >= self.facing.y.abs() {
            if self.facing.x < 0.0 {
                1
            } else {
                2
            }
        } else if self.facing.y < 0.0 {
            3
        } else {
            0
        }
    }

    /// Index into the sprite sheet atlas.
    pub fn sprite_index(&self) -> usize {
        (self.direction_row() * self.frames_per_row + self.frame) as usize
    }

    /// Take the events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Counter identifying the current (or last) sword swing.
    pub fn swing(&self) -> u32 {
        self.swing
    }

    pub fn pending(&self) -> Option<Vec2> {
        self.pending
    }

    pub fn is_attacking(&self) -> bool {
        self.state == PlayerState::Attack
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_for > 0.0
    }

    /// Blink phase while invincible; false means "skip drawing this frame".
    pub fn blink_visible(&self) -> bool {
        !self.is_invincible() || ((self.invincible_for * 10.0) as i32) % 2 == 0
    }
}

impl Actor for Player {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn health(&self) -> &Health {
        &self.health
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, self.body_size)
    }

    fn update(&mut self, dt: f32) {
        self.advance(dt);
    }

    fn take_damage(&mut self, amount: f32) -> bool {
        self.apply_damage(amount)
    }
}
