//! Enemy projectiles and the per-enemy arena that owns them.

use bevy::prelude::*;

/// Distance past the arena edge a projectile may travel before it is culled.
pub const BOUNDS_MARGIN: f32 = 50.0;

/// A ballistic point moving at constant velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    position: Vec2,
    /// Pixels per second
    velocity: Vec2,
    radius: f32,
    alive: bool,
}

impl Projectile {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            alive: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Whether the projectile has left `[0, area]` by more than the margin.
    pub fn is_out_of_bounds(&self, area: Vec2) -> bool {
        self.position.x < -BOUNDS_MARGIN
            || self.position.x > area.x + BOUNDS_MARGIN
            || self.position.y < -BOUNDS_MARGIN
            || self.position.y > area.y + BOUNDS_MARGIN
    }

    /// Flag for removal; the owning arena drops it on its next advance.
    pub fn mark_for_deletion(&mut self) {
        self.alive = false;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_half_size(self.position, Vec2::splat(self.radius))
    }

    /// Center and radius, for circle tests.
    pub fn circle(&self) -> (Vec2, f32) {
        (self.position, self.radius)
    }
}

/// Projectiles fired by a single enemy. Nothing else holds them.
#[derive(Debug, Clone, Default)]
pub struct ProjectileArena {
    projectiles: Vec<Projectile>,
}

impl ProjectileArena {
    pub fn spawn(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Move every projectile, then drop the dead and the out-of-bounds.
    pub fn advance(&mut self, dt: f32, area: Vec2) {
        self.projectiles.retain_mut(|projectile| {
            projectile.update(dt);
            projectile.is_alive() && !projectile.is_out_of_bounds(area)
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}
