//! Combat-related components and the shared actor contract.

use bevy::prelude::*;
use serde::Deserialize;

/// Health pool for anything that can take damage.
///
/// `current` always stays within `[0, maximum]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Remove up to `amount` health, returning how much was actually removed.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    /// Restore up to `amount` health, returning how much was actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.maximum - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        self.current / self.maximum
    }
}

/// Capability set shared by the player and every enemy variant.
///
/// Drawing is not part of the trait: each kind has a sync system that
/// copies its state into sprites and gizmos.
pub trait Actor {
    /// Center of the actor in map space (pixels, y down).
    fn position(&self) -> Vec2;

    fn health(&self) -> &Health;

    /// Axis-aligned body used for hit tests.
    fn bounds(&self) -> Rect;

    /// Advance timers and motion by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// Apply damage; returns false when the hit was ignored.
    fn take_damage(&mut self, amount: f32) -> bool;

    fn is_alive(&self) -> bool {
        !self.health().is_dead()
    }
}

/// Damage values used when resolving hits.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Damage dealt to an enemy by one sword swing
    pub sword_damage: f32,
    /// Damage dealt to the player by one projectile
    pub projectile_damage: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            sword_damage: 1.0,
            projectile_damage: 1.0,
        }
    }
}

/// What a resolved hit did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Target survived
    Wounded,
    /// Target's health reached zero
    Defeated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_never_leaves_its_range() {
        let mut health = Health::new(6.0);

        assert_eq!(health.take_damage(4.0), 4.0);
        assert_eq!(health.take_damage(10.0), 2.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());

        assert_eq!(health.heal(100.0), 6.0);
        assert_eq!(health.current, 6.0);
        assert_eq!(health.heal(1.0), 0.0);
    }

    #[test]
    fn negative_amounts_are_ignored() {
        let mut health = Health::new(3.0);
        health.take_damage(1.0);

        assert_eq!(health.take_damage(-5.0), 0.0);
        assert_eq!(health.heal(-5.0), 0.0);
        assert_eq!(health.current, 2.0);
    }

    #[test]
    fn percentage_of_empty_pool_is_zero() {
        let health = Health {
            current: 0.0,
            maximum: 0.0,
        };
        assert_eq!(health.percentage(), 0.0);
    }
}
