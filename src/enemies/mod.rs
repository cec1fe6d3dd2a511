//! Enemies module - enemy bodies, projectiles, AI and wave spawning.

mod ai;
mod components;
pub mod data;
mod plugin;
pub mod projectile;
mod spawning;
mod visuals;

pub use ai::any_enemy_chasing;
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry, RangedAttack};
pub use plugin::EnemyPlugin;
pub use projectile::{Projectile, ProjectileArena};
pub use spawning::{pick_spawn_points, spawn_enemy, WaveCounter};
