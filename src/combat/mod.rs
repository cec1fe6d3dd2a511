//! Combat module - health, hit tests and per-frame hit resolution.

mod collision;
mod components;
mod plugin;
mod systems;

pub use collision::{circle_overlaps_rect, rects_overlap};
pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::{resolve_projectile_hits, resolve_sword_hit, CombatSet};
