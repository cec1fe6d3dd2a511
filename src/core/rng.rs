//! Shared random number generator resource.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random source for world generation, wandering and spawn placement.
///
/// Pure game logic takes `&mut impl Rng`; systems hand it this generator.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl GameRng {
    /// Deterministic generator, used by tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}
