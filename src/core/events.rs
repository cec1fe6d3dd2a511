//! Global events used for cross-system communication.
//!
//! The player and enemies queue these while they update; systems forward
//! them into Bevy's event queues where the audio and scoring systems read
//! them once per frame.

use bevy::prelude::*;

use crate::enemies::EnemyKind;

/// Lifecycle transitions of the player.
///
/// `WalkStarted` and `WalkStopped` are edge-triggered: they strictly
/// alternate, one pair per contiguous movement segment.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    WalkStarted,
    WalkStopped,
    Attacked,
    Hit,
    Died,
}

/// Sent by combat resolution when an enemy is struck or defeated.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyEvent {
    /// Enemy took damage and survived
    Hit { enemy: Entity },
    /// Enemy health reached zero this frame
    Defeated { enemy: Entity, kind: EnemyKind },
}
