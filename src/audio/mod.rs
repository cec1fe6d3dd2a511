//! Audio module - sound bookkeeping, kira backend and gameplay triggers.

mod backend;
mod plugin;
mod sound_manager;

pub use plugin::{AudioConfig, AudioPlugin};
pub use sound_manager::{
    AudioCommand, AudioError, ChannelId, MusicTrack, PlaybackStatus, SoundEffect, SoundManager,
};
