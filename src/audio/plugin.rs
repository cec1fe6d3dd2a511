//! Audio plugin - sound loading, gameplay sound triggers and music.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use super::backend::apply_audio_commands;
use super::sound_manager::{MusicTrack, SoundEffect, SoundManager};
use crate::core::{EnemyEvent, GameState, GameplaySet, PlayState, PlayerEvent};
use crate::enemies::{any_enemy_chasing, Enemy};
use crate::player::forward_player_events;

/// Audio levels and source files, loaded as the `audio` section of the game
/// config. Volumes are percentages.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub master_volume: f32,
    pub sound_volume: f32,
    pub music_volume: f32,
    /// Volume requested for every music track
    pub track_volume: f32,
    /// Effect sources, relative to `assets/`
    pub sounds: HashMap<SoundEffect, String>,
    /// Music sources, relative to `assets/`
    pub music: HashMap<MusicTrack, String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        let sounds = [
            (SoundEffect::PlayerWalk, "sounds/player_walk.wav"),
            (SoundEffect::PlayerAttack, "sounds/player_attack.wav"),
            (SoundEffect::PlayerHit, "sounds/player_hit.wav"),
            (SoundEffect::EnemyHit, "sounds/enemy_hit.wav"),
            (SoundEffect::EnemyDeath, "sounds/enemy_death.wav"),
            (SoundEffect::GameOver, "sounds/game_over.wav"),
        ];
        let music = [
            (MusicTrack::MainTheme, "music/main_theme.ogg"),
            (MusicTrack::BattleTheme, "music/battle_theme.ogg"),
        ];

        Self {
            master_volume: 100.0,
            sound_volume: 100.0,
            music_volume: 50.0,
            track_volume: 50.0,
            sounds: sounds
                .into_iter()
                .map(|(effect, path)| (effect, path.to_string()))
                .collect(),
            music: music
                .into_iter()
                .map(|(track, path)| (track, path.to_string()))
                .collect(),
        }
    }
}

/// Audio plugin - sound manager, event-driven effects and music director.
pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundManager>()
            .add_systems(Startup, load_audio)
            .add_systems(
                Update,
                (play_player_sounds, play_enemy_sounds, direct_music)
                    .after(forward_player_events)
                    .in_set(GameplaySet::Feedback),
            )
            .add_systems(OnEnter(GameState::MainMenu), play_main_theme)
            .add_systems(OnEnter(PlayState::Paused), pause_audio)
            .add_systems(OnExit(PlayState::Paused), resume_audio)
            .add_systems(OnExit(GameState::InGame), stop_gameplay_audio)
            .add_systems(PostUpdate, apply_audio_commands);
    }
}

/// Apply configured volumes and load every configured source.
fn load_audio(
    config: Res<AudioConfig>,
    asset_server: Res<AssetServer>,
    mut manager: ResMut<SoundManager>,
) {
    manager.set_master_volume(config.master_volume);
    manager.set_sound_volume(config.sound_volume);
    manager.set_music_volume(config.music_volume);

    for (&effect, path) in &config.sounds {
        if let Err(e) = manager.load_sound(effect, path, &asset_server) {
            warn!("{}", e);
        }
    }
    for (&track, path) in &config.music {
        if let Err(e) = manager.load_music(track, path, &asset_server) {
            warn!("{}", e);
        }
    }
}

fn play_player_sounds(mut events: EventReader<PlayerEvent>, mut manager: ResMut<SoundManager>) {
    for event in events.read() {
        match event {
            PlayerEvent::WalkStarted => {
                manager.play_looping_sound(SoundEffect::PlayerWalk, 100.0);
            }
            PlayerEvent::WalkStopped => manager.stop_looping_sound(SoundEffect::PlayerWalk),
            PlayerEvent::Attacked => {
                manager.play_sound(SoundEffect::PlayerAttack, 100.0);
            }
            PlayerEvent::Hit => {
                manager.play_sound(SoundEffect::PlayerHit, 100.0);
            }
            PlayerEvent::Died => {
                manager.stop_all_looping_sounds();
                manager.play_sound(SoundEffect::GameOver, 100.0);
            }
        }
    }
}

fn play_enemy_sounds(mut events: EventReader<EnemyEvent>, mut manager: ResMut<SoundManager>) {
    for event in events.read() {
        let effect = match event {
            EnemyEvent::Hit { .. } => SoundEffect::EnemyHit,
            EnemyEvent::Defeated { .. } => SoundEffect::EnemyDeath,
        };
        manager.play_sound(effect, 100.0);
    }
}

/// Battle theme while anything is chasing the player, main theme otherwise.
fn direct_music(
    config: Res<AudioConfig>,
    mut manager: ResMut<SoundManager>,
    enemies: Query<&Enemy>,
) {
    let desired = if any_enemy_chasing(enemies.iter()) {
        MusicTrack::BattleTheme
    } else {
        MusicTrack::MainTheme
    };

    if manager.has_music(desired) && manager.current_music() != Some(desired) {
        manager.play_music(desired, true, config.track_volume);
    }
}

fn play_main_theme(config: Res<AudioConfig>, mut manager: ResMut<SoundManager>) {
    if manager.has_music(MusicTrack::MainTheme)
        && manager.current_music() != Some(MusicTrack::MainTheme)
    {
        manager.play_music(MusicTrack::MainTheme, true, config.track_volume);
    }
}

fn pause_audio(mut manager: ResMut<SoundManager>) {
    manager.pause_all();
}

fn resume_audio(mut manager: ResMut<SoundManager>) {
    manager.resume_all();
}

fn stop_gameplay_audio(mut manager: ResMut<SoundManager>) {
    manager.stop_all_sounds();
    manager.stop_all_looping_sounds();
    manager.stop_music();
}
