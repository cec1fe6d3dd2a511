//! Sound bookkeeping: loaded sources, live channels and volume levels.
//!
//! `SoundManager` never talks to the audio engine directly. Every change is
//! queued as an [`AudioCommand`] that the backend system applies, and the
//! backend reports finished channels back through [`SoundManager::mark_stopped`].

use bevy::prelude::*;
use bevy_kira_audio::AudioSource;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::asset_exists;

/// One-shot and looping sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SoundEffect {
    PlayerWalk,
    PlayerAttack,
    PlayerHit,
    EnemyHit,
    EnemyDeath,
    GameOver,
}

/// Background music tracks; at most one plays at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum MusicTrack {
    MainTheme,
    BattleTheme,
}

/// Identifies one playing instance across the manager and the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
}

/// Volume scalars are percentages.
pub const MAX_VOLUME: f32 = 100.0;

/// A change for the audio backend to apply. Volumes are amplitudes in `0..=1`.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Play {
        channel: ChannelId,
        source: Handle<AudioSource>,
        looped: bool,
        volume: f64,
    },
    SetVolume {
        channel: ChannelId,
        volume: f64,
    },
    Stop(ChannelId),
    Pause(ChannelId),
    Resume(ChannelId),
}

#[derive(Debug, Error, PartialEq)]
pub enum AudioError {
    /// Source file is not under `assets/`.
    #[error("Audio file not found: {0}")]
    SourceMissing(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Sound,
    Music,
}

#[derive(Debug, Clone, Copy)]
struct Channel {
    id: ChannelId,
    category: Category,
    /// Volume asked for by the caller, before category and master scaling
    requested: f32,
    status: PlaybackStatus,
}

impl Channel {
    fn is_active(&self) -> bool {
        self.status != PlaybackStatus::Stopped
    }
}

#[derive(Resource, Debug)]
pub struct SoundManager {
    sounds: HashMap<SoundEffect, Handle<AudioSource>>,
    music: HashMap<MusicTrack, Handle<AudioSource>>,
    one_shots: Vec<Channel>,
    looping: HashMap<SoundEffect, Channel>,
    current_music: Option<(MusicTrack, Channel)>,
    master_volume: f32,
    sound_volume: f32,
    music_volume: f32,
    next_channel: u64,
    commands: Vec<AudioCommand>,
}

impl Default for SoundManager {
    fn default() -> Self {
        Self::new(100.0, 100.0, 50.0)
    }
}

impl SoundManager {
    pub fn new(master_volume: f32, sound_volume: f32, music_volume: f32) -> Self {
        Self {
            sounds: HashMap::new(),
            music: HashMap::new(),
            one_shots: Vec::new(),
            looping: HashMap::new(),
            current_music: None,
            master_volume: master_volume.clamp(0.0, MAX_VOLUME),
            sound_volume: sound_volume.clamp(0.0, MAX_VOLUME),
            music_volume: music_volume.clamp(0.0, MAX_VOLUME),
            next_channel: 0,
            commands: Vec::new(),
        }
    }

    pub fn register_sound(&mut self, effect: SoundEffect, source: Handle<AudioSource>) {
        self.sounds.insert(effect, source);
    }

    pub fn register_music(&mut self, track: MusicTrack, source: Handle<AudioSource>) {
        self.music.insert(track, source);
    }

    /// Load an effect from an asset path, failing if the file is absent.
    pub fn load_sound(
        &mut self,
        effect: SoundEffect,
        path: &str,
        asset_server: &AssetServer,
    ) -> Result<(), AudioError> {
        if !asset_exists(path) {
            return Err(AudioError::SourceMissing(path.to_string()));
        }
        self.register_sound(effect, asset_server.load(path.to_string()));
        Ok(())
    }

    /// Load a music track from an asset path, failing if the file is absent.
    pub fn load_music(
        &mut self,
        track: MusicTrack,
        path: &str,
        asset_server: &AssetServer,
    ) -> Result<(), AudioError> {
        if !asset_exists(path) {
            return Err(AudioError::SourceMissing(path.to_string()));
        }
        self.register_music(track, asset_server.load(path.to_string()));
        Ok(())
    }

    pub fn has_music(&self, track: MusicTrack) -> bool {
        self.music.contains_key(&track)
    }

    /// Percentage actually sent to the engine for a requested volume.
    fn effective_volume(&self, category: Category, requested: f32) -> f32 {
        let category_volume = match category {
            Category::Sound => self.sound_volume,
            Category::Music => self.music_volume,
        };
        (category_volume / MAX_VOLUME) * (self.master_volume / MAX_VOLUME) * requested
    }

    fn amplitude(&self, channel: &Channel) -> f64 {
        (self.effective_volume(channel.category, channel.requested) / MAX_VOLUME) as f64
    }

    fn start(
        &mut self,
        source: Handle<AudioSource>,
        category: Category,
        requested: f32,
        looped: bool,
    ) -> Channel {
        let channel = Channel {
            id: ChannelId(self.next_channel),
            category,
            requested: requested.clamp(0.0, MAX_VOLUME),
            status: PlaybackStatus::Playing,
        };
        self.next_channel += 1;
        self.commands.push(AudioCommand::Play {
            channel: channel.id,
            source,
            looped,
            volume: self.amplitude(&channel),
        });
        channel
    }

    fn stop_channel(&mut self, channel: &mut Channel) {
        if channel.is_active() {
            channel.status = PlaybackStatus::Stopped;
            self.commands.push(AudioCommand::Stop(channel.id));
        }
    }

    /// Fire a one-shot effect. Unknown effects are logged and ignored.
    pub fn play_sound(&mut self, effect: SoundEffect, volume: f32) -> Option<ChannelId> {
        let Some(source) = self.sounds.get(&effect).cloned() else {
            warn!("Sound effect {:?} not loaded", effect);
            return None;
        };
        let channel = self.start(source, Category::Sound, volume, false);
        self.one_shots.push(channel);
        Some(channel.id)
    }

    /// Start a looping effect unless one for `effect` is already playing.
    pub fn play_looping_sound(&mut self, effect: SoundEffect, volume: f32) -> Option<ChannelId> {
        if let Some(channel) = self.looping.get(&effect).filter(|c| c.is_active()) {
            return Some(channel.id);
        }
        let Some(source) = self.sounds.get(&effect).cloned() else {
            warn!("Sound effect {:?} not loaded", effect);
            return None;
        };
        let channel = self.start(source, Category::Sound, volume, true);
        self.looping.insert(effect, channel);
        Some(channel.id)
    }

    pub fn stop_looping_sound(&mut self, effect: SoundEffect) {
        if let Some(mut channel) = self.looping.remove(&effect) {
            self.stop_channel(&mut channel);
        }
    }

    pub fn stop_all_looping_sounds(&mut self) {
        let channels: Vec<Channel> = self.looping.drain().map(|(_, c)| c).collect();
        for mut channel in channels {
            self.stop_channel(&mut channel);
        }
    }

    /// Stop every one-shot effect. Loops and music are left alone.
    pub fn stop_all_sounds(&mut self) {
        let channels = std::mem::take(&mut self.one_shots);
        for mut channel in channels {
            self.stop_channel(&mut channel);
        }
    }

    /// Switch to `track`. The previous track is stopped before the new one
    /// starts. Unknown tracks are logged and ignored.
    pub fn play_music(&mut self, track: MusicTrack, looped: bool, volume: f32) -> Option<ChannelId> {
        let Some(source) = self.music.get(&track).cloned() else {
            warn!("Music track {:?} not loaded", track);
            return None;
        };
        self.stop_music();
        let channel = self.start(source, Category::Music, volume, looped);
        self.current_music = Some((track, channel));
        Some(channel.id)
    }

    pub fn stop_music(&mut self) {
        if let Some((_, mut channel)) = self.current_music.take() {
            self.stop_channel(&mut channel);
        }
    }

    pub fn pause_music(&mut self) {
        if let Some((_, channel)) = self.current_music.as_mut() {
            if channel.status == PlaybackStatus::Playing {
                channel.status = PlaybackStatus::Paused;
                self.commands.push(AudioCommand::Pause(channel.id));
            }
        }
    }

    pub fn resume_music(&mut self) {
        if let Some((_, channel)) = self.current_music.as_mut() {
            if channel.status == PlaybackStatus::Paused {
                channel.status = PlaybackStatus::Playing;
                self.commands.push(AudioCommand::Resume(channel.id));
            }
        }
    }

    /// Pause music and looping effects, e.g. while the game is paused.
    pub fn pause_all(&mut self) {
        self.pause_music();
        for channel in self.looping.values_mut() {
            if channel.status == PlaybackStatus::Playing {
                channel.status = PlaybackStatus::Paused;
                self.commands.push(AudioCommand::Pause(channel.id));
            }
        }
    }

    /// Resume everything [`SoundManager::pause_all`] paused.
    pub fn resume_all(&mut self) {
        self.resume_music();
        for channel in self.looping.values_mut() {
            if channel.status == PlaybackStatus::Paused {
                channel.status = PlaybackStatus::Playing;
                self.commands.push(AudioCommand::Resume(channel.id));
            }
        }
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, MAX_VOLUME);
        self.rescale(None);
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = volume.clamp(0.0, MAX_VOLUME);
        self.rescale(Some(Category::Sound));
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, MAX_VOLUME);
        self.rescale(Some(Category::Music));
    }

    /// Re-send the volume of every active channel, optionally only one category.
    fn rescale(&mut self, only: Option<Category>) {
        let channels: Vec<Channel> = self
            .one_shots
            .iter()
            .chain(self.looping.values())
            .chain(self.current_music.iter().map(|(_, c)| c))
            .filter(|c| c.is_active() && only.map_or(true, |category| c.category == category))
            .copied()
            .collect();

        for channel in channels {
            let volume = self.amplitude(&channel);
            self.commands.push(AudioCommand::SetVolume {
                channel: channel.id,
                volume,
            });
        }
    }

    /// Drop finished one-shots and loops. Call once per frame.
    pub fn update(&mut self) {
        self.one_shots.retain(Channel::is_active);
        self.looping.retain(|_, channel| channel.is_active());
    }

    /// The backend saw `channel` finish.
    pub fn mark_stopped(&mut self, channel: ChannelId) {
        let music = self.current_music.iter_mut().map(|(_, c)| c);
        for entry in self
            .one_shots
            .iter_mut()
            .chain(self.looping.values_mut())
            .chain(music)
        {
            if entry.id == channel {
                entry.status = PlaybackStatus::Stopped;
            }
        }
    }

    /// Take the commands queued since the last drain.
    pub fn drain_commands(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn sound_volume(&self) -> f32 {
        self.sound_volume
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn active_sound_count(&self) -> usize {
        self.one_shots.len()
    }

    pub fn is_looping(&self, effect: SoundEffect) -> bool {
        self.looping.get(&effect).is_some_and(|c| c.is_active())
    }

    /// Track that is playing or paused.
    pub fn current_music(&self) -> Option<MusicTrack> {
        self.current_music
            .as_ref()
            .filter(|(_, c)| c.is_active())
            .map(|(track, _)| *track)
    }

    pub fn music_status(&self) -> PlaybackStatus {
        self.current_music
            .as_ref()
            .map_or(PlaybackStatus::Stopped, |(_, c)| c.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SoundManager {
        let mut manager = SoundManager::default();
        for effect in [SoundEffect::PlayerWalk, SoundEffect::PlayerAttack, SoundEffect::EnemyHit] {
            manager.register_sound(effect, Handle::default());
        }
        manager.register_music(MusicTrack::MainTheme, Handle::default());
        manager.register_music(MusicTrack::BattleTheme, Handle::default());
        manager
    }

    fn play_volume(command: &AudioCommand) -> f64 {
        match command {
            AudioCommand::Play { volume, .. } => *volume,
            other => panic!("expected play, got {other:?}"),
        }
    }

    #[test]
    fn unknown_effect_is_ignored() {
        let mut manager = manager();
        assert_eq!(manager.play_sound(SoundEffect::GameOver, 100.0), None);
        assert!(manager.drain_commands().is_empty());
        assert_eq!(manager.active_sound_count(), 0);
    }

    #[test]
    fn effective_volume_scales_by_category_and_master() {
        let mut manager = manager();
        manager.set_master_volume(50.0);
        manager.drain_commands();

        manager.play_sound(SoundEffect::PlayerAttack, 80.0);
        let commands = manager.drain_commands();
        assert!((play_volume(&commands[0]) - 0.4).abs() < 1e-6);

        manager.play_music(MusicTrack::MainTheme, true, 100.0);
        let commands = manager.drain_commands();
        // music 50% × master 50%
        assert!((play_volume(&commands[0]) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn looping_sound_is_idempotent_while_playing() {
        let mut manager = manager();
        let first = manager.play_looping_sound(SoundEffect::PlayerWalk, 100.0);
        let second = manager.play_looping_sound(SoundEffect::PlayerWalk, 100.0);

        assert_eq!(first, second);
        assert_eq!(manager.drain_commands().len(), 1);
        assert!(manager.is_looping(SoundEffect::PlayerWalk));
    }

    #[test]
    fn finished_loop_can_restart() {
        let mut manager = manager();
        let first = manager.play_looping_sound(SoundEffect::PlayerWalk, 100.0).unwrap();
        manager.mark_stopped(first);
        manager.update();
        assert!(!manager.is_looping(SoundEffect::PlayerWalk));

        let second = manager.play_looping_sound(SoundEffect::PlayerWalk, 100.0).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn stop_looping_sound_emits_stop() {
        let mut manager = manager();
        let id = manager.play_looping_sound(SoundEffect::PlayerWalk, 100.0).unwrap();
        manager.drain_commands();

        manager.stop_looping_sound(SoundEffect::PlayerWalk);
        assert_eq!(manager.drain_commands(), vec![AudioCommand::Stop(id)]);
        assert!(!manager.is_looping(SoundEffect::PlayerWalk));
    }

    #[test]
    fn update_prunes_finished_one_shots() {
        let mut manager = manager();
        let a = manager.play_sound(SoundEffect::PlayerAttack, 100.0).unwrap();
        manager.play_sound(SoundEffect::EnemyHit, 100.0);
        assert_eq!(manager.active_sound_count(), 2);

        manager.mark_stopped(a);
        manager.update();
        assert_eq!(manager.active_sound_count(), 1);
    }

    #[test]
    fn music_switch_stops_previous_track_first() {
        let mut manager = manager();
        let main = manager.play_music(MusicTrack::MainTheme, true, 100.0).unwrap();
        manager.drain_commands();

        let battle = manager.play_music(MusicTrack::BattleTheme, true, 100.0).unwrap();
        let commands = manager.drain_commands();

        assert_eq!(commands[0], AudioCommand::Stop(main));
        assert!(matches!(commands[1], AudioCommand::Play { channel, looped: true, .. } if channel == battle));
        assert_eq!(manager.current_music(), Some(MusicTrack::BattleTheme));
    }

    #[test]
    fn pause_and_resume_music() {
        let mut manager = manager();
        let id = manager.play_music(MusicTrack::MainTheme, true, 100.0).unwrap();
        manager.drain_commands();

        manager.pause_music();
        manager.pause_music();
        assert_eq!(manager.music_status(), PlaybackStatus::Paused);
        manager.resume_music();
        assert_eq!(manager.music_status(), PlaybackStatus::Playing);
        assert_eq!(
            manager.drain_commands(),
            vec![AudioCommand::Pause(id), AudioCommand::Resume(id)]
        );

        manager.stop_music();
        assert_eq!(manager.current_music(), None);
        assert_eq!(manager.music_status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn volume_setters_clamp_and_rescale_active_channels() {
        let mut manager = manager();
        let sfx = manager.play_looping_sound(SoundEffect::PlayerWalk, 60.0).unwrap();
        let music = manager.play_music(MusicTrack::MainTheme, true, 100.0).unwrap();
        manager.drain_commands();

        manager.set_sound_volume(150.0);
        assert_eq!(manager.sound_volume(), 100.0);
        let commands = manager.drain_commands();
        assert_eq!(
            commands,
            vec![AudioCommand::SetVolume { channel: sfx, volume: (60.0f32 / 100.0) as f64 }]
        );

        manager.set_master_volume(-5.0);
        assert_eq!(manager.master_volume(), 0.0);
        let commands = manager.drain_commands();
        assert_eq!(commands.len(), 2);
        assert!(commands.contains(&AudioCommand::SetVolume { channel: sfx, volume: 0.0 }));
        assert!(commands.contains(&AudioCommand::SetVolume { channel: music, volume: 0.0 }));
    }

    #[test]
    fn stop_all_sounds_stops_one_shots_only() {
        let mut manager = manager();
        let attack = manager.play_sound(SoundEffect::PlayerAttack, 100.0).unwrap();
        let hit = manager.play_sound(SoundEffect::EnemyHit, 100.0).unwrap();
        manager.play_looping_sound(SoundEffect::PlayerWalk, 100.0);
        manager.play_music(MusicTrack::MainTheme, true, 100.0);
        manager.drain_commands();

        manager.stop_all_sounds();
        assert_eq!(
            manager.drain_commands(),
            vec![AudioCommand::Stop(attack), AudioCommand::Stop(hit)]
        );
        assert_eq!(manager.active_sound_count(), 0);
        assert!(manager.is_looping(SoundEffect::PlayerWalk));
        assert_eq!(manager.current_music(), Some(MusicTrack::MainTheme));
    }

    #[test]
    fn stop_all_looping_sounds_leaves_one_shots_and_music() {
        let mut manager = manager();
        let walk = manager.play_looping_sound(SoundEffect::PlayerWalk, 100.0).unwrap();
        let hit = manager.play_looping_sound(SoundEffect::EnemyHit, 100.0).unwrap();
        manager.play_sound(SoundEffect::PlayerAttack, 100.0);
        manager.play_music(MusicTrack::BattleTheme, true, 100.0);
        manager.drain_commands();

        manager.stop_all_looping_sounds();
        let commands = manager.drain_commands();
        assert_eq!(commands.len(), 2);
        assert!(commands.contains(&AudioCommand::Stop(walk)));
        assert!(commands.contains(&AudioCommand::Stop(hit)));
        assert!(!manager.is_looping(SoundEffect::PlayerWalk));
        assert!(!manager.is_looping(SoundEffect::EnemyHit));
        assert_eq!(manager.active_sound_count(), 1);
        assert_eq!(manager.music_status(), PlaybackStatus::Playing);

        manager.stop_all_looping_sounds();
        assert!(manager.drain_commands().is_empty());
    }

    #[test]
    fn pause_all_covers_loops_and_music() {
        let mut manager = manager();
        manager.play_looping_sound(SoundEffect::PlayerWalk, 100.0);
        manager.play_music(MusicTrack::MainTheme, true, 100.0);
        manager.drain_commands();

        manager.pause_all();
        assert_eq!(manager.drain_commands().len(), 2);
        manager.resume_all();
        assert_eq!(manager.drain_commands().len(), 2);
        assert_eq!(manager.music_status(), PlaybackStatus::Playing);
    }
}
