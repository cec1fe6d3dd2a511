//! Applies queued [`AudioCommand`]s to bevy_kira_audio instances.
//!
//! kira creates an instance only once its source has loaded, which can be
//! several frames after `play`. Commands for a channel are therefore queued
//! on the channel and replayed as soon as its instance shows up.

use bevy::prelude::*;
use bevy_kira_audio::prelude::Volume;
use bevy_kira_audio::{Audio, AudioControl, AudioInstance, AudioTween, PlaybackState};
use std::collections::HashMap;

use super::sound_manager::{AudioCommand, ChannelId, SoundManager};

/// A change to an instance that already plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstanceOp {
    SetVolume(f64),
    Stop,
    Pause,
    Resume,
}

/// Engine-side control of one playing instance.
pub trait InstanceControl {
    fn apply(&mut self, op: InstanceOp);

    fn is_stopped(&self) -> bool;
}

impl InstanceControl for AudioInstance {
    fn apply(&mut self, op: InstanceOp) {
        let tween = AudioTween::default();
        match op {
            InstanceOp::SetVolume(volume) => {
                self.set_volume(Volume::Amplitude(volume), tween);
            }
            InstanceOp::Stop => {
                self.stop(tween);
            }
            InstanceOp::Pause => {
                self.pause(tween);
            }
            InstanceOp::Resume => {
                self.resume(tween);
            }
        }
    }

    fn is_stopped(&self) -> bool {
        matches!(self.state(), PlaybackState::Stopped)
    }
}

/// Where instances are looked up by handle.
pub trait InstanceStore {
    type Instance: InstanceControl;

    fn instance_mut(&mut self, handle: &Handle<AudioInstance>) -> Option<&mut Self::Instance>;
}

impl InstanceStore for Assets<AudioInstance> {
    type Instance = AudioInstance;

    fn instance_mut(&mut self, handle: &Handle<AudioInstance>) -> Option<&mut AudioInstance> {
        self.get_mut(handle)
    }
}

/// Engine-side state of a channel.
struct LiveInstance {
    handle: Handle<AudioInstance>,
    /// The instance has been observed at least once
    seen: bool,
    /// Ops not yet applied to the instance
    pending: Vec<InstanceOp>,
    stop_requested: bool,
}

impl LiveInstance {
    fn new(handle: Handle<AudioInstance>) -> Self {
        Self {
            handle,
            seen: false,
            pending: Vec::new(),
            stop_requested: false,
        }
    }

    /// Apply pending ops if the instance exists. True once the channel is
    /// finished: stopped by request, ended on its own, or gone after being seen.
    fn flush<I: InstanceControl>(&mut self, instance: Option<&mut I>) -> bool {
        let Some(instance) = instance else {
            return self.seen;
        };
        self.seen = true;
        for op in self.pending.drain(..) {
            instance.apply(op);
        }
        self.stop_requested || instance.is_stopped()
    }
}

/// Channel to instance mapping owned by the backend.
#[derive(Default)]
pub struct LiveInstances(HashMap<ChannelId, LiveInstance>);

impl LiveInstances {
    pub fn start(&mut self, channel: ChannelId, handle: Handle<AudioInstance>) {
        self.0.insert(channel, LiveInstance::new(handle));
    }

    /// Queue an op for the channel's instance. Unknown channels are ignored.
    pub fn queue(&mut self, channel: ChannelId, op: InstanceOp) {
        let Some(entry) = self.0.get_mut(&channel) else {
            return;
        };
        if entry.stop_requested {
            return;
        }
        if op == InstanceOp::Stop {
            entry.stop_requested = true;
        }
        entry.pending.push(op);
    }

    /// Replay queued ops onto existing instances and return the channels
    /// that finished. Finished channels are no longer tracked.
    pub fn flush(&mut self, store: &mut impl InstanceStore) -> Vec<ChannelId> {
        let mut finished = Vec::new();
        for (channel, entry) in self.0.iter_mut() {
            let instance = store.instance_mut(&entry.handle);
            if entry.flush(instance) {
                finished.push(*channel);
            }
        }
        for channel in &finished {
            self.0.remove(channel);
        }
        finished
    }

    pub fn is_tracking(&self, channel: ChannelId) -> bool {
        self.0.contains_key(&channel)
    }
}

/// Send queued commands to kira and report finished instances back.
pub fn apply_audio_commands(
    mut manager: ResMut<SoundManager>,
    audio: Res<Audio>,
    mut instances: ResMut<Assets<AudioInstance>>,
    mut live: Local<LiveInstances>,
) {
    for command in manager.drain_commands() {
        match command {
            AudioCommand::Play {
                channel,
                source,
                looped,
                volume,
            } => {
                let mut play = audio.play(source);
                play.with_volume(Volume::Amplitude(volume));
                if looped {
                    play.looped();
                }
                live.start(channel, play.handle());
            }
            AudioCommand::SetVolume { channel, volume } => {
                live.queue(channel, InstanceOp::SetVolume(volume));
            }
            AudioCommand::Stop(channel) => live.queue(channel, InstanceOp::Stop),
            AudioCommand::Pause(channel) => live.queue(channel, InstanceOp::Pause),
            AudioCommand::Resume(channel) => live.queue(channel, InstanceOp::Resume),
        }
    }

    for channel in live.flush(&mut *instances) {
        manager.mark_stopped(channel);
    }
    manager.update();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetId;

    #[derive(Debug, Default)]
    struct FakeInstance {
        applied: Vec<InstanceOp>,
        stopped: bool,
    }

    impl InstanceControl for FakeInstance {
        fn apply(&mut self, op: InstanceOp) {
            if op == InstanceOp::Stop {
                self.stopped = true;
            }
            self.applied.push(op);
        }

        fn is_stopped(&self) -> bool {
            self.stopped
        }
    }

    #[derive(Default)]
    struct FakeStore(HashMap<AssetId<AudioInstance>, FakeInstance>);

    impl InstanceStore for FakeStore {
        type Instance = FakeInstance;

        fn instance_mut(&mut self, handle: &Handle<AudioInstance>) -> Option<&mut FakeInstance> {
            self.0.get_mut(&handle.id())
        }
    }

    fn handle(n: u128) -> Handle<AudioInstance> {
        Handle::weak_from_u128(n)
    }

    #[test]
    fn stop_before_the_instance_exists_is_applied_when_it_appears() {
        let mut live = LiveInstances::default();
        let mut store = FakeStore::default();
        let footsteps = handle(1);

        live.start(ChannelId(0), footsteps.clone());
        live.queue(ChannelId(0), InstanceOp::Stop);

        // Source still loading
        assert!(live.flush(&mut store).is_empty());
        assert!(live.is_tracking(ChannelId(0)));

        store.0.insert(footsteps.id(), FakeInstance::default());
        assert_eq!(live.flush(&mut store), vec![ChannelId(0)]);
        assert!(store.0[&footsteps.id()].stopped);
        assert!(!live.is_tracking(ChannelId(0)));
    }

    #[test]
    fn queued_ops_replay_in_order() {
        let mut live = LiveInstances::default();
        let mut store = FakeStore::default();
        let music = handle(2);

        live.start(ChannelId(3), music.clone());
        live.queue(ChannelId(3), InstanceOp::SetVolume(0.25));
        live.queue(ChannelId(3), InstanceOp::Pause);
        live.flush(&mut store);

        store.0.insert(music.id(), FakeInstance::default());
        assert!(live.flush(&mut store).is_empty());
        assert_eq!(
            store.0[&music.id()].applied,
            vec![InstanceOp::SetVolume(0.25), InstanceOp::Pause]
        );

        live.queue(ChannelId(3), InstanceOp::Resume);
        live.flush(&mut store);
        assert_eq!(store.0[&music.id()].applied.last(), Some(&InstanceOp::Resume));
    }

    #[test]
    fn ops_after_stop_are_dropped() {
        let mut live = LiveInstances::default();
        let mut store = FakeStore::default();
        let shot = handle(3);

        live.start(ChannelId(1), shot.clone());
        live.queue(ChannelId(1), InstanceOp::Stop);
        live.queue(ChannelId(1), InstanceOp::Resume);

        store.0.insert(shot.id(), FakeInstance::default());
        live.flush(&mut store);
        assert_eq!(store.0[&shot.id()].applied, vec![InstanceOp::Stop]);
    }

    #[test]
    fn finished_or_vanished_instances_are_reported() {
        let mut live = LiveInstances::default();
        let mut store = FakeStore::default();
        let (ended, removed) = (handle(4), handle(5));

        live.start(ChannelId(0), ended.clone());
        live.start(ChannelId(1), removed.clone());
        store.0.insert(ended.id(), FakeInstance::default());
        store.0.insert(removed.id(), FakeInstance::default());
        assert!(live.flush(&mut store).is_empty());

        store.0.get_mut(&ended.id()).unwrap().stopped = true;
        store.0.remove(&removed.id());

        let mut finished = live.flush(&mut store);
        finished.sort_by_key(|channel| channel.0);
        assert_eq!(finished, vec![ChannelId(0), ChannelId(1)]);
    }

    #[test]
    fn ops_for_unknown_channels_are_ignored() {
        let mut live = LiveInstances::default();
        live.queue(ChannelId(9), InstanceOp::Stop);
        assert!(!live.is_tracking(ChannelId(9)));
    }
}
