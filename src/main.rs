//! Overworld - Entry Point
//!
//! A top-down action adventure prototype.
//!
//! Controls:
//! - WASD / Arrows: Move
//! - Space: Attack
//! - H / K: Debug heal / hurt
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin as KiraAudioPlugin;

fn main() {
    App::new()
        // Bevy default plugins, audio handled by kira
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Overworld".to_string(),
                        resolution: (800.0, 600.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest())
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Audio engine
        .add_plugins(KiraAudioPlugin)

        // Our game plugin
        .add_plugins(overworld::OverworldPlugin)

        .run();
}
