//! In-game HUD: FPS readout, score line and health bar, stacked in the
//! top-left corner.

use bevy::prelude::*;

use crate::combat::Actor;
use crate::core::GameState;
use crate::persistence::HighScore;
use crate::player::Player;

const HEALTH_BAR_WIDTH: f32 = 150.0;

/// Root of the HUD column; despawned with the session.
#[derive(Component)]
pub struct HudRoot;

/// Fill of the health bar, sized to the player's health fraction.
#[derive(Component)]
pub struct HealthBar;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct FpsText;

pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), despawn_hud)
        .add_systems(
            Update,
            (update_health_bar, update_score_text, update_fps_text)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Frames per second for a frame lasting `dt` seconds, rounded.
pub fn fps_from_delta(dt: f32) -> u32 {
    (1.0 / dt.max(1e-6)).round() as u32
}

fn hud_text(value: &str, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|hud| {
            hud.spawn((hud_text("FPS: 0", 16.0, Color::srgb(0.9, 0.9, 0.9)), FpsText));
            hud.spawn((
                hud_text("Score: 0", 18.0, Color::srgb(0.9, 0.85, 0.5)),
                ScoreText,
            ));

            // Dark track with a red fill
            hud.spawn((
                Node {
                    width: Val::Px(HEALTH_BAR_WIDTH),
                    height: Val::Px(12.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
            ))
            .with_child((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                HealthBar,
            ));
        });
}

fn update_health_bar(
    player_query: Query<&Player>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    for mut bar in bar_query.iter_mut() {
        bar.width = Val::Percent(player.health().percentage() * 100.0);
    }
}

fn update_score_text(score: Res<HighScore>, mut query: Query<&mut Text, With<ScoreText>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        text.0 = format!("Score: {}   Best: {}", score.current(), score.best());
    }
}

fn update_fps_text(time: Res<Time>, mut query: Query<&mut Text, With<FpsText>>) {
    for mut text in query.iter_mut() {
        text.0 = format!("FPS: {}", fps_from_delta(time.delta_secs()));
    }
}

fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
