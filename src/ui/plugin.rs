//! UI plugin - title, pause and game over screens.
//!
//! Every screen is a full-window column: a heading, some info lines and a
//! stack of buttons. Buttons carry a [`MenuAction`] and one system handles
//! them all, whichever screen they belong to.

use bevy::prelude::*;

use super::hud;
use crate::core::{GameState, PlayState};
use crate::persistence::HighScore;

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);
const BUTTON_TEXT: Color = Color::srgb(0.8, 0.8, 0.85);
const INFO_TEXT: Color = Color::srgb(0.5, 0.5, 0.55);

/// UI plugin - menus and the HUD.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app.add_systems(OnEnter(GameState::MainMenu), spawn_title_screen)
            .add_systems(OnExit(GameState::MainMenu), despawn_screen::<TitleScreen>)
            .add_systems(OnEnter(PlayState::Paused), spawn_pause_screen)
            .add_systems(OnExit(PlayState::Paused), despawn_screen::<PauseScreen>)
            .add_systems(OnEnter(GameState::GameOver), spawn_game_over_screen)
            .add_systems(OnExit(GameState::GameOver), despawn_screen::<GameOverScreen>)
            .add_systems(Update, (shade_buttons, press_buttons));
    }
}

#[derive(Component)]
struct TitleScreen;

#[derive(Component)]
struct PauseScreen;

#[derive(Component)]
struct GameOverScreen;

/// What a menu button does when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    /// Start a fresh session (New Game, Retry)
    Play,
    Resume,
    /// Back to the title screen
    Title,
    Quit,
}

/// Layout of one menu screen.
struct ScreenLayout<'a> {
    heading: &'a str,
    heading_size: f32,
    heading_color: Color,
    backdrop: Color,
    info: Vec<String>,
    buttons: &'a [(&'a str, MenuAction)],
}

fn spawn_title_screen(mut commands: Commands) {
    // No level camera exists outside a session
    commands.spawn((Camera2d, TitleScreen));

    spawn_screen(
        &mut commands,
        TitleScreen,
        ScreenLayout {
            heading: "OVERWORLD",
            heading_size: 80.0,
            heading_color: Color::srgb(0.8, 0.7, 0.6),
            backdrop: Color::srgb(0.05, 0.05, 0.08),
            info: vec!["WASD to move, Space to attack, Esc to pause".to_string()],
            buttons: &[("New Game", MenuAction::Play), ("Quit", MenuAction::Quit)],
        },
    );
}

fn spawn_pause_screen(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        PauseScreen,
        ScreenLayout {
            heading: "PAUSED",
            heading_size: 48.0,
            heading_color: BUTTON_TEXT,
            backdrop: Color::srgba(0.0, 0.0, 0.0, 0.7),
            info: Vec::new(),
            buttons: &[("Resume", MenuAction::Resume), ("Main Menu", MenuAction::Title)],
        },
    );
}

fn spawn_game_over_screen(mut commands: Commands, score: Res<HighScore>) {
    commands.spawn((Camera2d, GameOverScreen));

    spawn_screen(
        &mut commands,
        GameOverScreen,
        ScreenLayout {
            heading: "YOU DIED",
            heading_size: 72.0,
            heading_color: Color::srgb(0.8, 0.2, 0.2),
            backdrop: Color::srgba(0.1, 0.0, 0.0, 0.9),
            info: vec![
                format!("Score: {}", score.current()),
                format!("Best: {}", score.best()),
            ],
            buttons: &[("Retry", MenuAction::Play), ("Main Menu", MenuAction::Title)],
        },
    );
}

fn spawn_screen<M: Component>(commands: &mut Commands, marker: M, layout: ScreenLayout) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(layout.backdrop),
            marker,
        ))
        .with_children(|column| {
            column.spawn((
                Text::new(layout.heading),
                TextFont {
                    font_size: layout.heading_size,
                    ..default()
                },
                TextColor(layout.heading_color),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            for line in layout.info {
                column.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(INFO_TEXT),
                ));
            }

            for &(label, action) in layout.buttons {
                column
                    .spawn((
                        Button,
                        Node {
                            width: Val::Px(200.0),
                            height: Val::Px(50.0),
                            margin: UiRect::top(Val::Px(10.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(BUTTON_IDLE),
                        action,
                    ))
                    .with_child((
                        Text::new(label),
                        TextFont {
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(BUTTON_TEXT),
                    ));
            }
        });
}

/// Tint buttons by hover and press state.
fn shade_buttons(
    mut query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in query.iter_mut() {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        };
    }
}

fn press_buttons(
    query: Query<(&Interaction, &MenuAction), (Changed<Interaction>, With<Button>)>,
    mut next_game_state: ResMut<NextState<GameState>>,
    mut next_play_state: ResMut<NextState<PlayState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, action) in query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            MenuAction::Play => next_game_state.set(GameState::InGame),
            MenuAction::Resume => next_play_state.set(PlayState::Exploring),
            MenuAction::Title => next_game_state.set(GameState::MainMenu),
            MenuAction::Quit => {
                exit.send(AppExit::Success);
            }
        }
    }
}

/// Remove everything tagged with a screen marker, camera included.
fn despawn_screen<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
