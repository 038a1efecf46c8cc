//! UI module - gesture buttons, message line and scoreboard

use bevy::prelude::*;
use rps_core::{Choice, GameSession, Outcome};
use rps_core::game::TurnPhase;

use crate::game::{GameSet, PlayChoice, ResetGame, Session};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Startup, setup_ui)
            .add_systems(Update, (
                handle_buttons,
                handle_keyboard,
            ).in_set(GameSet::Input))
            .add_systems(Update, update_scoreboard.in_set(GameSet::Present));
    }
}

/// Button actions
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum GameButton {
    Play(Choice),
    Reset,
}

/// Marker for the message / result text
#[derive(Component)]
struct MessageText;

/// Marker for the user score counter
#[derive(Component)]
struct UserScoreText;

/// Marker for the opponent score counter
#[derive(Component)]
struct CompScoreText;

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.2, 0.35);
const BUTTON_HOVER: Color = Color::srgb(0.2, 0.35, 0.6);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.5, 0.8);
const BORDER_IDLE: Color = Color::srgb(0.3, 0.5, 0.8);
const BORDER_HOVER: Color = Color::srgb(0.5, 0.7, 1.0);

/// Message color for the result class toggled on the message
fn message_color(result: Option<Outcome>) -> Color {
    match result.map(Outcome::css_class) {
        Some("win") => Color::srgb(0.3, 1.0, 0.5),
        Some("lose") => Color::srgb(1.0, 0.3, 0.4),
        Some("draw") => Color::srgb(1.0, 0.85, 0.3),
        _ => Color::WHITE,
    }
}

/// Button text; the default UI font has no emoji glyphs
fn button_label(choice: Choice) -> String {
    choice.name().to_uppercase()
}

/// Message line as drawn, with the result spelled out in gesture names
fn message_text(session: &GameSession) -> String {
    let board = session.scoreboard();
    match session.phase() {
        TurnPhase::Showing(result) if board.message == result.message() => result.plain_message(),
        _ => board.message.clone(),
    }
}

/// Setup the overlay: title, scores, message, buttons
fn setup_ui(mut commands: Commands) {
    commands.spawn(Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::SpaceBetween,
        align_items: AlignItems::Center,
        padding: UiRect::all(Val::Px(20.0)),
        ..default()
    }).with_children(|parent| {
        // Title and scores (top)
        parent.spawn(Node {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            ..default()
        }).with_children(|top| {
            top.spawn((
                Text::new("ROCK PAPER SCISSORS"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.8, 1.2)),
                Node {
                    margin: UiRect::bottom(Val::Px(10.0)),
                    ..default()
                },
            ));

            top.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(60.0),
                ..default()
            }).with_children(|scores| {
                spawn_score(scores, "You", Color::srgb_u8(0xff, 0x6b, 0x9d), UserScoreText);
                spawn_score(scores, "Opponent", Color::srgb_u8(0x00, 0xff, 0xff), CompScoreText);
            });
        });

        // Message and buttons (bottom)
        parent.spawn(Node {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            ..default()
        }).with_children(|bottom| {
            bottom.spawn((
                Text::new("Choose your move!"),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
                MessageText,
            ));

            bottom.spawn(Node {
                flex_direction: FlexDirection::Row,
                ..default()
            }).with_children(|row| {
                for choice in Choice::ALL {
                    spawn_button(row, &button_label(choice), GameButton::Play(choice));
                }
                spawn_button(row, "RESET", GameButton::Reset);
            });

            bottom.spawn((
                Text::new("R / P / S to play | ESC to reset"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.4, 0.5)),
                Node {
                    margin: UiRect::top(Val::Px(10.0)),
                    ..default()
                },
            ));
        });
    });
}

/// Spawn a labelled score counter
fn spawn_score(parent: &mut ChildBuilder, label: &str, color: Color, marker: impl Component) {
    parent.spawn(Node {
        flex_direction: FlexDirection::Column,
        align_items: AlignItems::Center,
        ..default()
    }).with_children(|column| {
        column.spawn((
            Text::new(label),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(color),
        ));
        column.spawn((
            Text::new("0"),
            TextFont {
                font_size: 40.0,
                ..default()
            },
            TextColor(Color::WHITE),
            marker,
        ));
    });
}

/// Spawn a game button
fn spawn_button(parent: &mut ChildBuilder, text: &str, action: GameButton) {
    parent.spawn((
        Button,
        Node {
            width: Val::Px(200.0),
            height: Val::Px(60.0),
            margin: UiRect::all(Val::Px(10.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BorderColor(BORDER_IDLE),
        BackgroundColor(BUTTON_IDLE),
        action,
    )).with_children(|parent| {
        parent.spawn((
            Text::new(text),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(Color::WHITE),
        ));
    });
}

/// Handle button clicks
fn handle_buttons(
    mut interaction_query: Query<
        (&Interaction, &GameButton, &mut BackgroundColor, &mut BorderColor),
        Changed<Interaction>,
    >,
    mut play_events: EventWriter<PlayChoice>,
    mut reset_events: EventWriter<ResetGame>,
) {
    for (interaction, button, mut bg_color, mut border_color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                match *button {
                    GameButton::Play(choice) => {
                        info!("{} button clicked", choice);
                        play_events.send(PlayChoice(choice));
                    }
                    GameButton::Reset => {
                        info!("Reset button clicked");
                        reset_events.send(ResetGame);
                    }
                }
                *bg_color = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => {
                *bg_color = BackgroundColor(BUTTON_HOVER);
                *border_color = BorderColor(BORDER_HOVER);
            }
            Interaction::None => {
                *bg_color = BackgroundColor(BUTTON_IDLE);
                *border_color = BorderColor(BORDER_IDLE);
            }
        }
    }
}

/// Keyboard shortcuts
fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut play_events: EventWriter<PlayChoice>,
    mut reset_events: EventWriter<ResetGame>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        play_events.send(PlayChoice(Choice::Rock));
    } else if keyboard.just_pressed(KeyCode::KeyP) {
        play_events.send(PlayChoice(Choice::Paper));
    } else if keyboard.just_pressed(KeyCode::KeyS) {
        play_events.send(PlayChoice(Choice::Scissors));
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        reset_events.send(ResetGame);
    }
}

/// Mirror the session scoreboard into the text nodes
fn update_scoreboard(
    session: Res<Session>,
    mut message_line: Query<(&mut Text, &mut TextColor), (With<MessageText>, Without<UserScoreText>, Without<CompScoreText>)>,
    mut user_text: Query<&mut Text, (With<UserScoreText>, Without<MessageText>, Without<CompScoreText>)>,
    mut comp_text: Query<&mut Text, (With<CompScoreText>, Without<MessageText>, Without<UserScoreText>)>,
) {
    let board = session.scoreboard();

    if let Ok((mut text, mut color)) = message_line.get_single_mut() {
        let wanted = message_text(&session);
        if text.0 != wanted {
            **text = wanted;
        }
        let wanted = message_color(board.result_class);
        if color.0 != wanted {
            color.0 = wanted;
        }
    }

    if let Ok(mut text) = user_text.get_single_mut() {
        if text.0 != board.user_score {
            **text = board.user_score.clone();
        }
    }

    if let Ok(mut text) = comp_text.get_single_mut() {
        if text.0 != board.comp_score {
            **text = board.comp_score.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use rps_core::REVEAL_DELAY;
    use rps_core::game::RandomOpponent;

    #[test]
    fn test_result_colors_follow_css_class() {
        let colors = [
            message_color(Some(Outcome::Win)),
            message_color(Some(Outcome::Lose)),
            message_color(Some(Outcome::Draw)),
            message_color(None),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(message_color(None), Color::WHITE);
    }

    #[test]
    fn test_button_labels_are_plain_text() {
        let labels: Vec<String> = Choice::ALL.into_iter().map(button_label).collect();
        assert_eq!(labels, ["ROCK", "PAPER", "SCISSORS"]);
    }

    #[test]
    fn test_message_text_spells_out_result() {
        let mut session = GameSession::new(RandomOpponent::seeded(3));
        assert_eq!(message_text(&session), "Choose your move!");

        let started = session.play(Choice::Rock).unwrap();
        assert_eq!(message_text(&session), "Playing...");

        let result = session.advance(REVEAL_DELAY + Duration::from_millis(1)).unwrap();
        assert_eq!(result.comp, started.comp);
        let text = message_text(&session);
        assert!(text.is_ascii());
        assert_eq!(text, result.plain_message());
        assert!(text.contains(&started.comp.to_string()));
    }

    #[test]
    fn test_error_text_passes_through() {
        let mut session = GameSession::new(RandomOpponent::seeded(3));
        session.play(Choice::Paper).unwrap();
        session.advance(REVEAL_DELAY).unwrap();

        session.report_error(&"hand could not be attached");
        assert_eq!(message_text(&session), "Error: hand could not be attached");
    }
}
