//! RPS 3D - Rock Paper Scissors with procedural 3D hands
//!
//! Pick a gesture, watch both hands form their gestures, and see who
//! wins after a short "thinking" pause.

mod game;
mod scene;
mod ui;

use bevy::prelude::*;
use bevy::window::WindowMode;

use game::GamePlugin;
use scene::ScenePlugin;
use ui::UiPlugin;

fn main() {
    App::new()
        // Bevy defaults with custom window
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rock Paper Scissors 3D".into(),
                resolution: (1280., 720.).into(),
                mode: WindowMode::Windowed,
                // Web build renders into the page's canvas container
                canvas: Some("#canvas-container".into()),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        // Our plugins
        .add_plugins((
            GamePlugin,
            ScenePlugin,
            UiPlugin,
        ))
        .run();
}
