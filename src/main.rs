use avian2d::prelude::*;
use bevy::prelude::*;

use wallrunner::content::ContentPlugin;
use wallrunner::movement::MovementPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Wallrunner".to_string(),
                resolution: (1280u32, 720u32).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((ContentPlugin, MovementPlugin))
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
