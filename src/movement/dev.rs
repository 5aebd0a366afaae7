//! Movement domain: debug-only test room and hotkeys.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::content::{TuningSource, reload_tuning};
use crate::movement::{GameLayer, Ground, MovementTuning, Player, RespawnRequested, Wall};

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let slope_color = Color::srgb(0.55, 0.45, 0.35);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    // Ground
    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(800.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -200.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(800.0, 40.0),
        ground_layers,
    ));

    // Left wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 500.0)),
            ..default()
        },
        Transform::from_xyz(-420.0, 50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 500.0),
        wall_layers,
    ));

    // Right wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 500.0)),
            ..default()
        },
        Transform::from_xyz(420.0, 50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 500.0),
        wall_layers,
    ));

    // Platform - left side
    commands.spawn((
        Ground,
        Sprite {
            color: platform_color,
            custom_size: Some(Vec2::new(150.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(-250.0, -50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(150.0, 20.0),
        ground_layers,
    ));

    // Platform - center, high enough to need a double jump or glide
    commands.spawn((
        Ground,
        Sprite {
            color: platform_color,
            custom_size: Some(Vec2::new(120.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 150.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(120.0, 20.0),
        ground_layers,
    ));

    // Steep ramp on the right, beyond the slope limit
    commands.spawn((
        Ground,
        Sprite {
            color: slope_color,
            custom_size: Some(Vec2::new(200.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(280.0, -130.0, 0.0)
            .with_rotation(Quat::from_rotation_z(45f32.to_radians())),
        RigidBody::Static,
        Collider::rectangle(200.0, 20.0),
        ground_layers,
    ));

    // Pillar for wall jump and wall run practice
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(30.0, 200.0)),
            ..default()
        },
        Transform::from_xyz(-100.0, -80.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(30.0, 200.0),
        wall_layers,
    ));
}

/// F5 reloads tuning from disk, R respawns the player.
pub(crate) fn dev_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    source: Res<TuningSource>,
    mut tuning: ResMut<MovementTuning>,
    players: Query<Entity, With<Player>>,
    mut respawns: MessageWriter<RespawnRequested>,
) {
    if keyboard.just_pressed(KeyCode::F5) {
        let mut next = tuning.clone();
        if reload_tuning(&source, &mut next) && next != *tuning {
            *tuning = next;
        }
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        for entity in &players {
            respawns.write(RespawnRequested { entity });
        }
    }
}
