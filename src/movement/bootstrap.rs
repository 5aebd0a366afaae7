//! Movement domain: player bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    AnimationState, CharacterBody, GameLayer, MovementController, MovementTuning, Player,
    SpawnPoint,
};

const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);
const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 100.0);

/// Spawn the player with a controller built from the current tuning.
/// Runs after content loading so file-provided tuning is already in place.
pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<MovementTuning>) {
    info!(
        "Spawning player: walk_speed={}, jump_speed={}, gravity={}",
        tuning.walk_speed, tuning.jump_speed, tuning.gravity
    );

    let controller = match MovementController::new(tuning.clone()) {
        Ok(controller) => controller,
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            warn!("Spawning player with default movement tuning");
            MovementController::default()
        }
    };

    commands.spawn((
        // Identity & Movement
        (
            Player,
            controller,
            CharacterBody {
                half_extents: PLAYER_SIZE * 0.5,
                ..default()
            },
            SpawnPoint(PLAYER_SPAWN),
            AnimationState::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 0.0),
        // Physics: the controller moves the body, Avian only answers queries
        (
            RigidBody::Kinematic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}
