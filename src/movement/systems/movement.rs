//! Movement domain: systems that drive controllers and publish their state.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::collisions::AvianCollisionWorld;
use crate::movement::{
    AnimationState, CharacterBody, LocomotionEvent, LocomotionKind, MovementController,
    MovementInput, MovementTuning, Player, RespawnRequested, SpawnPoint, WorldScale,
};

/// Push tuning changes into every controller between frames. Controllers
/// refuse invalid tuning and keep what they had.
pub(crate) fn sync_tuning(
    tuning: Res<MovementTuning>,
    mut query: Query<(Entity, &mut MovementController), With<Player>>,
) {
    if !tuning.is_changed() {
        return;
    }

    for (entity, mut controller) in &mut query {
        if let Err(errors) = controller.set_tuning(tuning.clone()) {
            for e in &errors {
                error!("{:?}: {}", entity, e);
            }
            warn!("Keeping current movement tuning for {:?}", entity);
        }
    }
}

pub(crate) fn handle_respawns(
    mut requests: MessageReader<RespawnRequested>,
    mut query: Query<(&mut MovementController, &mut Transform, &SpawnPoint)>,
) {
    for request in requests.read() {
        let Ok((mut controller, mut transform, spawn)) = query.get_mut(request.entity) else {
            warn!("Respawn requested for {:?} without a controller", request.entity);
            continue;
        };

        controller.reset();
        transform.translation.x = spawn.0.x;
        transform.translation.y = spawn.0.y;
        info!("Respawned {:?} at {:?}", request.entity, spawn.0);
    }
}

pub(crate) fn drive_controllers(
    time: Res<Time>,
    input: Res<MovementInput>,
    scale: Res<WorldScale>,
    spatial_query: SpatialQuery,
    mut query: Query<
        (
            Entity,
            &mut MovementController,
            &mut Transform,
            &CharacterBody,
        ),
        With<Player>,
    >,
    mut locomotion_events: MessageWriter<LocomotionEvent>,
) {
    let dt = time.delta_secs();

    // Bevy's first frame has no elapsed time
    if dt <= 0.0 {
        return;
    }

    for (entity, mut controller, mut transform, body) in &mut query {
        let mut world =
            AvianCollisionWorld::new(&spatial_query, &mut transform, *body, scale.pixels_per_unit);

        match controller.update(dt, *input, &mut world) {
            Ok(report) => {
                for kind in LocomotionKind::from_frame(&report.events) {
                    locomotion_events.write(LocomotionEvent { entity, kind });
                }
            }
            Err(e) => error!("Movement frame rejected for {:?}: {}", entity, e),
        }
    }
}

/// Mirror the published locomotion state onto the animation state and
/// sprite orientation.
pub(crate) fn sync_presentation(
    mut query: Query<(&MovementController, &mut AnimationState, &mut Sprite), With<Player>>,
) {
    for (controller, mut animation, mut sprite) in &mut query {
        let state = controller.state();

        let next = AnimationState::from_state(state);
        if *animation != next {
            *animation = next;
        }

        let flip = !state.facing.is_right();
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}
