//! Movement domain: per-frame locomotion controller and its ECS wiring.

mod bootstrap;
mod components;
mod controller;
#[cfg(feature = "dev-tools")]
mod dev;
mod events;
mod presentation;
mod resources;
mod reversion;
mod systems;
mod world;

pub use components::{
    CharacterBody, CollisionFlags, Facing, GameLayer, Ground, MovementState, Player, SlopeProbe,
    SpawnPoint, Wall,
};
pub use controller::{FrameEvents, FrameReport, MovementController, MovementError, PIPELINE, Stage};
pub use events::{LocomotionEvent, LocomotionKind, RespawnRequested};
pub use presentation::AnimationState;
pub use resources::{MovementInput, MovementTuning, TuningError, WorldScale};
pub use reversion::{ReversionKey, ReversionTimers};
pub use world::CollisionWorld;

use bevy::prelude::*;

use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    drive_controllers, handle_respawns, read_input, sync_presentation, sync_tuning,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<WorldScale>()
            .add_message::<LocomotionEvent>()
            .add_message::<RespawnRequested>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (
                    read_input,
                    sync_tuning,
                    handle_respawns,
                    drive_controllers,
                    sync_presentation,
                )
                    .chain(),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_room)
            .add_systems(Update, dev::dev_hotkeys.before(read_input));
    }
}
