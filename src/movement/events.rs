//! Movement domain: messages published by the locomotion systems.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::FrameEvents;

/// What kind of locomotion transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionKind {
    Jumped,
    DoubleJumped,
    JumpCut,
    GlideStarted,
    Landed,
    CeilingBump,
    WallRan,
    WallJumped,
    WallJumpLockReleased,
    WallRunLockReleased,
}

/// Fired for each locomotion transition of a character, after its frame
/// has been simulated (sound and particle hooks listen to these)
#[derive(Debug)]
pub struct LocomotionEvent {
    pub entity: Entity,
    pub kind: LocomotionKind,
}

impl Message for LocomotionEvent {}

impl LocomotionKind {
    /// Transitions contained in one frame, in pipeline order.
    pub fn from_frame(events: &FrameEvents) -> impl Iterator<Item = LocomotionKind> {
        [
            (events.wall_jump_lock_released, LocomotionKind::WallJumpLockReleased),
            (events.wall_run_lock_released, LocomotionKind::WallRunLockReleased),
            (events.jumped, LocomotionKind::Jumped),
            (events.jump_cut, LocomotionKind::JumpCut),
            (events.double_jumped, LocomotionKind::DoubleJumped),
            (events.glide_started, LocomotionKind::GlideStarted),
            (events.landed, LocomotionKind::Landed),
            (events.ceiling_bump, LocomotionKind::CeilingBump),
            (events.wall_ran, LocomotionKind::WallRan),
            (events.wall_jumped, LocomotionKind::WallJumped),
        ]
        .into_iter()
        .filter_map(|(happened, kind)| happened.then_some(kind))
    }
}

/// Request to put a character back at its spawn point with fresh state
#[derive(Debug)]
pub struct RespawnRequested {
    pub entity: Entity,
}

impl Message for RespawnRequested {}
