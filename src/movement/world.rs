//! Movement domain: the boundary to the collision engine.

use bevy::prelude::*;

use crate::movement::{CollisionFlags, SlopeProbe};

/// What the controller needs from the physics side.
///
/// Implementations own the character's position. The controller only asks
/// for a probe, hands over a displacement and reads back where contact
/// happened.
pub trait CollisionWorld {
    /// Cast straight down from the character's current position.
    fn probe_ground(&self, max_distance: f32) -> SlopeProbe;

    /// Move by `displacement` with collision response and report which sides
    /// touched something after resolution.
    fn move_by(&mut self, displacement: Vec2) -> CollisionFlags;

    /// Steepest walkable slope, in degrees from world up.
    fn slope_limit(&self) -> f32;
}
