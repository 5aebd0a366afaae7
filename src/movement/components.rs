//! Movement domain: locomotion state, collision records and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, slopes)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn is_right(self) -> bool {
        self == Facing::Right
    }
}

/// Contact sides reported by the collision engine after a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    pub below: bool,
    pub above: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub const NONE: Self = Self {
        below: false,
        above: false,
        left: false,
        right: false,
    };

    pub fn on_wall(&self) -> bool {
        self.left || self.right
    }
}

/// Result of the downward ground probe. `angle` and `normal` are only
/// meaningful when `hit` is true.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeProbe {
    pub hit: bool,
    /// Degrees between the ground normal and world up.
    pub angle: f32,
    /// Unit ground normal.
    pub normal: Vec2,
}

impl SlopeProbe {
    pub const MISS: Self = Self {
        hit: false,
        angle: 0.0,
        normal: Vec2::ZERO,
    };

    pub fn from_normal(normal: Vec2) -> Self {
        let normal = normal.normalize_or_zero();
        let angle = normal.dot(Vec2::Y).clamp(-1.0, 1.0).acos().to_degrees();
        Self {
            hit: true,
            angle,
            normal,
        }
    }

    pub fn flat() -> Self {
        Self::from_normal(Vec2::Y)
    }
}

/// Persistent locomotion state for one character.
///
/// `is_grounded` is written by the move commit at the end of a frame and read
/// by the ground/air branch at the start of the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementState {
    pub velocity: Vec2,
    pub is_grounded: bool,
    pub is_jumping: bool,
    pub double_jumped: bool,
    pub wall_jumped: bool,
    pub is_wall_running: bool,
    pub is_slope_sliding: bool,
    pub is_gliding: bool,
    pub facing: Facing,
    pub glide_time_remaining: f32,
    /// Set while a glide has not yet started decelerating since it last
    /// became eligible.
    pub start_glide: bool,
    /// Direction of the most recent wall jump; true when it pushed left.
    pub last_wall_jump_went_left: bool,
    pub slope_angle: f32,
    pub slope_normal: Vec2,
}

impl MovementState {
    pub fn new(glide_duration: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            is_grounded: false,
            is_jumping: false,
            double_jumped: false,
            wall_jumped: false,
            is_wall_running: false,
            is_slope_sliding: false,
            is_gliding: false,
            facing: Facing::Right,
            glide_time_remaining: glide_duration,
            start_glide: true,
            last_wall_jump_went_left: false,
            slope_angle: 0.0,
            slope_normal: Vec2::ZERO,
        }
    }

    /// Same state, standing on flat ground.
    pub fn grounded(glide_duration: f32) -> Self {
        Self {
            is_grounded: true,
            slope_normal: Vec2::Y,
            ..Self::new(glide_duration)
        }
    }
}

/// Collision-engine side configuration of a character's body.
#[derive(Component, Debug, Clone, Copy)]
pub struct CharacterBody {
    /// Half size of the body box in world pixels.
    pub half_extents: Vec2,
    /// Ground steeper than this many degrees makes the character slide.
    pub slope_limit: f32,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(12.0, 24.0),
            slope_limit: 30.0,
        }
    }
}

/// Spawn point used when a character is reset.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SpawnPoint(pub Vec2);
