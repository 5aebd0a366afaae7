//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tuning for the locomotion controller.
///
/// Rates are in movement units per second (or per second squared for
/// `gravity` and `glide_decel`). Toggles are independent of each other.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub walk_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub double_jump_speed: f32,
    /// Horizontal wall jump impulse as a multiple of `jump_speed`.
    pub wall_jump_x_amount: f32,
    /// Vertical wall jump impulse as a multiple of `jump_speed`.
    pub wall_jump_y_amount: f32,
    /// Wall run ascent is `jump_speed / wall_run_divisor`.
    pub wall_run_divisor: f32,
    pub slope_slide_speed: f32,
    pub glide_decel: f32,
    pub glide_duration: f32,
    /// Seconds horizontal input stays locked after a wall jump.
    pub wall_jump_lock_time: f32,
    /// Seconds a wall run stays eligible after it was last refreshed.
    pub wall_run_lock_time: f32,
    /// Length of the downward slope probe.
    pub ground_probe_distance: f32,
    /// Factor applied to upward speed when jump is released mid-air.
    pub jump_cut_factor: f32,
    /// Vertical axis value above which glide is requested.
    pub glide_input_threshold: f32,
    /// Vertical speed below which a glide may begin.
    pub glide_entry_speed: f32,
    pub can_double_jump: bool,
    pub can_wall_jump: bool,
    pub can_wall_run: bool,
    pub can_run_after_wall_jump: bool,
    pub can_glide: bool,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            jump_speed: 8.0,
            gravity: 20.0,
            double_jump_speed: 4.0,
            wall_jump_x_amount: 1.5,
            wall_jump_y_amount: 1.5,
            wall_run_divisor: 2.0,
            slope_slide_speed: 4.0,
            glide_decel: 2.0,
            glide_duration: 2.0,
            wall_jump_lock_time: 2.0,
            wall_run_lock_time: 2.0,
            ground_probe_distance: 1.0,
            jump_cut_factor: 0.5,
            glide_input_threshold: 0.5,
            glide_entry_speed: 0.2,
            can_double_jump: true,
            can_wall_jump: true,
            can_wall_run: true,
            can_run_after_wall_jump: true,
            can_glide: true,
        }
    }
}

/// A tuning value that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningError {
    pub field: &'static str,
    pub value: f32,
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tuning field '{}' must be finite and positive, got {}",
            self.field, self.value
        )
    }
}

impl std::error::Error for TuningError {}

impl MovementTuning {
    /// Check that every rate is finite and strictly positive.
    /// Returns every offending field, empty if the tuning is usable.
    pub fn validate(&self) -> Vec<TuningError> {
        let fields = [
            ("walk_speed", self.walk_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("double_jump_speed", self.double_jump_speed),
            ("wall_jump_x_amount", self.wall_jump_x_amount),
            ("wall_jump_y_amount", self.wall_jump_y_amount),
            ("wall_run_divisor", self.wall_run_divisor),
            ("slope_slide_speed", self.slope_slide_speed),
            ("glide_decel", self.glide_decel),
            ("glide_duration", self.glide_duration),
            ("wall_jump_lock_time", self.wall_jump_lock_time),
            ("wall_run_lock_time", self.wall_run_lock_time),
            ("ground_probe_distance", self.ground_probe_distance),
            ("jump_cut_factor", self.jump_cut_factor),
            ("glide_input_threshold", self.glide_input_threshold),
            ("glide_entry_speed", self.glide_entry_speed),
        ];

        fields
            .into_iter()
            .filter(|(_, value)| !value.is_finite() || *value <= 0.0)
            .map(|(field, value)| TuningError { field, value })
            .collect()
    }

    /// Wall run ascent speed.
    pub fn wall_run_speed(&self) -> f32 {
        self.jump_speed / self.wall_run_divisor
    }
}

/// Input sampled once per frame.
///
/// Axes are in [-1, 1]. The jump fields are edges: true only on the frame
/// the button went down (or up).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
}

impl MovementInput {
    pub fn horizontal(x: f32) -> Self {
        Self {
            axis: Vec2::new(x, 0.0),
            ..default()
        }
    }

    pub fn with_vertical(mut self, y: f32) -> Self {
        self.axis.y = y;
        self
    }

    pub fn pressing_jump(mut self) -> Self {
        self.jump_just_pressed = true;
        self
    }

    pub fn releasing_jump(mut self) -> Self {
        self.jump_just_released = true;
        self
    }
}

/// Conversion between movement units and world pixels.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldScale {
    pub pixels_per_unit: f32,
}

impl Default for WorldScale {
    fn default() -> Self {
        Self {
            pixels_per_unit: 32.0,
        }
    }
}
