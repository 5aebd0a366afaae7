//! Movement domain: mapping published locomotion state to animation states.

use bevy::prelude::*;

use crate::movement::MovementState;

/// Animation states driven by locomotion.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    /// Rising from a ground, double or wall jump.
    Jump,
    /// Falling or gliding.
    Fall,
}

impl AnimationState {
    /// Integer code used by animator state graphs.
    pub fn code(self) -> i32 {
        match self {
            AnimationState::Idle => 0,
            AnimationState::Run => 1,
            AnimationState::Jump => 2,
            AnimationState::Fall => 3,
        }
    }

    /// Pick the animation for a state after its frame has been simulated.
    pub fn from_state(state: &MovementState) -> Self {
        if state.is_gliding {
            return AnimationState::Fall;
        }

        if state.is_grounded && !state.is_jumping {
            return if state.velocity.x != 0.0 {
                AnimationState::Run
            } else {
                AnimationState::Idle
            };
        }

        let launched = state.is_jumping || state.double_jumped || state.wall_jumped;
        if state.velocity.y > 0.0 && launched {
            AnimationState::Jump
        } else {
            AnimationState::Fall
        }
    }
}
