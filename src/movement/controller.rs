//! Movement domain: the per-frame locomotion controller.
//!
//! One call to [`MovementController::update`] runs the stages in [`PIPELINE`]
//! in order. Later stages may override velocity written by earlier ones; the
//! order is the priority:
//!
//! 1. `Reversions` expire wall-jump and wall-run locks whose time is up.
//! 2. `HorizontalIntent` writes `velocity.x` from input unless wall-jump locked.
//! 3. `SlopeProbe` refreshes slope fields when the probe hits.
//! 4. `GroundOrAir` applies the grounded rules (reset, slide, jump) or the
//!    airborne rules (jump cut, double jump). Grounded here is last frame's
//!    collision result.
//! 5. `Vertical` integrates either glide deceleration or gravity, never both.
//! 6. `Commit` hands `velocity * dt` to the collision world and stores the
//!    new grounded flag for the next frame.
//! 7. `Ceiling` adds one extra gravity tick after hitting something above.
//! 8. `WallInteraction` resolves wall run, wall jump and wall release.

use bevy::prelude::*;

use crate::movement::{
    CollisionFlags, CollisionWorld, Facing, MovementInput, MovementState, MovementTuning,
    ReversionKey, ReversionTimers, TuningError,
};

/// A frame the controller refuses to simulate.
#[derive(Debug, Clone, PartialEq)]
pub enum MovementError {
    InvalidDeltaTime(f32),
    NonFiniteInput { axis: &'static str, value: f32 },
    AxisOutOfRange { axis: &'static str, value: f32 },
}

impl std::fmt::Display for MovementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementError::InvalidDeltaTime(dt) => {
                write!(f, "delta time must be finite and positive, got {}", dt)
            }
            MovementError::NonFiniteInput { axis, value } => {
                write!(f, "input axis '{}' is not finite: {}", axis, value)
            }
            MovementError::AxisOutOfRange { axis, value } => {
                write!(f, "input axis '{}' is outside [-1, 1]: {}", axis, value)
            }
        }
    }
}

impl std::error::Error for MovementError {}

/// Named stages of one update, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reversions,
    HorizontalIntent,
    SlopeProbe,
    GroundOrAir,
    Vertical,
    Commit,
    Ceiling,
    WallInteraction,
}

pub const PIPELINE: [Stage; 8] = [
    Stage::Reversions,
    Stage::HorizontalIntent,
    Stage::SlopeProbe,
    Stage::GroundOrAir,
    Stage::Vertical,
    Stage::Commit,
    Stage::Ceiling,
    Stage::WallInteraction,
];

/// Discrete things that happened during one update.
///
/// `glide_applied` and `gravity_applied` say which vertical integration ran
/// this frame; the rest are transitions forwarded as [`LocomotionKind`]s.
///
/// [`LocomotionKind`]: crate::movement::LocomotionKind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub jumped: bool,
    pub double_jumped: bool,
    pub jump_cut: bool,
    pub glide_started: bool,
    pub glide_applied: bool,
    pub gravity_applied: bool,
    pub landed: bool,
    pub ceiling_bump: bool,
    pub wall_ran: bool,
    pub wall_jumped: bool,
    pub wall_jump_lock_released: bool,
    pub wall_run_lock_released: bool,
}

/// Output of one update.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Displacement requested from the collision world.
    pub displacement: Vec2,
    /// Contacts the collision world reported back.
    pub collisions: CollisionFlags,
    pub events: FrameEvents,
}

/// Scratch data shared by the stages of a single update.
struct Frame<'w, W: CollisionWorld> {
    dt: f32,
    input: MovementInput,
    world: &'w mut W,
    /// A jump impulse was written this frame; gravity is held off so the
    /// impulse is what gets published.
    impulse: bool,
    displacement: Vec2,
    collisions: CollisionFlags,
    events: FrameEvents,
}

fn check_axis(axis: &'static str, value: f32) -> Result<(), MovementError> {
    if !value.is_finite() {
        return Err(MovementError::NonFiniteInput { axis, value });
    }
    if !(-1.0..=1.0).contains(&value) {
        return Err(MovementError::AxisOutOfRange { axis, value });
    }
    Ok(())
}

/// Owns one character's tuning, locomotion state and reversion timers.
#[derive(Component, Debug, Clone)]
pub struct MovementController {
    tuning: MovementTuning,
    state: MovementState,
    timers: ReversionTimers,
}

impl Default for MovementController {
    fn default() -> Self {
        let tuning = MovementTuning::default();
        Self {
            state: MovementState::new(tuning.glide_duration),
            tuning,
            timers: ReversionTimers::default(),
        }
    }
}

impl MovementController {
    pub fn new(tuning: MovementTuning) -> Result<Self, Vec<TuningError>> {
        let state = MovementState::new(tuning.glide_duration);
        Self::with_state(tuning, state)
    }

    /// Start from an explicit state. A state caught mid wall jump gets a
    /// fresh lock so the arc still ends.
    pub fn with_state(
        tuning: MovementTuning,
        state: MovementState,
    ) -> Result<Self, Vec<TuningError>> {
        let errors = tuning.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut timers = ReversionTimers::default();
        if state.wall_jumped {
            timers.arm(ReversionKey::WallJumpLock, tuning.wall_jump_lock_time);
        }

        Ok(Self {
            tuning,
            state,
            timers,
        })
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn timers(&self) -> &ReversionTimers {
        &self.timers
    }

    /// Swap in new tuning between frames. Remaining glide time is clamped
    /// to the new duration; everything else carries over.
    ///
    /// Invalid tuning is refused and the current tuning stays in place.
    pub fn set_tuning(&mut self, tuning: MovementTuning) -> Result<(), Vec<TuningError>> {
        let errors = tuning.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        self.state.glide_time_remaining = self
            .state
            .glide_time_remaining
            .clamp(0.0, tuning.glide_duration);
        self.tuning = tuning;
        Ok(())
    }

    /// Back to the initial state, with every pending reversion dropped.
    pub fn reset(&mut self) {
        self.state = MovementState::new(self.tuning.glide_duration);
        self.timers.cancel_all();
    }

    /// Simulate one frame of `dt` seconds.
    ///
    /// Rejected frames leave the controller untouched.
    pub fn update<W: CollisionWorld>(
        &mut self,
        dt: f32,
        input: MovementInput,
        world: &mut W,
    ) -> Result<FrameReport, MovementError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(MovementError::InvalidDeltaTime(dt));
        }
        check_axis("horizontal", input.axis.x)?;
        check_axis("vertical", input.axis.y)?;

        let mut frame = Frame {
            dt,
            input,
            world,
            impulse: false,
            displacement: Vec2::ZERO,
            collisions: CollisionFlags::NONE,
            events: FrameEvents::default(),
        };

        for stage in PIPELINE {
            self.run_stage(stage, &mut frame);
        }

        Ok(FrameReport {
            displacement: frame.displacement,
            collisions: frame.collisions,
            events: frame.events,
        })
    }

    fn run_stage<W: CollisionWorld>(&mut self, stage: Stage, frame: &mut Frame<'_, W>) {
        match stage {
            Stage::Reversions => self.expire_reversions(frame),
            Stage::HorizontalIntent => self.apply_horizontal_intent(frame),
            Stage::SlopeProbe => self.probe_slope(frame),
            Stage::GroundOrAir => {
                if self.state.is_grounded {
                    self.apply_grounded(frame);
                } else {
                    self.apply_airborne(frame);
                }
            }
            Stage::Vertical => self.integrate_vertical(frame),
            Stage::Commit => self.commit_move(frame),
            Stage::Ceiling => self.apply_ceiling(frame),
            Stage::WallInteraction => self.resolve_walls(frame),
        }
    }

    fn expire_reversions<W: CollisionWorld>(&mut self, frame: &mut Frame<'_, W>) {
        let state = &mut self.state;
        let events = &mut frame.events;

        self.timers.tick(frame.dt, |key| match key {
            ReversionKey::WallJumpLock => {
                state.wall_jumped = false;
                events.wall_jump_lock_released = true;
                debug!("Wall jump lock released");
            }
            ReversionKey::WallRunLock => {
                state.is_wall_running = false;
                events.wall_run_lock_released = true;
                debug!("Wall run lock released");
            }
        });
    }

    fn apply_horizontal_intent<W: CollisionWorld>(&mut self, frame: &mut Frame<'_, W>) {
        // The wall jump arc owns velocity.x until its lock expires.
        if self.state.wall_jumped {
            return;
        }

        self.state.velocity.x = frame.input.axis.x * self.tuning.walk_speed;
    }

    fn probe_slope<W: CollisionWorld>(&mut self, frame: &mut Frame<'_, W>) {
        let probe = frame.world.probe_ground(self.tuning.ground_probe_distance);

        // A miss keeps the previous reading.
        if !probe.hit {
            return;
        }

        self.state.slope_angle = probe.angle;
        self.state.slope_normal = probe.normal;
        self.state.is_slope_sliding = probe.angle > frame.world.slope_limit();
    }

    fn apply_grounded<W: CollisionWorld>(&mut self, frame: &mut Frame<'_, W>) {
        let tuning = &self.tuning;
        let state = &mut self.state;

        state.glide_time_remaining = tuning.glide_duration;
        state.velocity.y = 0.0;
        state.is_jumping = false;
        state.double_jumped = false;

        if state.velocity.x < 0.0 {
            state.facing = Facing::Left;
        } else if state.velocity.x > 0.0 {
            state.facing = Facing::Right;
        }

        if state.is_slope_sliding {
            state.velocity = Vec2::new(
                state.slope_normal.x * tuning.slope_slide_speed,
                -state.slope_normal.y * tuning.slope_slide_speed,
            );
        }

        if frame.input.jump_just_pressed {
            state.velocity.y = tuning.jump_speed;
            state.is_jumping = true;
            state.is_wall_running = true;
            frame.impulse = true;
            frame.events.jumped = true;
            debug!("Ground jump: velocity={:?}", state.velocity);
        }
    }

    fn apply_airborne<W: CollisionWorld>(&mut self, frame: &mut Frame<'_, W>) {
        let tuning = &self.tuning;
        let state = &mut self.state;

        // Variable jump height: letting go early trims the ascent.
        if frame.input.jump_just_released && state.velocity.y > 0.0 {
            state.velocity.y *= tuning.jump_cut_factor;
            frame.events.jump_cut = true;
        }

        if frame.input.jump_just_pressed && tuning.can_double_jump && !state.double_jumped {
            state.velocity.y = tuning.double_jump_speed;
            state.double_jumped = true;
            frame.impulse = true;
            frame.events.double_jumped = true;
            debug!("Double jump: velocity={:?}", state.velocity);
        }
    }

    fn integrate_vertical<W: CollisionWorld>(&mut self, frame: &mut Frame<'_, W>) {
        let tuning = &self.tuning;
        let state = &mut self.state;
        let dt = frame.dt;

        let wants_glide = tuning.can_glide
            && frame.input.axis.y > tuning.glide_input_threshold
            && state.velocity.y < tuning.glide_entry_speed
            && !state.is_grounded;

        if wants_glide && state.glide_time_remaining > 0.0 {
            state.is_gliding = true;
            if state.start_glide {
                // Entering a glide kills residual fall speed once.
                state.velocity.y = 0.0;
                state.start_glide = false;
                frame.events.glide_started = true;
                debug!(
                    "Glide started: time_remaining={}",
                    state.glide_time_remaining
                );
            }
            state.velocity.y -= tuning.glide_decel * dt;
            state.glide_time_remaining = (state.glide_time_remaining - dt).max(0.0);
            frame.events.glide_applied = true;
            return;
        }

        state.is_gliding = false;
        if !wants_glide {
            state.start_glide = true;
        }

        if !frame.impulse {
            state.velocity.y -= tuning.gravity * dt;
            frame.events.gravity_applied = true;
        }
    }

    fn commit_move<W: CollisionWorld>(&mut self, frame: &mut Frame<'_, W>) {
        let displacement = self.state.velocity * frame.dt;
        let collisions = frame.world.move_by(displacement);
        frame.displacement = displacement;
        frame.collisions = collisions;

        let was_grounded = self.state.is_grounded;
        self.state.is_grounded = collisions.below;

        if self.state.is_grounded {
            self.state.glide_time_remaining = self.tuning.glide_duration;
            self.state.double_jumped = false;
        }

        if self.state.is_grounded && !was_grounded {
            frame.events.landed = true;
            debug!("Landed: velocity={:?}", self.state.velocity);
        }
    }

    fn apply_ceiling<W: CollisionWorld>(&mut self, frame: &mut Frame<'_, W>) {
        if frame.collisions.above {
            self.state.velocity.y -= self.tuning.gravity * frame.dt;
            frame.events.ceiling_bump = true;
        }
    }

    fn resolve_walls<W: CollisionWorld>(&mut self, frame: &mut Frame<'_, W>) {
        let tuning = &self.tuning;
        let state = &mut self.state;
        let collisions = frame.collisions;

        if !collisions.on_wall() {
            if tuning.can_run_after_wall_jump {
                self.timers.cancel(ReversionKey::WallRunLock);
                state.is_wall_running = true;
            }
            return;
        }

        if tuning.can_wall_run && frame.input.axis.y > 0.0 && state.is_wall_running {
            state.velocity.y = tuning.wall_run_speed();
            self.timers
                .arm(ReversionKey::WallRunLock, tuning.wall_run_lock_time);
            frame.events.wall_ran = true;
        }

        if tuning.can_wall_jump
            && frame.input.jump_just_pressed
            && !state.wall_jumped
            && !state.is_grounded
        {
            // Push away from the direction of travel; standing still against
            // a wall falls back to the contact side.
            let push_right = if state.velocity.x < 0.0 {
                true
            } else if state.velocity.x > 0.0 {
                false
            } else {
                collisions.left
            };
            let direction = if push_right { 1.0 } else { -1.0 };

            state.velocity = Vec2::new(
                direction * tuning.jump_speed * tuning.wall_jump_x_amount,
                tuning.jump_speed * tuning.wall_jump_y_amount,
            );
            state.facing = if push_right {
                Facing::Right
            } else {
                Facing::Left
            };
            state.last_wall_jump_went_left = !push_right;
            state.wall_jumped = true;
            self.timers
                .arm(ReversionKey::WallJumpLock, tuning.wall_jump_lock_time);
            frame.events.wall_jumped = true;
            debug!(
                "Wall jump: velocity={:?}, facing={:?}",
                state.velocity, state.facing
            );
        }
    }
}
