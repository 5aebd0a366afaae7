//! Movement domain: timed reversion of transient locomotion locks.
//!
//! Each key holds at most one pending countdown. Timers are advanced by the
//! controller's own frame tick, so expiry happens on the same thread and in
//! the same frame order as the rest of the update.

/// The locks that revert on their own after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReversionKey {
    /// Clears `wall_jumped`, returning horizontal control to the player.
    WallJumpLock,
    /// Clears `is_wall_running`.
    WallRunLock,
}

impl ReversionKey {
    pub const ALL: [ReversionKey; 2] = [ReversionKey::WallJumpLock, ReversionKey::WallRunLock];

    fn slot(self) -> usize {
        match self {
            ReversionKey::WallJumpLock => 0,
            ReversionKey::WallRunLock => 1,
        }
    }
}

/// Countdowns for the reversion keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReversionTimers {
    remaining: [Option<f32>; 2],
}

impl ReversionTimers {
    /// Start (or restart) the countdown for `key`. Re-arming replaces the
    /// pending countdown; durations never stack.
    pub fn arm(&mut self, key: ReversionKey, duration: f32) {
        self.remaining[key.slot()] = Some(duration);
    }

    /// Drop the pending countdown for `key`, if any.
    pub fn cancel(&mut self, key: ReversionKey) {
        self.remaining[key.slot()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.remaining = [None; 2];
    }

    pub fn is_armed(&self, key: ReversionKey) -> bool {
        self.remaining[key.slot()].is_some()
    }

    pub fn remaining(&self, key: ReversionKey) -> Option<f32> {
        self.remaining[key.slot()]
    }

    /// Advance every pending countdown by `dt` and call `on_expire` for each
    /// key whose countdown ran out. Expired keys are disarmed before the
    /// callback runs.
    pub fn tick(&mut self, dt: f32, mut on_expire: impl FnMut(ReversionKey)) {
        for key in ReversionKey::ALL {
            let slot = &mut self.remaining[key.slot()];
            let Some(left) = slot.as_mut() else {
                continue;
            };

            *left -= dt;
            if *left <= 0.0 {
                *slot = None;
                on_expire(key);
            }
        }
    }
}
