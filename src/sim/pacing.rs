//! Direction and speed pacing
//!
//! Decides from elapsed time when the obstacles speed up and when a direction
//! change gets announced. Callers gate these on the game phase.

use rand::Rng;

use crate::tuning::Tuning;

/// Timestamps and cadence for obstacle movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacing {
    /// Current time between obstacle moves (ms)
    pub move_interval_ms: u64,
    pub last_moved_ms: u64,
    pub last_speed_up_ms: u64,
    pub last_direction_change_ms: u64,
    /// A flip was rolled and is waiting for the warning phase
    pub warning_requested: bool,
}

impl Pacing {
    pub fn new(tuning: &Tuning, now_ms: u64) -> Self {
        Self {
            move_interval_ms: tuning.initial_move_interval_ms,
            last_moved_ms: now_ms,
            last_speed_up_ms: now_ms,
            last_direction_change_ms: now_ms,
            warning_requested: false,
        }
    }

    /// Restart every timer from `now_ms`, keeping the interval
    pub fn restamp(&mut self, now_ms: u64) {
        self.last_moved_ms = now_ms;
        self.last_speed_up_ms = now_ms;
        self.last_direction_change_ms = now_ms;
        self.warning_requested = false;
    }

    pub fn move_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_moved_ms) >= self.move_interval_ms
    }

    /// Shrink the move interval if the speed-up cooldown has passed.
    ///
    /// Returns the new interval when a speed-up happened. At the floor the
    /// timer still restarts but the interval stays put.
    pub fn try_speed_up(&mut self, now_ms: u64, tuning: &Tuning) -> Option<u64> {
        if now_ms.saturating_sub(self.last_speed_up_ms) < tuning.speed_up_cooldown_ms {
            return None;
        }
        self.last_speed_up_ms = now_ms;

        let next = sped_up_interval(self.move_interval_ms, tuning);
        if next == self.move_interval_ms {
            return None;
        }
        self.move_interval_ms = next;
        Some(next)
    }

    /// Roll for a direction change once the cooldown has passed.
    ///
    /// A successful roll only raises `warning_requested`; the flip itself
    /// happens when the warning runs out.
    pub fn roll_direction_change<R: Rng>(
        &mut self,
        now_ms: u64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> bool {
        if self.warning_requested {
            return false;
        }
        if now_ms.saturating_sub(self.last_direction_change_ms)
            < tuning.direction_change_cooldown_ms
        {
            return false;
        }
        if rng.random::<f32>() < tuning.direction_change_chance {
            self.warning_requested = true;
            return true;
        }
        false
    }

    /// Record that the announced flip has been carried out
    pub fn complete_direction_change(&mut self, now_ms: u64) {
        self.last_direction_change_ms = now_ms;
        self.warning_requested = false;
    }
}

/// Move interval after one speed-up, clamped to the floor
pub fn sped_up_interval(current_ms: u64, tuning: &Tuning) -> u64 {
    current_ms
        .saturating_sub(tuning.speed_up_step_ms)
        .max(tuning.min_move_interval_ms)
}
