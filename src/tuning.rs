//! Data-driven game balance
//!
//! Every timing literal the game plays with lives here so a board can be
//! retuned from a settings file without touching the loop.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::Direction;

/// How often each job runs, in multiples of the driver interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobCadence {
    pub move_obstacles: u32,
    pub maybe_direction_change: u32,
    pub speed_up_obstacles: u32,
}

impl Default for JobCadence {
    fn default() -> Self {
        Self {
            move_obstacles: 1,
            maybe_direction_change: 4,
            speed_up_obstacles: 10,
        }
    }
}

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Base scheduler tick (ms)
    pub driver_interval_ms: u64,
    /// Scheduler ticks allowed per frame before the backlog is dropped
    pub max_catchup_ticks: u32,
    pub jobs: JobCadence,

    // === Obstacles ===
    /// Obstacle move interval at the start of a run (ms)
    pub initial_move_interval_ms: u64,
    /// Floor the move interval never drops below (ms)
    pub min_move_interval_ms: u64,
    /// Amount shaved off the move interval per speed-up (ms)
    pub speed_up_step_ms: u64,
    /// Time between speed-ups (ms)
    pub speed_up_cooldown_ms: u64,
    /// Chance of spawning a new obstacle each time the field moves
    pub spawn_chance: f32,
    /// Travel direction at the start of a run
    pub initial_direction: Direction,

    // === Direction changes ===
    /// Quiet period after a flip before another can be rolled (ms)
    pub direction_change_cooldown_ms: u64,
    /// Chance per eligible check that a flip is announced
    pub direction_change_chance: f32,
    /// Length of the pre-flip warning (ms)
    pub warning_duration_ms: u64,

    // === Player ===
    /// Raw joystick offset that counts as a deflection
    pub joystick_deadzone: i32,
    /// Minimum time between player steps (ms)
    pub player_move_interval_ms: u64,

    // === Phases ===
    /// Start the run anyway after this long on the setup screen (ms)
    pub setup_timeout_ms: Option<u64>,
    /// Time the game-over screen ignores restart input (ms)
    pub restart_lockout_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            driver_interval_ms: 50,
            max_catchup_ticks: 8,
            jobs: JobCadence::default(),

            initial_move_interval_ms: 400,
            min_move_interval_ms: 100,
            speed_up_step_ms: 25,
            speed_up_cooldown_ms: 5_000,
            spawn_chance: 0.5,
            initial_direction: Direction::Left,

            direction_change_cooldown_ms: 4_000,
            direction_change_chance: 0.05,
            warning_duration_ms: 1_500,

            joystick_deadzone: 200,
            player_move_interval_ms: 150,

            setup_timeout_ms: Some(30_000),
            restart_lockout_ms: 1_000,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.driver_interval_ms == 0 {
            return Err(ConfigError::ZeroDriverInterval);
        }
        if self.max_catchup_ticks == 0 {
            return Err(ConfigError::ZeroCatchup);
        }
        if self.min_move_interval_ms == 0 {
            return Err(ConfigError::ZeroMoveIntervalFloor);
        }
        if self.min_move_interval_ms > self.initial_move_interval_ms {
            return Err(ConfigError::FloorAboveInitial {
                floor: self.min_move_interval_ms,
                initial: self.initial_move_interval_ms,
            });
        }
        check_probability("spawn_chance", self.spawn_chance)?;
        check_probability("direction_change_chance", self.direction_change_chance)?;
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::BadProbability { field, value })
    }
}
