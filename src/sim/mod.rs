//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes in as millisecond samples, never read from a clock
//! - Seeded RNG only
//! - No display, joystick or indicator dependencies

pub mod jobs;
pub mod obstacles;
pub mod pacing;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use jobs::{maybe_change_direction, move_obstacles, register_jobs, speed_up_obstacles};
pub use obstacles::{Direction, Obstacle, ObstacleField};
pub use pacing::{Pacing, sped_up_interval};
pub use scheduler::{Job, JobId, Scheduler};
pub use state::{GamePhase, Session};
pub use tick::{TickInput, stick_step, tick, warning_ramp};
