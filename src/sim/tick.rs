//! Per-frame phase machine
//!
//! Runs once per frame after the scheduler has had its turn: reads the stick,
//! moves the player, checks for collisions and walks the phases.

use glam::IVec2;

use super::state::{GamePhase, Session};
use crate::consts::WARNING_INTENSITY_MAX;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Clock sample for this frame (ms)
    pub now_ms: u64,
    /// Raw stick offset from its rest position
    pub deflection: IVec2,
    /// Start/restart button held
    pub button: bool,
}

/// Advance the phase machine by one frame
pub fn tick(session: &mut Session, input: &TickInput) {
    let now = input.now_ms;
    session.now_ms = now;

    let step = stick_step(input.deflection, session.tuning.joystick_deadzone);
    let deflected = step != IVec2::ZERO;
    let button_edge = session.button_edge(input.button);

    match session.phase {
        GamePhase::Setup => {
            let timed_out = session
                .tuning
                .setup_timeout_ms
                .is_some_and(|timeout| session.time_in_phase() >= timeout);
            let pushed = session.stick_trigger(deflected);
            if pushed || button_edge || timed_out {
                start_run(session, now);
            }
        }

        GamePhase::Running => {
            if step_player(session, step, now) {
                return;
            }
            if session.pacing.warning_requested {
                session.warning_level = 0;
                session.enter(GamePhase::PreDirectionChange, now);
            }
        }

        GamePhase::PreDirectionChange => {
            if step_player(session, step, now) {
                return;
            }
            let elapsed = session.time_in_phase();
            let duration = session.tuning.warning_duration_ms;
            if elapsed >= duration {
                session.direction = session.direction.reversed();
                session.pacing.complete_direction_change(now);
                session.warning_level = 0;
                log::debug!("Obstacles now moving {:?}", session.direction);
                session.enter(GamePhase::Running, now);
            } else {
                session.warning_level = warning_ramp(elapsed, duration);
            }
        }

        GamePhase::GameOver => {
            let lockout_over = session.time_in_phase() >= session.tuning.restart_lockout_ms;
            let pushed = session.stick_trigger(deflected);
            if lockout_over && (pushed || button_edge) {
                session.reset(now);
                session.enter(GamePhase::Setup, now);
            }
        }
    }
}

/// One-cell step per axis for a stick offset, zero inside the deadzone
pub fn stick_step(deflection: IVec2, deadzone: i32) -> IVec2 {
    let axis = |v: i32| {
        if v > deadzone {
            1
        } else if v < -deadzone {
            -1
        } else {
            0
        }
    };
    IVec2::new(axis(deflection.x), axis(deflection.y))
}

/// Warning indicator level `elapsed` ms into a warning of `duration` ms
pub fn warning_ramp(elapsed: u64, duration: u64) -> u8 {
    if duration == 0 || elapsed >= duration {
        return WARNING_INTENSITY_MAX;
    }
    (elapsed * WARNING_INTENSITY_MAX as u64 / duration) as u8
}

fn start_run(session: &mut Session, now: u64) {
    session.player = session.geometry.player_start();
    session.last_player_move_ms = now;
    session.pacing.restamp(now);
    session.started_ms = now;
    session.duration_ms = 0;
    session.enter(GamePhase::Running, now);
}

/// Move the player and report a collision on either side of the step.
///
/// An obstacle job may already have scrolled onto the player this frame, so
/// the cell is checked before the player leaves it as well as after.
fn step_player(session: &mut Session, step: IVec2, now: u64) -> bool {
    if check_collision(session, now) {
        return true;
    }
    move_player(session, step, now);
    check_collision(session, now)
}

fn move_player(session: &mut Session, step: IVec2, now: u64) {
    if step == IVec2::ZERO {
        return;
    }
    if now.saturating_sub(session.last_player_move_ms) < session.tuning.player_move_interval_ms {
        return;
    }
    session.last_player_move_ms = now;

    let next = session.geometry.clamp(session.player + step);
    if next != session.player {
        session.player = next;
        session.dirty = true;
    }
}

/// End the run if the player shares a cell with an obstacle
fn check_collision(session: &mut Session, now: u64) -> bool {
    let player = session.player;
    if !session.obstacles.collides_with(player.x, player.y) {
        return false;
    }
    session.duration_ms = now.saturating_sub(session.started_ms);
    session.warning_level = 0;
    session.pacing.warning_requested = false;
    // A stick held through the crash must come back to rest before it restarts
    session.stick_armed = false;
    log::info!("Collision at {} after {} ms", player, session.duration_ms);
    session.enter(GamePhase::GameOver, now);
    true
}
