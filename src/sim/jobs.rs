//! Scheduled jobs
//!
//! The actions the scheduler runs against the session. Each one checks the
//! phase itself, so the job table never changes between runs.

use rand::Rng;

use super::scheduler::{JobId, Scheduler};
use super::state::{GamePhase, Session};
use crate::error::ConfigError;
use crate::tuning::JobCadence;

/// Register the three game jobs at their configured cadence
pub fn register_jobs(
    scheduler: &mut Scheduler<Session>,
    cadence: &JobCadence,
) -> Result<(), ConfigError> {
    scheduler.register(JobId::MoveObstacles, cadence.move_obstacles, move_obstacles)?;
    scheduler.register(
        JobId::MaybeDirectionChange,
        cadence.maybe_direction_change,
        maybe_change_direction,
    )?;
    scheduler.register(
        JobId::SpeedUpObstacles,
        cadence.speed_up_obstacles,
        speed_up_obstacles,
    )?;
    Ok(())
}

/// Scroll the field one cell once the move interval has passed
pub fn move_obstacles(session: &mut Session) {
    if !session.phase.is_live() {
        return;
    }
    let now = session.now_ms;
    if !session.pacing.move_due(now) {
        return;
    }
    session.pacing.last_moved_ms = now;

    session.obstacles.advance(session.direction);
    let pruned = session.obstacles.prune(&session.geometry);
    if pruned > 0 {
        log::trace!("Pruned {} obstacles", pruned);
    }

    if session.rng.random::<f32>() < session.tuning.spawn_chance {
        let spawned = session
            .obstacles
            .spawn(session.direction, &session.geometry, &mut session.rng);
        log::debug!("Spawned obstacle at {}", spawned.pos);
    }

    debug_assert!(session.obstacles.within_bounds(&session.geometry));
    session.dirty = true;
}

/// Maybe announce a direction change
pub fn maybe_change_direction(session: &mut Session) {
    if session.phase != GamePhase::Running {
        return;
    }
    let now = session.now_ms;
    if session
        .pacing
        .roll_direction_change(now, &session.tuning, &mut session.rng)
    {
        log::debug!("Direction change announced at {} ms", now);
    }
}

/// Shorten the move interval once the speed-up cooldown has passed
pub fn speed_up_obstacles(session: &mut Session) {
    if session.phase != GamePhase::Running {
        return;
    }
    let now = session.now_ms;
    if let Some(interval) = session.pacing.try_speed_up(now, &session.tuning) {
        log::debug!("Obstacles sped up to every {} ms", interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Direction, Obstacle};
    use crate::tuning::Tuning;

    fn running_session(tuning: Tuning) -> Session {
        let settings = Settings {
            tuning,
            ..Default::default()
        };
        let mut session = Session::new(&settings, 11);
        session.enter(GamePhase::Running, 0);
        session
    }

    #[test]
    fn test_move_waits_for_interval() {
        let mut session = running_session(Tuning {
            spawn_chance: 0.0,
            ..Default::default()
        });
        session.obstacles.push(Obstacle::new(10, 0));
        let interval = session.pacing.move_interval_ms;

        session.now_ms = interval - 1;
        move_obstacles(&mut session);
        assert_eq!(session.obstacles.iter().next().unwrap().pos.x, 10);

        session.now_ms = interval;
        move_obstacles(&mut session);
        assert_eq!(session.obstacles.iter().next().unwrap().pos.x, 9);
        assert_eq!(session.pacing.last_moved_ms, interval);
    }

    #[test]
    fn test_move_prunes_and_spawns() {
        let mut session = running_session(Tuning {
            spawn_chance: 1.0,
            ..Default::default()
        });
        session.direction = Direction::Right;
        session.obstacles.push(Obstacle::new(15, 1));

        session.now_ms = session.pacing.move_interval_ms;
        move_obstacles(&mut session);

        // Old one fell off the right edge, new one entered on the left
        assert_eq!(session.obstacles.len(), 1);
        assert_eq!(session.obstacles.iter().next().unwrap().pos.x, 0);
        assert!(session.dirty);
    }

    #[test]
    fn test_move_frozen_outside_live_phases() {
        let settings = Settings::default();
        let mut session = Session::new(&settings, 11);
        session.obstacles.push(Obstacle::new(5, 0));
        session.now_ms = 100_000;
        move_obstacles(&mut session);
        assert_eq!(session.obstacles.iter().next().unwrap().pos.x, 5);
    }

    #[test]
    fn test_move_continues_during_warning() {
        let mut session = running_session(Tuning {
            spawn_chance: 0.0,
            ..Default::default()
        });
        session.enter(GamePhase::PreDirectionChange, 0);
        session.obstacles.push(Obstacle::new(5, 0));
        session.now_ms = session.pacing.move_interval_ms;
        move_obstacles(&mut session);
        assert_eq!(session.obstacles.iter().next().unwrap().pos.x, 4);
    }

    #[test]
    fn test_speed_up_only_while_running() {
        let tuning = Tuning::default();
        let cooldown = tuning.speed_up_cooldown_ms;
        let initial = tuning.initial_move_interval_ms;
        let mut session = running_session(tuning);

        session.enter(GamePhase::PreDirectionChange, 0);
        session.now_ms = cooldown;
        speed_up_obstacles(&mut session);
        assert_eq!(session.pacing.move_interval_ms, initial);

        session.enter(GamePhase::Running, cooldown);
        speed_up_obstacles(&mut session);
        assert!(session.pacing.move_interval_ms < initial);
    }

    #[test]
    fn test_direction_roll_only_while_running() {
        let mut session = running_session(Tuning {
            direction_change_chance: 1.0,
            direction_change_cooldown_ms: 0,
            ..Default::default()
        });
        session.enter(GamePhase::GameOver, 0);
        maybe_change_direction(&mut session);
        assert!(!session.pacing.warning_requested);

        let mut session = running_session(Tuning {
            direction_change_chance: 1.0,
            direction_change_cooldown_ms: 0,
            ..Default::default()
        });
        maybe_change_direction(&mut session);
        assert!(session.pacing.warning_requested);
    }

    #[test]
    fn test_register_jobs() {
        let mut scheduler = Scheduler::new();
        register_jobs(&mut scheduler, &JobCadence::default()).unwrap();
        let ids: Vec<JobId> = scheduler.jobs().iter().map(|j| j.id).collect();
        assert_eq!(
            ids,
            vec![
                JobId::MoveObstacles,
                JobId::MaybeDirectionChange,
                JobId::SpeedUpObstacles
            ]
        );

        let mut scheduler = Scheduler::new();
        let cadence = JobCadence {
            speed_up_obstacles: 0,
            ..Default::default()
        };
        assert!(matches!(
            register_jobs(&mut scheduler, &cadence),
            Err(ConfigError::ZeroJobInterval(JobId::SpeedUpObstacles))
        ));
    }
}
