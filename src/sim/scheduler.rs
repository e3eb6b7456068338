//! Cooperative job scheduler
//!
//! The host calls [`Scheduler::tick`] once per driver interval. Each call bumps
//! a counter and runs, in registration order, every job whose interval multiple
//! divides it. Jobs run to completion on the caller's stack; a job that blocks
//! stalls the whole game.
//!
//! The counter and job table are created once at boot and survive game
//! restarts, so job phase is relative to power-on, not to the current run.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Identifies a job that needs regularly scheduled execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobId {
    MoveObstacles,
    SpeedUpObstacles,
    MaybeDirectionChange,
}

type Action<C> = Box<dyn FnMut(&mut C)>;

/// A registered job
pub struct Job<C> {
    pub id: JobId,
    /// Multiple of the driver interval at which this job runs
    pub interval_multiple: u32,
    action: Action<C>,
}

impl<C> std::fmt::Debug for Job<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("interval_multiple", &self.interval_multiple)
            .finish_non_exhaustive()
    }
}

/// Job table plus the tick counter. `C` is the context jobs mutate.
#[derive(Debug)]
pub struct Scheduler<C> {
    jobs: Vec<Job<C>>,
    ticks: u64,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            ticks: 0,
        }
    }

    /// Add a job. Only done at startup.
    pub fn register<F>(
        &mut self,
        id: JobId,
        interval_multiple: u32,
        action: F,
    ) -> Result<(), ConfigError>
    where
        F: FnMut(&mut C) + 'static,
    {
        if interval_multiple == 0 {
            return Err(ConfigError::ZeroJobInterval(id));
        }
        if self.jobs.iter().any(|job| job.id == id) {
            return Err(ConfigError::DuplicateJob(id));
        }
        log::debug!("Registered job {:?} every {} ticks", id, interval_multiple);
        self.jobs.push(Job {
            id,
            interval_multiple,
            action: Box::new(action),
        });
        Ok(())
    }

    /// Advance one driver interval and run every job that is due.
    ///
    /// Returns the ids of the jobs that ran, in the order they ran.
    pub fn tick(&mut self, ctx: &mut C) -> Vec<JobId> {
        self.ticks += 1;
        let ticks = self.ticks;

        let mut ran = Vec::new();
        for job in &mut self.jobs {
            if ticks % job.interval_multiple as u64 == 0 {
                (job.action)(ctx);
                ran.push(job.id);
            }
        }
        ran
    }

    /// Ticks since boot
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn jobs(&self) -> &[Job<C>] {
        &self.jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counts {
        log: Vec<JobId>,
    }

    fn scheduler_1_2_5() -> Scheduler<Counts> {
        let mut scheduler = Scheduler::new();
        scheduler
            .register(JobId::MoveObstacles, 1, |c: &mut Counts| {
                c.log.push(JobId::MoveObstacles)
            })
            .unwrap();
        scheduler
            .register(JobId::MaybeDirectionChange, 2, |c: &mut Counts| {
                c.log.push(JobId::MaybeDirectionChange)
            })
            .unwrap();
        scheduler
            .register(JobId::SpeedUpObstacles, 5, |c: &mut Counts| {
                c.log.push(JobId::SpeedUpObstacles)
            })
            .unwrap();
        scheduler
    }

    #[test]
    fn test_multiples_over_ten_ticks() {
        let mut scheduler = scheduler_1_2_5();
        let mut ctx = Counts::default();
        let mut every_two = Vec::new();
        let mut every_five = Vec::new();

        for _ in 0..10 {
            let ran = scheduler.tick(&mut ctx);
            if ran.contains(&JobId::MaybeDirectionChange) {
                every_two.push(scheduler.ticks());
            }
            if ran.contains(&JobId::SpeedUpObstacles) {
                every_five.push(scheduler.ticks());
            }
        }

        assert_eq!(every_two, vec![2, 4, 6, 8, 10]);
        assert_eq!(every_five, vec![5, 10]);
        let every_one = ctx
            .log
            .iter()
            .filter(|id| **id == JobId::MoveObstacles)
            .count();
        assert_eq!(every_one, 10);
    }

    #[test]
    fn test_runs_in_registration_order() {
        let mut scheduler = scheduler_1_2_5();
        let mut ctx = Counts::default();
        for _ in 0..10 {
            scheduler.tick(&mut ctx);
        }
        // Tick 10 runs all three in order
        assert_eq!(
            &ctx.log[ctx.log.len() - 3..],
            &[
                JobId::MoveObstacles,
                JobId::MaybeDirectionChange,
                JobId::SpeedUpObstacles
            ]
        );
    }

    #[test]
    fn test_rejects_bad_registration() {
        let mut scheduler: Scheduler<Counts> = Scheduler::new();
        assert!(matches!(
            scheduler.register(JobId::MoveObstacles, 0, |_| {}),
            Err(ConfigError::ZeroJobInterval(JobId::MoveObstacles))
        ));
        scheduler.register(JobId::MoveObstacles, 1, |_| {}).unwrap();
        assert!(matches!(
            scheduler.register(JobId::MoveObstacles, 3, |_| {}),
            Err(ConfigError::DuplicateJob(JobId::MoveObstacles))
        ));
        assert_eq!(scheduler.jobs().len(), 1);
    }

    #[test]
    fn test_empty_scheduler_still_counts() {
        let mut scheduler: Scheduler<Counts> = Scheduler::new();
        let mut ctx = Counts::default();
        assert!(scheduler.tick(&mut ctx).is_empty());
        assert!(scheduler.tick(&mut ctx).is_empty());
        assert_eq!(scheduler.ticks(), 2);
    }
}
