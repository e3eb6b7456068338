//! Runtime loop
//!
//! Owns the long-lived scheduler and the per-run session, and drives both from
//! a platform. The host calls [`Game::poll`] as often as it likes; scheduler
//! ticks are released on a fixed driver interval with a bounded catch-up.

use crate::error::ConfigError;
use crate::platform::{Platform, StickReading};
use crate::settings::Settings;
use crate::sim::{GamePhase, Scheduler, Session, TickInput, register_jobs, tick};

pub struct Game {
    scheduler: Scheduler<Session>,
    session: Session,
    /// Stick rest position latched at power-on
    origin: StickReading,
    next_tick_ms: u64,
    shown_warning: u8,
}

impl Game {
    /// Validate settings, register jobs and show the setup screen.
    ///
    /// Any configuration problem is returned before setup is entered.
    pub fn new<P: Platform>(
        settings: Settings,
        seed: u64,
        io: &mut P,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut scheduler = Scheduler::new();
        register_jobs(&mut scheduler, &settings.tuning.jobs)?;

        let now = io.now_ms();
        let origin = io.read_joystick();
        let mut session = Session::new(&settings, seed);
        session.now_ms = now;
        session.phase_entered_ms = now;

        log::info!(
            "Starting on a {}x{} display, seed {}, stick rest at ({}, {})",
            settings.geometry.width,
            settings.geometry.height,
            seed,
            origin.x,
            origin.y
        );

        let mut game = Self {
            scheduler,
            session,
            origin,
            next_tick_ms: now + settings.tuning.driver_interval_ms,
            shown_warning: 0,
        };
        io.set_warning_intensity(0);
        game.present(io);
        Ok(game)
    }

    /// One pass of the main loop
    pub fn poll<P: Platform>(&mut self, io: &mut P) {
        let now = io.now_ms();
        self.session.now_ms = now;
        self.run_due_ticks(now);

        let input = TickInput {
            now_ms: now,
            deflection: io.read_joystick().offset_from(self.origin),
            button: io.button_pressed(),
        };
        tick(&mut self.session, &input);

        if self.session.warning_level != self.shown_warning {
            self.shown_warning = self.session.warning_level;
            io.set_warning_intensity(self.shown_warning);
        }
        self.present(io);
    }

    fn run_due_ticks(&mut self, now: u64) {
        let interval = self.session.tuning.driver_interval_ms;
        let max_ticks = self.session.tuning.max_catchup_ticks;

        let mut substeps = 0;
        while now >= self.next_tick_ms && substeps < max_ticks {
            self.scheduler.tick(&mut self.session);
            self.next_tick_ms += interval;
            substeps += 1;
        }

        if now >= self.next_tick_ms {
            let dropped = (now - self.next_tick_ms) / interval + 1;
            log::warn!("Loop fell behind, dropping {} scheduler ticks", dropped);
            self.next_tick_ms += dropped * interval;
        }
    }

    /// Redraw if anything moved since last time
    fn present<P: Platform>(&mut self, io: &mut P) {
        if !self.session.dirty {
            return;
        }
        io.clear();
        match self.session.phase {
            GamePhase::Setup => io.draw_setup_screen(),
            GamePhase::GameOver => io.draw_game_over_screen(self.session.duration_ms),
            GamePhase::Running | GamePhase::PreDirectionChange => {
                for obstacle in self.session.obstacles.iter() {
                    io.draw_obstacle(obstacle.pos.x, obstacle.pos.y);
                }
                let player = self.session.player;
                io.draw_player(player.x, player.y);
            }
        }
        self.session.dirty = false;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Direct access for fixtures and debugging
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn scheduler(&self) -> &Scheduler<Session> {
        &self.scheduler
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }
}
