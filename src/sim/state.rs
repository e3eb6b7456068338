//! Game phase and session state
//!
//! Everything a single run needs lives in [`Session`]. It is rebuilt on every
//! restart; the RNG stream carries on so consecutive runs differ.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::{Direction, ObstacleField};
use super::pacing::Pacing;
use crate::settings::{DisplayGeometry, Settings};
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the stick
    Setup,
    /// Active gameplay
    Running,
    /// Direction change announced, warning light ramping up
    PreDirectionChange,
    /// Run ended, showing the time survived
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Setup => "setup",
            GamePhase::Running => "running",
            GamePhase::PreDirectionChange => "pre-direction-change",
            GamePhase::GameOver => "game-over",
        }
    }

    /// Legal phase transitions
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, next),
            (Setup, Running)
                | (Running, PreDirectionChange)
                | (Running, GameOver)
                | (PreDirectionChange, Running)
                | (PreDirectionChange, GameOver)
                | (GameOver, Setup)
        )
    }

    /// Phases in which the player and obstacles are live
    pub fn is_live(self) -> bool {
        matches!(self, GamePhase::Running | GamePhase::PreDirectionChange)
    }
}

/// State of the current run
#[derive(Debug, Clone)]
pub struct Session {
    pub geometry: DisplayGeometry,
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// When the current phase was entered (ms)
    pub phase_entered_ms: u64,
    /// Clock sample for the current frame (ms)
    pub now_ms: u64,
    pub player: IVec2,
    pub last_player_move_ms: u64,
    pub obstacles: ObstacleField,
    pub direction: Direction,
    pub pacing: Pacing,
    /// Something visible changed since the last redraw
    pub dirty: bool,
    /// When the run left setup (ms)
    pub started_ms: u64,
    /// Length of the last finished run (ms)
    pub duration_ms: u64,
    /// Warning indicator level, nonzero only before a flip
    pub warning_level: u8,
    /// Stick has been seen at rest since the last trigger
    pub stick_armed: bool,
    pub button_was_down: bool,
    pub rng: Pcg32,
}

impl Session {
    /// Fresh power-on session in setup
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let tuning = settings.tuning.clone();
        Self {
            geometry: settings.geometry,
            phase: GamePhase::Setup,
            phase_entered_ms: 0,
            now_ms: 0,
            player: settings.geometry.player_start(),
            last_player_move_ms: 0,
            obstacles: ObstacleField::new(),
            direction: tuning.initial_direction,
            pacing: Pacing::new(&tuning, 0),
            dirty: true,
            started_ms: 0,
            duration_ms: 0,
            warning_level: 0,
            // The stick's rest position is latched at power-on
            stick_armed: true,
            button_was_down: false,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Put the session back to the start of a run. RNG and config survive.
    pub fn reset(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        self.player = self.geometry.player_start();
        self.last_player_move_ms = now_ms;
        self.obstacles.clear();
        self.direction = self.tuning.initial_direction;
        self.pacing = Pacing::new(&self.tuning, now_ms);
        self.started_ms = now_ms;
        self.duration_ms = 0;
        self.warning_level = 0;
        // The restart gesture leaves the stick pushed
        self.stick_armed = false;
        self.dirty = true;
    }

    /// Switch phase. Illegal transitions are a bug.
    pub fn enter(&mut self, next: GamePhase, now_ms: u64) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        log::info!("Phase {} -> {} at {} ms", self.phase.as_str(), next.as_str(), now_ms);
        self.phase = next;
        self.phase_entered_ms = now_ms;
        self.dirty = true;
    }

    /// Time spent in the current phase (ms)
    pub fn time_in_phase(&self) -> u64 {
        self.now_ms.saturating_sub(self.phase_entered_ms)
    }

    /// Fires once when the stick is pushed after having been at rest
    pub fn stick_trigger(&mut self, deflected: bool) -> bool {
        if !deflected {
            self.stick_armed = true;
            return false;
        }
        std::mem::take(&mut self.stick_armed)
    }

    /// True on the frame the button goes down
    pub fn button_edge(&mut self, down: bool) -> bool {
        let edge = down && !self.button_was_down;
        self.button_was_down = down;
        edge
    }

    /// Describe every broken invariant. Empty means healthy.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.geometry.contains(self.player) {
            problems.push(format!("player off screen at {}", self.player));
        }
        if let Some(o) = self.obstacles.iter().find(|o| !self.geometry.contains(o.pos)) {
            problems.push(format!("obstacle off screen at {}", o.pos));
        }
        let interval = self.pacing.move_interval_ms;
        if interval < self.tuning.min_move_interval_ms
            || interval > self.tuning.initial_move_interval_ms
        {
            problems.push(format!("move interval {} ms out of range", interval));
        }
        if self.warning_level != 0 && self.phase != GamePhase::PreDirectionChange {
            problems.push(format!(
                "warning level {} outside the warning phase",
                self.warning_level
            ));
        }
        if self.phase == GamePhase::Setup && self.duration_ms != 0 {
            problems.push("duration recorded before the run ended".to_string());
        }

        problems
    }
}
