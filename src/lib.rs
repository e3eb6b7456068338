//! LCD Dodger - a character LCD obstacle dodging game
//!
//! Core modules:
//! - `sim`: Deterministic game core (obstacles, pacing, scheduler, phases)
//! - `game`: Runtime that ties the core to a platform each frame
//! - `platform`: Display/joystick/indicator/clock boundary plus a headless host
//! - `settings`: Display geometry and settings loading
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use game::Game;
pub use settings::{DisplayGeometry, LcdPreset, Settings};
pub use tuning::{JobCadence, Tuning};

/// Game configuration constants
pub mod consts {
    /// Brightest level the warning indicator is driven to
    pub const WARNING_INTENSITY_MAX: u8 = 255;

    /// Seed used when none is given
    pub const DEFAULT_SEED: u64 = 0x5eed;
}
