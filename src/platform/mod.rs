//! Platform abstraction layer
//!
//! The game core only ever talks to hardware through these traits:
//! - Time (monotonic milliseconds)
//! - Joystick readings and the start button
//! - The character display
//! - The warning indicator light

pub mod headless;

use glam::IVec2;

pub use headless::{Headless, TextDisplay};

/// Raw joystick sample, straight from the ADC
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickReading {
    pub x: i32,
    pub y: i32,
}

impl StickReading {
    /// Mid-scale reading of a 10-bit ADC
    pub const CENTER: StickReading = StickReading { x: 512, y: 512 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset from a latched rest reading
    pub fn offset_from(self, origin: StickReading) -> IVec2 {
        IVec2::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Character display sink
pub trait Display {
    fn clear(&mut self);
    fn draw_player(&mut self, x: i32, y: i32);
    fn draw_obstacle(&mut self, x: i32, y: i32);
    fn draw_setup_screen(&mut self);
    fn draw_game_over_screen(&mut self, duration_ms: u64);
}

/// Joystick input source. No interpretation happens here.
pub trait Joystick {
    fn read_joystick(&mut self) -> StickReading;

    fn button_pressed(&mut self) -> bool {
        false
    }
}

/// Warning light ahead of a direction change
pub trait Indicator {
    fn set_warning_intensity(&mut self, level: u8);
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Everything the runtime needs from a board
pub trait Platform: Display + Joystick + Indicator + Clock {}

impl<T: Display + Joystick + Indicator + Clock> Platform for T {}
