//! Headless platform
//!
//! A host-side board: a manual clock, a settable stick and button, a
//! recording warning light and a character frame buffer standing in for the
//! LCD. Used by the tests and the demo binary.

use glam::IVec2;

use super::{Clock, Display, Indicator, Joystick, StickReading};
use crate::settings::DisplayGeometry;

pub const PLAYER_GLYPH: char = '@';
pub const OBSTACLE_GLYPH: char = '#';
const BLANK: char = ' ';

/// Character grid the size of the LCD
#[derive(Debug, Clone)]
pub struct TextDisplay {
    geometry: DisplayGeometry,
    cells: Vec<Vec<char>>,
    /// Number of times the screen was cleared
    pub redraws: usize,
}

impl TextDisplay {
    pub fn new(geometry: DisplayGeometry) -> Self {
        Self {
            geometry,
            cells: vec![vec![BLANK; geometry.width as usize]; geometry.height as usize],
            redraws: 0,
        }
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<char> {
        if !self.geometry.contains(IVec2::new(x, y)) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    pub fn row(&self, y: usize) -> String {
        self.cells.get(y).map(|r| r.iter().collect()).unwrap_or_default()
    }

    /// Whole screen, one line per row
    pub fn render(&self) -> String {
        (0..self.cells.len())
            .map(|y| self.row(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True if any row contains `text`
    pub fn shows(&self, text: &str) -> bool {
        (0..self.cells.len()).any(|y| self.row(y).contains(text))
    }

    fn put(&mut self, x: i32, y: i32, glyph: char) {
        if self.geometry.contains(IVec2::new(x, y)) {
            self.cells[y as usize][x as usize] = glyph;
        }
    }

    /// Write text from `at`, cut off at the right edge
    fn write_text(&mut self, at: IVec2, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(at.x + i as i32, at.y, ch);
        }
    }
}

impl Display for TextDisplay {
    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(BLANK);
        }
        self.redraws += 1;
    }

    fn draw_player(&mut self, x: i32, y: i32) {
        self.put(x, y, PLAYER_GLYPH);
    }

    fn draw_obstacle(&mut self, x: i32, y: i32) {
        self.put(x, y, OBSTACLE_GLYPH);
    }

    fn draw_setup_screen(&mut self) {
        let anchor = self.geometry.text_anchor();
        self.write_text(anchor, "DODGE!");
        self.write_text(anchor + IVec2::Y, "MOVE STICK");
    }

    fn draw_game_over_screen(&mut self, duration_ms: u64) {
        let anchor = self.geometry.text_anchor();
        let time = format!("TIME {}.{}s", duration_ms / 1000, (duration_ms % 1000) / 100);
        self.write_text(anchor, "GAME OVER");
        self.write_text(anchor + IVec2::Y, &time);
    }
}

/// A whole board running on the host
#[derive(Debug, Clone)]
pub struct Headless {
    pub now_ms: u64,
    pub stick: StickReading,
    pub button: bool,
    /// Every level sent to the warning light, oldest first
    pub warning_levels: Vec<u8>,
    pub screen: TextDisplay,
}

impl Headless {
    pub fn new(geometry: DisplayGeometry) -> Self {
        Self {
            now_ms: 0,
            stick: StickReading::CENTER,
            button: false,
            warning_levels: Vec::new(),
            screen: TextDisplay::new(geometry),
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Level the warning light is showing right now
    pub fn warning_level(&self) -> u8 {
        self.warning_levels.last().copied().unwrap_or(0)
    }
}

impl Clock for Headless {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl Joystick for Headless {
    fn read_joystick(&mut self) -> StickReading {
        self.stick
    }

    fn button_pressed(&mut self) -> bool {
        self.button
    }
}

impl Indicator for Headless {
    fn set_warning_intensity(&mut self, level: u8) {
        self.warning_levels.push(level);
    }
}

impl Display for Headless {
    fn clear(&mut self) {
        self.screen.clear();
    }

    fn draw_player(&mut self, x: i32, y: i32) {
        self.screen.draw_player(x, y);
    }

    fn draw_obstacle(&mut self, x: i32, y: i32) {
        self.screen.draw_obstacle(x, y);
    }

    fn draw_setup_screen(&mut self) {
        self.screen.draw_setup_screen();
    }

    fn draw_game_over_screen(&mut self, duration_ms: u64) {
        self.screen.draw_game_over_screen(duration_ms);
    }
}
