//! Display geometry and game settings
//!
//! Loaded once at startup and validated before the game enters setup.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Narrowest display that still fits the setup and game-over text
pub const MIN_TEXT_COLUMNS: u8 = 10;

/// Known character LCD modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LcdPreset {
    #[default]
    Lcd16x2,
    Lcd20x4,
}

impl LcdPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            LcdPreset::Lcd16x2 => "16x2",
            LcdPreset::Lcd20x4 => "20x4",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "16x2" | "small" => Some(LcdPreset::Lcd16x2),
            "20x4" | "big" => Some(LcdPreset::Lcd20x4),
            _ => None,
        }
    }

    pub fn geometry(&self) -> DisplayGeometry {
        match self {
            LcdPreset::Lcd16x2 => DisplayGeometry::new(16, 2),
            LcdPreset::Lcd20x4 => DisplayGeometry::new(20, 4),
        }
    }
}

/// Size of the character grid, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    pub width: u8,
    pub height: u8,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        LcdPreset::default().geometry()
    }
}

impl DisplayGeometry {
    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn x_min(&self) -> i32 {
        0
    }

    #[inline]
    pub fn x_max(&self) -> i32 {
        self.width as i32 - 1
    }

    #[inline]
    pub fn y_min(&self) -> i32 {
        0
    }

    #[inline]
    pub fn y_max(&self) -> i32 {
        self.height as i32 - 1
    }

    /// True if the cell is on screen
    pub fn contains(&self, pos: IVec2) -> bool {
        (self.x_min()..=self.x_max()).contains(&pos.x)
            && (self.y_min()..=self.y_max()).contains(&pos.y)
    }

    /// Clamp a cell onto the screen
    pub fn clamp(&self, pos: IVec2) -> IVec2 {
        IVec2::new(
            pos.x.clamp(self.x_min(), self.x_max()),
            pos.y.clamp(self.y_min(), self.y_max()),
        )
    }

    /// Top-left cell for a centered line of text
    pub fn text_anchor(&self) -> IVec2 {
        IVec2::new(
            (self.width.saturating_sub(MIN_TEXT_COLUMNS) / 2) as i32,
            (self.height.saturating_sub(1) / 2) as i32,
        )
    }

    /// Where a fresh run puts the player
    pub fn player_start(&self) -> IVec2 {
        IVec2::new(self.width as i32 / 2, self.height as i32 / 2)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyDisplay {
                width: self.width,
                height: self.height,
            });
        }
        if self.width < MIN_TEXT_COLUMNS {
            return Err(ConfigError::DisplayTooNarrow {
                width: self.width,
                min: MIN_TEXT_COLUMNS,
            });
        }
        Ok(())
    }
}

/// Everything the game needs to know before it starts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub geometry: DisplayGeometry,
    pub tuning: Tuning,
}

impl Settings {
    /// Settings for a known LCD with default tuning
    pub fn from_preset(preset: LcdPreset) -> Self {
        Self {
            geometry: preset.geometry(),
            tuning: Tuning::default(),
        }
    }

    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        self.tuning.validate()
    }
}
