//! Glow and brightness modes
//!
//! Two orthogonal selectors driven by the button. [`ModeCoordinator`] maps
//! them onto the pattern engine, or drives the strip itself for the solid
//! and breathing modes.

mod breathing;
mod coordinator;

use embassy_time::Duration;

pub use breathing::{BreathDirection, BreathingState};
pub use coordinator::ModeCoordinator;

use crate::{color::Rgb, pattern::StrandPattern};

/// Top-level animation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlowMode {
    /// Whole strip in one color
    #[default]
    Solid,
    /// Solid color with oscillating brightness
    Breathing,
    Rainbow,
    TheaterChase,
    TheaterChaseRainbow,
}

impl GlowMode {
    /// Long-press order, wrapping back to the first entry
    pub const ALL: [Self; 5] = [
        Self::Solid,
        Self::Breathing,
        Self::Rainbow,
        Self::TheaterChase,
        Self::TheaterChaseRainbow,
    ];

    /// Position in [`GlowMode::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Solid => 0,
            Self::Breathing => 1,
            Self::Rainbow => 2,
            Self::TheaterChase => 3,
            Self::TheaterChaseRainbow => 4,
        }
    }

    /// The mode selected by the next long press
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Strand pattern backing this mode, `None` for the direct modes
    pub const fn pattern(self) -> Option<StrandPattern> {
        match self {
            Self::Solid | Self::Breathing => None,
            Self::Rainbow => Some(StrandPattern::Rainbow),
            Self::TheaterChase => Some(StrandPattern::TheaterChase),
            Self::TheaterChaseRainbow => Some(StrandPattern::TheaterChaseRainbow),
        }
    }
}

/// Brightness profile selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrightnessMode {
    #[default]
    Bright,
    Dim,
}

impl BrightnessMode {
    /// The other profile
    pub const fn toggled(self) -> Self {
        match self {
            Self::Bright => Self::Dim,
            Self::Dim => Self::Bright,
        }
    }
}

/// Brightness parameters of one [`BrightnessMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessProfile {
    /// Brightness of the solid and pattern modes
    pub base: u8,
    /// Lower breathing bound
    pub min: u8,
    /// Upper breathing bound
    pub max: u8,
    /// Breathing change per step
    pub step: u8,
}

/// Configuration for the mode coordinator
#[derive(Debug, Clone)]
pub struct ModeConfig {
    /// Glow mode at startup
    pub glow: GlowMode,
    /// Brightness mode at startup
    pub brightness: BrightnessMode,
    pub bright: BrightnessProfile,
    pub dim: BrightnessProfile,
    /// Color of the solid and breathing modes
    pub solid_color: Rgb,
    /// Fixed color of the theater chase mode
    pub theater_chase_color: Rgb,
    pub rainbow_wait_ms: i32,
    pub theater_chase_wait_ms: i32,
    pub theater_chase_rainbow_wait_ms: i32,
    /// Time between breathing steps
    pub breathing_interval: Duration,
}

impl ModeConfig {
    pub const DEFAULT: Self = Self {
        glow: GlowMode::Solid,
        brightness: BrightnessMode::Bright,
        bright: BrightnessProfile {
            base: 128,
            min: 24,
            max: 160,
            step: 4,
        },
        dim: BrightnessProfile {
            base: 24,
            min: 4,
            max: 48,
            step: 1,
        },
        solid_color: Rgb {
            r: 255,
            g: 147,
            b: 41,
        },
        theater_chase_color: Rgb {
            r: 127,
            g: 127,
            b: 127,
        },
        rainbow_wait_ms: 10,
        theater_chase_wait_ms: 50,
        theater_chase_rainbow_wait_ms: 50,
        breathing_interval: Duration::from_millis(30),
    };

    /// Profile used by `mode`
    pub const fn profile(&self, mode: BrightnessMode) -> &BrightnessProfile {
        match mode {
            BrightnessMode::Bright => &self.bright,
            BrightnessMode::Dim => &self.dim,
        }
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
