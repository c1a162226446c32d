//! Strand patterns
//!
//! Four non-blocking animations rendered one step at a time by
//! [`PatternEngine`], plus the fixed table the engine auto-cycles through.

mod engine;
mod progress;

use embassy_time::Duration;

pub use engine::PatternEngine;
pub use progress::PatternProgress;

use crate::color::Rgb;

/// Pixels between lit dots in the theater chase patterns
pub(crate) const THEATER_CHASE_STRIDE: usize = 3;

/// Full offset wraps before a theater chase counts as complete
pub(crate) const THEATER_CHASE_LOOP_TARGET: u32 = 10;

/// Animation rendered by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrandPattern {
    /// Light one pixel after another with the primary color
    #[default]
    ColorWipe,
    /// Every third pixel lit with the primary color, marching along
    TheaterChase,
    /// Hue wheel spread over the strip and rotating
    Rainbow,
    /// Theater chase with rainbow colored dots
    TheaterChaseRainbow,
}

impl StrandPattern {
    /// Whether the pattern draws with the primary color
    pub const fn uses_primary_color(self) -> bool {
        matches!(self, Self::ColorWipe | Self::TheaterChase)
    }
}

/// One step of the auto-cycle sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleEntry {
    pub pattern: StrandPattern,
    /// Primary color, ignored by the rainbow patterns
    pub color: Rgb,
}

impl CycleEntry {
    const fn new(pattern: StrandPattern, r: u8, g: u8, b: u8) -> Self {
        Self {
            pattern,
            color: Rgb { r, g, b },
        }
    }
}

/// Auto-cycle sequence, visited in order and wrapping around
pub const DEFAULT_CYCLE: [CycleEntry; 8] = [
    CycleEntry::new(StrandPattern::ColorWipe, 255, 0, 0),
    CycleEntry::new(StrandPattern::ColorWipe, 0, 255, 0),
    CycleEntry::new(StrandPattern::ColorWipe, 0, 0, 255),
    CycleEntry::new(StrandPattern::TheaterChase, 127, 127, 127),
    CycleEntry::new(StrandPattern::TheaterChase, 127, 0, 0),
    CycleEntry::new(StrandPattern::TheaterChase, 0, 0, 127),
    CycleEntry::new(StrandPattern::Rainbow, 0, 0, 0),
    CycleEntry::new(StrandPattern::TheaterChaseRainbow, 0, 0, 0),
];

/// Delay between render steps, per pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternWaits {
    pub color_wipe: Duration,
    pub theater_chase: Duration,
    pub rainbow: Duration,
    pub theater_chase_rainbow: Duration,
}

impl PatternWaits {
    pub const DEFAULT: Self = Self {
        color_wipe: Duration::from_millis(50),
        theater_chase: Duration::from_millis(50),
        rainbow: Duration::from_millis(10),
        theater_chase_rainbow: Duration::from_millis(50),
    };

    /// Wait used by `pattern`
    pub const fn for_pattern(&self, pattern: StrandPattern) -> Duration {
        match pattern {
            StrandPattern::ColorWipe => self.color_wipe,
            StrandPattern::TheaterChase => self.theater_chase,
            StrandPattern::Rainbow => self.rainbow,
            StrandPattern::TheaterChaseRainbow => self.theater_chase_rainbow,
        }
    }
}

impl Default for PatternWaits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the pattern engine
#[derive(Debug, Clone)]
pub struct PatternEngineConfig {
    /// Pattern used when auto-cycle is off
    pub pattern: StrandPattern,
    /// Primary color used when auto-cycle is off
    pub color: Rgb,
    pub waits: PatternWaits,
    /// Longest time a pattern stays on screen while auto-cycling
    pub pattern_interval: Duration,
    /// Brightness applied by `begin`
    pub brightness: u8,
    pub auto_cycle: bool,
}

impl PatternEngineConfig {
    pub const DEFAULT: Self = Self {
        pattern: StrandPattern::ColorWipe,
        color: Rgb { r: 255, g: 0, b: 0 },
        waits: PatternWaits::DEFAULT,
        pattern_interval: Duration::from_millis(5000),
        brightness: 50,
        auto_cycle: true,
    };
}

impl Default for PatternEngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Convert a wait in milliseconds, negative values clamp to zero
pub(crate) fn wait_from_millis(wait_ms: i32) -> Duration {
    Duration::from_millis(u64::try_from(wait_ms).unwrap_or(0))
}
