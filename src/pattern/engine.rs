use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{OutputDriver, color::Rgb, strip::PixelStrip};

use super::{
    CycleEntry, DEFAULT_CYCLE, PatternEngineConfig, PatternProgress, PatternWaits, StrandPattern,
    wait_from_millis,
};

/// Pattern engine - renders strand patterns without blocking
///
/// Call [`update`](Self::update) at least as often as the fastest configured
/// wait. Each call does at most one auto-cycle switch and one render step.
pub struct PatternEngine<D: OutputDriver, const N: usize> {
    strip: PixelStrip<D, N>,
    /// Brightness applied by `begin`
    default_brightness: u8,

    // Active pattern
    pattern: StrandPattern,
    primary_color: Rgb,
    waits: PatternWaits,
    pattern_complete: bool,
    force_refresh: bool,
    progress: PatternProgress,

    // Render gate
    pixel_interval: Duration,
    pixel_previous: Instant,

    // Auto-cycle
    auto_cycle: bool,
    cycle_index: usize,
    pattern_interval: Duration,
    pattern_previous: Instant,
}

impl<D: OutputDriver, const N: usize> PatternEngine<D, N> {
    pub fn new(driver: D, config: &PatternEngineConfig) -> Self {
        Self {
            strip: PixelStrip::new(driver),
            default_brightness: config.brightness,
            pattern: config.pattern,
            primary_color: config.color,
            waits: config.waits,
            pattern_complete: false,
            force_refresh: true,
            progress: PatternProgress::new(),
            pixel_interval: config.waits.color_wipe,
            pixel_previous: Instant::from_millis(0),
            auto_cycle: config.auto_cycle,
            cycle_index: 0,
            pattern_interval: config.pattern_interval,
            pattern_previous: Instant::from_millis(0),
        }
    }

    /// Bring up the strip and start the first pattern
    pub fn begin(&mut self, now: Instant) {
        self.strip.begin();
        self.strip.clear();
        self.strip.set_brightness(self.default_brightness);
        self.strip.show();

        if self.auto_cycle {
            self.apply_cycle_entry(self.cycle_index, now);
        } else {
            self.apply_pattern(self.pattern, now);
        }
    }

    /// Advance auto-cycle and render one step when their gates are open
    pub fn update(&mut self, now: Instant) {
        self.handle_auto_cycle(now);

        if self.force_refresh
            || now.saturating_duration_since(self.pixel_previous) >= self.pixel_interval
        {
            self.pixel_previous = now;
            self.force_refresh = false;
            self.render_step();
        }
    }

    /// Enable or disable auto-cycling
    ///
    /// Enabling restarts the cycle at its first entry, disabling freezes on
    /// the current pattern.
    pub fn set_auto_cycle(&mut self, enabled: bool, now: Instant) {
        if self.auto_cycle == enabled {
            return;
        }
        self.auto_cycle = enabled;
        self.pattern_previous = now;
        if enabled {
            self.cycle_index = 0;
            self.apply_cycle_entry(self.cycle_index, now);
        } else {
            self.apply_pattern(self.pattern, now);
        }
    }

    /// Switch to a pattern, restarting its progress
    pub fn set_pattern(&mut self, pattern: StrandPattern, now: Instant) {
        self.apply_pattern(pattern, now);
    }

    /// Switch to a pattern drawn with `color`
    pub fn set_pattern_with_color(&mut self, pattern: StrandPattern, color: Rgb, now: Instant) {
        self.primary_color = color;
        self.apply_pattern(pattern, now);
    }

    /// Change the primary color, restarting the active pattern
    pub fn set_primary_color(&mut self, color: Rgb) {
        self.primary_color = color;
        self.reset_pattern_state();
    }

    /// Set how long a pattern may run while auto-cycling
    pub fn set_pattern_interval(&mut self, interval_ms: i32, now: Instant) {
        self.pattern_interval = wait_from_millis(interval_ms);
        self.pattern_previous = now;
    }

    pub fn set_color_wipe_wait(&mut self, wait_ms: i32) {
        self.waits.color_wipe = wait_from_millis(wait_ms);
        self.reset_if_active(StrandPattern::ColorWipe);
    }

    pub fn set_theater_chase_wait(&mut self, wait_ms: i32) {
        self.waits.theater_chase = wait_from_millis(wait_ms);
        self.reset_if_active(StrandPattern::TheaterChase);
    }

    pub fn set_rainbow_wait(&mut self, wait_ms: i32) {
        self.waits.rainbow = wait_from_millis(wait_ms);
        self.reset_if_active(StrandPattern::Rainbow);
    }

    pub fn set_theater_chase_rainbow_wait(&mut self, wait_ms: i32) {
        self.waits.theater_chase_rainbow = wait_from_millis(wait_ms);
        self.reset_if_active(StrandPattern::TheaterChaseRainbow);
    }

    /// Write brightness through to the strip and show it right away
    pub fn set_brightness(&mut self, brightness: u8) {
        self.strip.set_brightness(brightness);
        self.strip.show();
    }

    pub const fn pattern(&self) -> StrandPattern {
        self.pattern
    }

    pub const fn primary_color(&self) -> Rgb {
        self.primary_color
    }

    /// Brightness the strip currently runs at, including any level set
    /// directly on the strip
    pub const fn brightness(&self) -> u8 {
        self.strip.brightness()
    }

    pub const fn waits(&self) -> &PatternWaits {
        &self.waits
    }

    pub const fn is_auto_cycle(&self) -> bool {
        self.auto_cycle
    }

    /// Index of the current entry in the auto-cycle table
    pub const fn cycle_index(&self) -> usize {
        self.cycle_index
    }

    /// Whether a self-terminating pattern finished its cycle
    pub const fn is_pattern_complete(&self) -> bool {
        self.pattern_complete
    }

    /// Whether the next update renders regardless of the render gate
    pub const fn is_refresh_forced(&self) -> bool {
        self.force_refresh
    }

    /// Render gate interval, updated by each render step
    pub const fn pixel_interval(&self) -> Duration {
        self.pixel_interval
    }

    pub const fn progress(&self) -> &PatternProgress {
        &self.progress
    }

    pub const fn strip(&self) -> &PixelStrip<D, N> {
        &self.strip
    }

    /// Direct strip access for renderers that bypass the patterns
    pub fn strip_mut(&mut self) -> &mut PixelStrip<D, N> {
        &mut self.strip
    }

    fn render_step(&mut self) {
        self.pixel_interval = self.waits.for_pattern(self.pattern);
        match self.pattern {
            StrandPattern::ColorWipe => {
                if self.progress.color_wipe(&mut self.strip, self.primary_color) {
                    self.pattern_complete = true;
                }
            }
            StrandPattern::TheaterChase => {
                if self.progress.theater_chase(&mut self.strip, self.primary_color) {
                    self.pattern_complete = true;
                }
            }
            StrandPattern::Rainbow => self.progress.rainbow(&mut self.strip),
            StrandPattern::TheaterChaseRainbow => {
                self.progress.theater_chase_rainbow(&mut self.strip);
            }
        }
    }

    fn handle_auto_cycle(&mut self, now: Instant) {
        if !self.auto_cycle {
            return;
        }
        if self.pattern_complete
            || now.saturating_duration_since(self.pattern_previous) >= self.pattern_interval
        {
            self.cycle_index = (self.cycle_index + 1) % DEFAULT_CYCLE.len();
            #[cfg(feature = "esp32-log")]
            println!(
                "[PatternEngine.handle_auto_cycle] advancing to entry {}",
                self.cycle_index
            );
            self.apply_cycle_entry(self.cycle_index, now);
        }
    }

    fn apply_cycle_entry(&mut self, index: usize, now: Instant) {
        let index = if index < DEFAULT_CYCLE.len() { index } else { 0 };
        let CycleEntry { pattern, color } = DEFAULT_CYCLE[index];
        if pattern.uses_primary_color() {
            self.primary_color = color;
        }
        self.apply_pattern(pattern, now);
    }

    fn apply_pattern(&mut self, pattern: StrandPattern, now: Instant) {
        self.pattern = pattern;
        self.pattern_previous = now;
        self.reset_pattern_state();
    }

    fn reset_if_active(&mut self, pattern: StrandPattern) {
        if self.pattern == pattern {
            self.reset_pattern_state();
        }
    }

    fn reset_pattern_state(&mut self) {
        self.pattern_complete = false;
        self.force_refresh = true;
        self.progress = PatternProgress::new();
    }
}
