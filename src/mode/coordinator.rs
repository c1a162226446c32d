use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    OutputDriver,
    channel::ButtonEvent,
    pattern::{PatternEngine, StrandPattern},
};

use super::{BreathingState, BrightnessMode, GlowMode, ModeConfig};

/// Mode coordinator - arbitrates between button input and the renderers
///
/// Button events only touch the requested modes. Once per [`tick`](Self::tick)
/// the requested values are compared with the applied ones and any change is
/// applied before rendering.
pub struct ModeCoordinator<D: OutputDriver, const N: usize> {
    engine: PatternEngine<D, N>,
    config: ModeConfig,

    requested_brightness: BrightnessMode,
    applied_brightness: BrightnessMode,
    requested_glow: GlowMode,
    applied_glow: GlowMode,

    breathing: BreathingState,
    /// Solid frame must be rendered on the next tick
    solid_refresh: bool,
    /// Brightness mode the solid frame was last synced for
    solid_synced: Option<BrightnessMode>,
}

impl<D: OutputDriver, const N: usize> ModeCoordinator<D, N> {
    pub fn new(engine: PatternEngine<D, N>, config: ModeConfig) -> Self {
        let breathing = BreathingState::start(
            config.profile(config.brightness),
            Instant::from_millis(0),
        );
        Self {
            engine,
            requested_brightness: config.brightness,
            applied_brightness: config.brightness,
            requested_glow: config.glow,
            applied_glow: config.glow,
            breathing,
            solid_refresh: false,
            solid_synced: None,
            config,
        }
    }

    /// Start the engine and apply the startup modes
    pub fn begin(&mut self, now: Instant) {
        self.engine.begin(now);
        self.configure_for_mode(self.applied_glow, now);
    }

    /// Record a button event as a requested mode change
    pub fn handle_event(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::SingleClick => {
                self.requested_brightness = self.requested_brightness.toggled();
            }
            ButtonEvent::LongPress => {
                self.requested_glow = self.requested_glow.next();
            }
        }
    }

    /// Apply pending mode changes, then run the active renderer
    pub fn tick(&mut self, now: Instant) {
        let brightness_changed = self.requested_brightness != self.applied_brightness;
        self.applied_brightness = self.requested_brightness;

        if self.requested_glow != self.applied_glow {
            self.applied_glow = self.requested_glow;
            #[cfg(feature = "esp32-log")]
            println!("[ModeCoordinator.tick] glow mode -> {:?}", self.applied_glow);
            // Reconfiguring also syncs the new brightness
            self.configure_for_mode(self.applied_glow, now);
        } else if brightness_changed {
            #[cfg(feature = "esp32-log")]
            println!(
                "[ModeCoordinator.tick] brightness mode -> {:?}",
                self.applied_brightness
            );
            self.sync_brightness(self.applied_brightness, self.applied_glow, now);
        }

        match self.applied_glow {
            GlowMode::Solid => self.render_solid(),
            GlowMode::Breathing => self.update_breathing(now),
            GlowMode::Rainbow | GlowMode::TheaterChase | GlowMode::TheaterChaseRainbow => {
                self.engine.update(now);
            }
        }
    }

    /// Apply the brightness of `brightness_mode` the way `glow_mode` needs it
    ///
    /// Solid only marks a refresh when the brightness mode actually changed
    /// since the last sync. Breathing restarts its ramp from the profile max.
    pub fn sync_brightness(
        &mut self,
        brightness_mode: BrightnessMode,
        glow_mode: GlowMode,
        now: Instant,
    ) {
        let profile = *self.config.profile(brightness_mode);
        match glow_mode {
            GlowMode::Solid => {
                if self.solid_synced == Some(brightness_mode) {
                    return;
                }
                self.solid_synced = Some(brightness_mode);
                self.engine.set_brightness(profile.base);
                self.solid_refresh = true;
            }
            GlowMode::Breathing => {
                self.breathing = BreathingState::start(&profile, now);
                let color = self.config.solid_color;
                let strip = self.engine.strip_mut();
                strip.set_brightness(self.breathing.brightness());
                strip.fill_all(color);
                strip.show();
            }
            GlowMode::Rainbow | GlowMode::TheaterChase | GlowMode::TheaterChaseRainbow => {
                self.engine.set_brightness(profile.base);
            }
        }
    }

    /// Advance the breathing ramp when its cadence is due
    pub fn update_breathing(&mut self, now: Instant) {
        if self.applied_glow != GlowMode::Breathing {
            return;
        }
        if now.saturating_duration_since(self.breathing.last_update())
            < self.config.breathing_interval
        {
            return;
        }

        let profile = *self.config.profile(self.applied_brightness);
        self.breathing.step(&profile, now);

        let color = self.config.solid_color;
        let strip = self.engine.strip_mut();
        strip.set_brightness(self.breathing.brightness());
        strip.fill_all(color);
        strip.show();
    }

    pub const fn requested_glow(&self) -> GlowMode {
        self.requested_glow
    }

    pub const fn applied_glow(&self) -> GlowMode {
        self.applied_glow
    }

    pub const fn requested_brightness(&self) -> BrightnessMode {
        self.requested_brightness
    }

    pub const fn applied_brightness(&self) -> BrightnessMode {
        self.applied_brightness
    }

    pub const fn breathing(&self) -> &BreathingState {
        &self.breathing
    }

    pub const fn config(&self) -> &ModeConfig {
        &self.config
    }

    pub const fn engine(&self) -> &PatternEngine<D, N> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PatternEngine<D, N> {
        &mut self.engine
    }

    fn configure_for_mode(&mut self, glow: GlowMode, now: Instant) {
        self.engine.set_auto_cycle(false, now);
        self.solid_synced = None;
        self.solid_refresh = false;

        match glow {
            GlowMode::Rainbow => {
                self.engine.strip_mut().clear();
                self.engine.set_rainbow_wait(self.config.rainbow_wait_ms);
                self.engine.set_pattern(StrandPattern::Rainbow, now);
            }
            GlowMode::TheaterChase => {
                self.engine.strip_mut().clear();
                self.engine
                    .set_theater_chase_wait(self.config.theater_chase_wait_ms);
                self.engine.set_pattern_with_color(
                    StrandPattern::TheaterChase,
                    self.config.theater_chase_color,
                    now,
                );
            }
            GlowMode::TheaterChaseRainbow => {
                // The step only touches its own dots, drop the previous mode's frame
                self.engine.strip_mut().clear();
                self.engine
                    .set_theater_chase_rainbow_wait(self.config.theater_chase_rainbow_wait_ms);
                self.engine
                    .set_pattern(StrandPattern::TheaterChaseRainbow, now);
            }
            GlowMode::Solid | GlowMode::Breathing => {
                // The engine stays idle, the strip is driven from here
                self.engine.strip_mut().fill_all(self.config.solid_color);
            }
        }

        self.sync_brightness(self.applied_brightness, glow, now);
    }

    fn render_solid(&mut self) {
        if !self.solid_refresh {
            return;
        }
        self.solid_refresh = false;
        let color = self.config.solid_color;
        let strip = self.engine.strip_mut();
        strip.fill_all(color);
        strip.show();
    }
}
