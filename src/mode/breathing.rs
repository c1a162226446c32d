use embassy_time::Instant;

use super::BrightnessProfile;

/// Direction of the breathing ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathDirection {
    Rising,
    Falling,
}

/// Brightness oscillation between a profile's `min` and `max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingState {
    brightness: u8,
    direction: BreathDirection,
    last_update: Instant,
}

impl BreathingState {
    /// Start at the top of the profile, heading down
    pub const fn start(profile: &BrightnessProfile, now: Instant) -> Self {
        Self {
            brightness: profile.max,
            direction: BreathDirection::Falling,
            last_update: now,
        }
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn direction(&self) -> BreathDirection {
        self.direction
    }

    pub const fn last_update(&self) -> Instant {
        self.last_update
    }

    /// Move one step toward the current bound
    ///
    /// Lands exactly on `min`/`max` and turns around there.
    pub fn step(&mut self, profile: &BrightnessProfile, now: Instant) {
        self.last_update = now;
        match self.direction {
            BreathDirection::Falling => {
                let next = self.brightness.saturating_sub(profile.step);
                if next <= profile.min {
                    self.brightness = profile.min;
                    self.direction = BreathDirection::Rising;
                } else {
                    self.brightness = next;
                }
            }
            BreathDirection::Rising => {
                let next = self.brightness.saturating_add(profile.step);
                if next >= profile.max {
                    self.brightness = profile.max;
                    self.direction = BreathDirection::Falling;
                } else {
                    self.brightness = next;
                }
            }
        }
    }
}
