#![allow(dead_code)]

use std::collections::VecDeque;

use myrtio_glow::{ButtonDebouncer, ButtonHandler, Duration, Instant, OutputDriver, Rgb};

/// Driver that keeps every frame written to it
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub begun: bool,
    pub frames: Vec<Vec<Rgb>>,
}

impl RecordingDriver {
    pub fn writes(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame(&self) -> &[Rgb] {
        self.frames.last().map_or(&[], Vec::as_slice)
    }
}

impl OutputDriver for RecordingDriver {
    fn begin(&mut self) {
        self.begun = true;
    }

    fn write(&mut self, colors: &[Rgb]) {
        self.frames.push(colors.to_vec());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Click,
    LongPress,
}

/// Debouncer replaying gestures at fixed times
#[derive(Debug, Default)]
pub struct ScriptedButton {
    script: VecDeque<(u64, Gesture)>,
    pub long_press_interval: Option<Duration>,
}

impl ScriptedButton {
    pub fn new(script: &[(u64, Gesture)]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            long_press_interval: None,
        }
    }
}

impl ButtonDebouncer for ScriptedButton {
    fn tick<H: ButtonHandler>(&mut self, now: Instant, handler: &mut H) {
        while let Some(&(at_ms, gesture)) = self.script.front() {
            if at_ms > now.as_millis() {
                break;
            }
            self.script.pop_front();
            match gesture {
                Gesture::Click => handler.on_click(),
                Gesture::LongPress => handler.on_long_press_stop(),
            }
        }
    }

    fn set_long_press_interval(&mut self, interval: Duration) {
        self.long_press_interval = Some(interval);
    }
}
