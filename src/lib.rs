#![no_std]

pub mod channel;
pub mod color;
pub mod math8;
pub mod mode;
pub mod pattern;
pub mod strip;
pub mod task;

pub use channel::{
    ButtonEvent, ButtonEventChannel, ButtonEventReceiver, ButtonEventSender, TryReceiveError,
    TrySendError,
};
pub use color::{Rgb, rgb_from_u32, rgb_to_u32, wheel};
pub use mode::{
    BreathDirection, BreathingState, BrightnessMode, BrightnessProfile, GlowMode, ModeConfig,
    ModeCoordinator,
};
pub use pattern::{
    CycleEntry, DEFAULT_CYCLE, PatternEngine, PatternEngineConfig, PatternProgress, PatternWaits,
    StrandPattern,
};
pub use strip::{PixelStrip, SmartLedsOutput};
pub use task::{ButtonDebouncer, ButtonHandler, InputTask, RenderTask, TaskConfig};

pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The pixel strip is generic over this trait.
pub trait OutputDriver {
    /// Power up and initialize the strip hardware
    fn begin(&mut self) {}

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
