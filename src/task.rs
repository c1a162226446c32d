//! Input and render tasks
//!
//! The two run loops of the device. They share nothing but the button event
//! channel: the input task owns the sender, the render task owns the receiver
//! and is the only writer of the strip. Both loops yield for a fixed period
//! between iterations and never wait on each other.
//!
//! # Usage
//!
//! ```ignore
//! let (sender, receiver) = CHANNEL.split();
//! let input = InputTask::new(button, sender, &TaskConfig::DEFAULT);
//! let render = RenderTask::new(coordinator, receiver, &TaskConfig::DEFAULT);
//!
//! join(input.run(), render.run()).await;
//! ```

use embassy_time::{Duration, Instant, Timer};

use crate::{
    OutputDriver,
    channel::{ButtonEvent, ButtonEventReceiver, ButtonEventSender},
    mode::ModeCoordinator,
};

/// Receives classified gestures from a [`ButtonDebouncer`]
pub trait ButtonHandler {
    /// Debounced single click
    fn on_click(&mut self);

    /// Long press ended by releasing the button
    fn on_long_press_stop(&mut self);
}

/// Debounces a button and classifies clicks and long presses
pub trait ButtonDebouncer {
    /// Sample the button and report finished gestures to `handler`
    ///
    /// Must be called on every input task iteration.
    fn tick<H: ButtonHandler>(&mut self, now: Instant, handler: &mut H);

    /// Hold time after which a press counts as long
    fn set_long_press_interval(&mut self, interval: Duration);
}

impl<const SIZE: usize> ButtonHandler for ButtonEventSender<'_, SIZE> {
    fn on_click(&mut self) {
        self.publish(ButtonEvent::SingleClick);
    }

    fn on_long_press_stop(&mut self) {
        self.publish(ButtonEvent::LongPress);
    }
}

/// Timing of the two task loops
#[derive(Debug, Clone)]
pub struct TaskConfig {
    /// Yield between button polls
    pub input_period: Duration,
    /// Yield between render ticks
    pub render_period: Duration,
    pub long_press_interval: Duration,
}

impl TaskConfig {
    pub const DEFAULT: Self = Self {
        input_period: Duration::from_millis(5),
        render_period: Duration::from_millis(10),
        long_press_interval: Duration::from_millis(800),
    };
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Polls the button and publishes its gestures
pub struct InputTask<'a, B: ButtonDebouncer, const SIZE: usize> {
    button: B,
    sender: ButtonEventSender<'a, SIZE>,
    period: Duration,
}

impl<'a, B: ButtonDebouncer, const SIZE: usize> InputTask<'a, B, SIZE> {
    pub fn new(mut button: B, sender: ButtonEventSender<'a, SIZE>, config: &TaskConfig) -> Self {
        button.set_long_press_interval(config.long_press_interval);
        Self {
            button,
            sender,
            period: config.input_period,
        }
    }

    /// Run one iteration and return how long to yield before the next
    pub fn tick(&mut self, now: Instant) -> Duration {
        self.button.tick(now, &mut self.sender);
        self.period
    }

    pub const fn button(&self) -> &B {
        &self.button
    }

    /// Events dropped because the render task fell behind
    pub const fn dropped_events(&self) -> u32 {
        self.sender.dropped()
    }

    /// Poll forever, yielding `input_period` between iterations
    pub async fn run(mut self) {
        loop {
            let pause = self.tick(Instant::now());
            Timer::after(pause).await;
        }
    }
}

/// Applies button events and renders the strip
pub struct RenderTask<'a, D: OutputDriver, const N: usize, const SIZE: usize> {
    coordinator: ModeCoordinator<D, N>,
    receiver: ButtonEventReceiver<'a, SIZE>,
    period: Duration,
}

impl<'a, D: OutputDriver, const N: usize, const SIZE: usize> RenderTask<'a, D, N, SIZE> {
    pub fn new(
        coordinator: ModeCoordinator<D, N>,
        receiver: ButtonEventReceiver<'a, SIZE>,
        config: &TaskConfig,
    ) -> Self {
        Self {
            coordinator,
            receiver,
            period: config.render_period,
        }
    }

    /// Bring up the strip and the startup modes
    pub fn begin(&mut self, now: Instant) {
        self.coordinator.begin(now);
    }

    /// Drain queued events in order, then render one tick
    pub fn tick(&mut self, now: Instant) -> Duration {
        for event in self.receiver.drain() {
            self.coordinator.handle_event(event);
        }
        self.coordinator.tick(now);
        self.period
    }

    /// Begin, then render forever, yielding `render_period` between ticks
    pub async fn run(mut self) {
        self.begin(Instant::now());
        loop {
            let pause = self.tick(Instant::now());
            Timer::after(pause).await;
        }
    }

    pub const fn coordinator(&self) -> &ModeCoordinator<D, N> {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut ModeCoordinator<D, N> {
        &mut self.coordinator
    }
}
