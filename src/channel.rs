//! Button event channel
//!
//! A bounded single-producer/single-consumer queue built on
//! `heapless::spsc::Queue`. Splitting hands out exactly one sender and one
//! receiver; neither side ever blocks or takes a lock.

use heapless::spsc::{Consumer, Producer, Queue};

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Discrete gesture published by the input task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Debounced short click
    SingleClick,
    /// Long press, reported when the button is released
    LongPress,
}

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Fixed-capacity FIFO of [`ButtonEvent`]
///
/// Holds at most `SIZE - 1` events, so `SIZE` must be at least 2.
pub struct ButtonEventChannel<const SIZE: usize> {
    queue: Queue<ButtonEvent, SIZE>,
}

impl<const SIZE: usize> ButtonEventChannel<SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        const { assert!(SIZE >= 2, "channel needs room for at least one event") };
        Self {
            queue: Queue::new(),
        }
    }

    /// Number of events the channel can hold
    pub const fn capacity(&self) -> usize {
        SIZE - 1
    }

    /// Split into the producer and consumer halves
    ///
    /// The mutable borrow guarantees there is only one of each while they live.
    pub fn split(&mut self) -> (ButtonEventSender<'_, SIZE>, ButtonEventReceiver<'_, SIZE>) {
        let (producer, consumer) = self.queue.split();
        (
            ButtonEventSender {
                producer,
                dropped: 0,
            },
            ButtonEventReceiver { consumer },
        )
    }
}

impl<const SIZE: usize> Default for ButtonEventChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer half, owned by the input task
pub struct ButtonEventSender<'a, const SIZE: usize> {
    producer: Producer<'a, ButtonEvent, SIZE>,
    dropped: u32,
}

impl<const SIZE: usize> ButtonEventSender<'_, SIZE> {
    /// Try to send an event into the channel.
    ///
    /// Returns `Err(TrySendError(event))` if the channel is full.
    pub fn try_send(&mut self, event: ButtonEvent) -> Result<(), TrySendError<ButtonEvent>> {
        self.producer.enqueue(event).map_err(TrySendError)
    }

    /// Send an event, dropping it if the channel is full
    ///
    /// Returns `false` when the event was dropped.
    pub fn publish(&mut self, event: ButtonEvent) -> bool {
        match self.try_send(event) {
            Ok(()) => true,
            Err(TrySendError(_event)) => {
                self.dropped = self.dropped.wrapping_add(1);
                #[cfg(feature = "esp32-log")]
                println!(
                    "[ButtonEventSender.publish] queue full, dropped {:?} (total {})",
                    _event, self.dropped
                );
                false
            }
        }
    }

    /// Number of events dropped because the channel was full
    pub const fn dropped(&self) -> u32 {
        self.dropped
    }
}

/// Consumer half, owned by the render task
pub struct ButtonEventReceiver<'a, const SIZE: usize> {
    consumer: Consumer<'a, ButtonEvent, SIZE>,
}

impl<'a, const SIZE: usize> ButtonEventReceiver<'a, SIZE> {
    /// Try to receive an event from the channel.
    ///
    /// Returns `Err(TryReceiveError)` if the channel is empty.
    pub fn try_receive(&mut self) -> Result<ButtonEvent, TryReceiveError> {
        self.consumer.dequeue().ok_or(TryReceiveError)
    }

    /// Number of events waiting
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the events queued at the time of the call, oldest first
    ///
    /// Events published while draining are left for the next drain.
    pub fn drain(&mut self) -> Drain<'_, 'a, SIZE> {
        let remaining = self.len();
        Drain {
            receiver: self,
            remaining,
        }
    }
}

/// Iterator returned by [`ButtonEventReceiver::drain`]
pub struct Drain<'r, 'a, const SIZE: usize> {
    receiver: &'r mut ButtonEventReceiver<'a, SIZE>,
    remaining: usize,
}

impl<const SIZE: usize> Iterator for Drain<'_, '_, SIZE> {
    type Item = ButtonEvent;

    fn next(&mut self) -> Option<ButtonEvent> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.receiver.try_receive().ok()
    }
}
