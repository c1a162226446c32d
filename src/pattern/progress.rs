//! Per-pattern progress counters and single-step renderers

use crate::{
    OutputDriver,
    color::{BLACK, Rgb, wheel},
    strip::PixelStrip,
};

use super::{THEATER_CHASE_LOOP_TARGET, THEATER_CHASE_STRIDE};

/// Length of the hue cycle driven by `pixel_cycle`
const PIXEL_CYCLE_LEN: u16 = 256;

/// Progress of the active pattern
///
/// Every counter stays inside its range after each step:
/// `color_wipe_position < N`, `theater_chase_offset < 3`, `pixel_queue < 3`
/// and `pixel_cycle < 256`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternProgress {
    color_wipe_position: usize,
    theater_chase_offset: usize,
    theater_chase_loops: u32,
    pixel_queue: usize,
    pixel_cycle: u16,
}

impl PatternProgress {
    pub const fn new() -> Self {
        Self {
            color_wipe_position: 0,
            theater_chase_offset: 0,
            theater_chase_loops: 0,
            pixel_queue: 0,
            pixel_cycle: 0,
        }
    }

    /// Next pixel the color wipe will light
    pub const fn color_wipe_position(&self) -> usize {
        self.color_wipe_position
    }

    /// First lit pixel of the theater chase
    pub const fn theater_chase_offset(&self) -> usize {
        self.theater_chase_offset
    }

    /// Full offset wraps completed by the theater chase
    pub const fn theater_chase_loops(&self) -> u32 {
        self.theater_chase_loops
    }

    /// First lit pixel of the theater chase rainbow
    pub const fn pixel_queue(&self) -> usize {
        self.pixel_queue
    }

    /// Hue offset of the rainbow patterns
    pub const fn pixel_cycle(&self) -> u16 {
        self.pixel_cycle
    }

    /// Light the next pixel. Returns `true` once the whole strip is lit.
    pub(crate) fn color_wipe<D: OutputDriver, const N: usize>(
        &mut self,
        strip: &mut PixelStrip<D, N>,
        color: Rgb,
    ) -> bool {
        strip.set_pixel_color(self.color_wipe_position, color);
        strip.show();

        self.color_wipe_position += 1;
        if self.color_wipe_position >= N {
            self.color_wipe_position = 0;
            return true;
        }
        false
    }

    /// Draw one chase frame. Returns `true` after the last loop.
    pub(crate) fn theater_chase<D: OutputDriver, const N: usize>(
        &mut self,
        strip: &mut PixelStrip<D, N>,
        color: Rgb,
    ) -> bool {
        strip.clear();
        for index in (self.theater_chase_offset..N).step_by(THEATER_CHASE_STRIDE) {
            strip.set_pixel_color(index, color);
        }
        strip.show();

        self.theater_chase_offset += 1;
        if self.theater_chase_offset >= THEATER_CHASE_STRIDE {
            self.theater_chase_offset = 0;
            self.theater_chase_loops += 1;
        }

        if self.theater_chase_loops >= THEATER_CHASE_LOOP_TARGET {
            self.theater_chase_offset = 0;
            self.theater_chase_loops = 0;
            return true;
        }
        false
    }

    /// Spread the wheel over the strip, shifted by one hue step per frame
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn rainbow<D: OutputDriver, const N: usize>(
        &mut self,
        strip: &mut PixelStrip<D, N>,
    ) {
        for index in 0..N {
            let position = (index + usize::from(self.pixel_cycle)) & 255;
            strip.set_pixel_color(index, wheel(position as u8));
        }
        strip.show();

        self.advance_pixel_cycle();
    }

    /// Show one frame of rainbow dots, then blank them in the buffer
    ///
    /// The shown frame keeps the dots. Blanking lands before the next frame,
    /// which gives the chase its flicker.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn theater_chase_rainbow<D: OutputDriver, const N: usize>(
        &mut self,
        strip: &mut PixelStrip<D, N>,
    ) {
        for base in (0..N).step_by(THEATER_CHASE_STRIDE) {
            let position = (base + usize::from(self.pixel_cycle)) % 255;
            strip.set_pixel_color(base + self.pixel_queue, wheel(position as u8));
        }
        strip.show();
        for base in (0..N).step_by(THEATER_CHASE_STRIDE) {
            strip.set_pixel_color(base + self.pixel_queue, BLACK);
        }

        self.pixel_queue += 1;
        if self.pixel_queue >= THEATER_CHASE_STRIDE {
            self.pixel_queue = 0;
        }
        self.advance_pixel_cycle();
    }

    fn advance_pixel_cycle(&mut self) {
        self.pixel_cycle += 1;
        if self.pixel_cycle >= PIXEL_CYCLE_LEN {
            self.pixel_cycle = 0;
        }
    }
}
