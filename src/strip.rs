//! Buffered pixel strip
//!
//! Keeps the pixel colors and the global brightness in memory and pushes a
//! brightness-scaled copy to the [`OutputDriver`] on [`PixelStrip::show`].

use smart_leds::SmartLedsWrite;

use crate::{
    OutputDriver,
    color::{BLACK, Rgb},
    math8::scale8,
};

/// Adapter from any `smart-leds` writer to [`OutputDriver`]
///
/// Hardware write errors are dropped, the render path never reports them.
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Release the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    fn write(&mut self, colors: &[Rgb]) {
        let _ = self.writer.write(colors.iter().copied());
    }
}

/// In-memory LED strip with `N` pixels
pub struct PixelStrip<D: OutputDriver, const N: usize> {
    driver: D,
    pixels: [Rgb; N],
    brightness: u8,
}

impl<D: OutputDriver, const N: usize> PixelStrip<D, N> {
    /// Create a strip with all pixels off and full brightness
    pub const fn new(driver: D) -> Self {
        Self {
            driver,
            pixels: [BLACK; N],
            brightness: 255,
        }
    }

    /// Power up the driver
    pub fn begin(&mut self) {
        self.driver.begin();
    }

    /// Turn every pixel off in the buffer
    pub fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }

    /// Push the buffer, scaled by the current brightness, to the hardware
    pub fn show(&mut self) {
        let mut frame = self.pixels;
        if self.brightness != 255 {
            for pixel in &mut frame {
                pixel.r = scale8(pixel.r, self.brightness);
                pixel.g = scale8(pixel.g, self.brightness);
                pixel.b = scale8(pixel.b, self.brightness);
            }
        }
        self.driver.write(&frame);
    }

    /// Set global brightness, applied on the next [`show`](Self::show)
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Set one pixel. Indices past the end are ignored.
    pub fn set_pixel_color(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    /// Fill `count` pixels starting at `start`, clipped to the strip
    pub fn fill(&mut self, color: Rgb, start: usize, count: usize) {
        let start = start.min(N);
        let end = start.saturating_add(count).min(N);
        self.pixels[start..end].fill(color);
    }

    /// Fill the whole strip
    pub fn fill_all(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    pub const fn num_pixels(&self) -> usize {
        N
    }

    /// Build a color value from its channels
    pub const fn color(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Buffered color of one pixel, `None` past the end
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Buffered (unscaled) colors
    pub const fn pixels(&self) -> &[Rgb; N] {
        &self.pixels
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Release the driver
    pub fn into_driver(self) -> D {
        self.driver
    }
}
