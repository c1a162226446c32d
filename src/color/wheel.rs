use crate::color::Rgb;

/// Width of one hue band on the wheel
const BAND: u8 = 85;

/// Map a byte onto a hue cycle
///
/// The input is split into three 85-wide bands. Within a band one channel
/// ramps up by 3 per step while another ramps down, so `0`, `85` and `170`
/// land on pure red, green and blue.
pub const fn wheel(position: u8) -> Rgb {
    let mut position = 255 - position;
    if position < BAND {
        return Rgb {
            r: 255 - position * 3,
            g: 0,
            b: position * 3,
        };
    }
    if position < BAND * 2 {
        position -= BAND;
        return Rgb {
            r: 0,
            g: position * 3,
            b: 255 - position * 3,
        };
    }
    position -= BAND * 2;
    Rgb {
        r: position * 3,
        g: 255 - position * 3,
        b: 0,
    }
}
