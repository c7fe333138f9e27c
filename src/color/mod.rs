//! Color types and packed-color math.
//!
//! Colors travel through the effect layer as packed `0xWWRRGGBB` values;
//! [`Rgbw`] is the structured view used whenever per-channel math is
//! needed, so no code relies on byte-level reinterpretation.

mod hsv;

pub use hsv::color_hsv;
use smart_leds::RGB8;

use crate::prng::Rand16;

pub type Rgb = RGB8;

pub const RED: u32 = 0x00FF_0000;
pub const GREEN: u32 = 0x0000_FF00;
pub const BLUE: u32 = 0x0000_00FF;
pub const WHITE: u32 = 0x00FF_FFFF;
pub const BLACK: u32 = 0x0000_0000;
pub const YELLOW: u32 = 0x00FF_FF00;
pub const CYAN: u32 = 0x0000_FFFF;
pub const MAGENTA: u32 = 0x00FF_00FF;
pub const PURPLE: u32 = 0x0040_0080;
pub const ORANGE: u32 = 0x00FF_3000;
pub const PINK: u32 = 0x00FF_1493;
pub const GRAY: u32 = 0x0010_1010;
pub const ULTRA_WHITE: u32 = 0xFFFF_FFFF;

/// Color at 25% intensity.
pub const fn dim(c: u32) -> u32 {
    (c >> 2) & 0x3F3F_3F3F
}

/// Color at 6% intensity.
pub const fn dark(c: u32) -> u32 {
    (c >> 4) & 0x0F0F_0F0F
}

/// Structured 4-channel color value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Unpack a `0xWWRRGGBB` value into channels.
    pub const fn unpack(c: u32) -> Self {
        Self {
            r: (c >> 16) as u8,
            g: (c >> 8) as u8,
            b: c as u8,
            w: (c >> 24) as u8,
        }
    }

    /// Pack the channels back into a `0xWWRRGGBB` value.
    pub const fn pack(self) -> u32 {
        ((self.w as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Drop the white channel.
    pub const fn rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Largest channel value.
    pub const fn luma(self) -> u8 {
        let rg = if self.r > self.g { self.r } else { self.g };
        let bw = if self.b > self.w { self.b } else { self.w };
        if rg > bw { rg } else { bw }
    }
}

impl From<Rgb> for Rgbw {
    fn from(c: Rgb) -> Self {
        Self::new(c.r, c.g, c.b, 0)
    }
}

/// Pack an RGB triple with the white channel at 0.
pub fn packed_from_rgb(c: Rgb) -> u32 {
    Rgbw::from(c).pack()
}

/// Transition red -> green -> blue -> back to red over 0-255.
pub const fn color_wheel(pos: u8) -> u32 {
    let pos = 255 - pos;
    if pos < 85 {
        (((255 - pos * 3) as u32) << 16) | (pos * 3) as u32
    } else if pos < 170 {
        let pos = pos - 85;
        (((pos * 3) as u32) << 8) | (255 - pos * 3) as u32
    } else {
        let pos = pos - 170;
        (((pos * 3) as u32) << 16) | (((255 - pos * 3) as u32) << 8)
    }
}

/// Draw a new wheel index at least 42 steps away from `pos`.
pub fn random_wheel_index(rng: &mut Rand16, pos: u8) -> u8 {
    let mut r = 0;
    let mut d = 0;
    while d < 42 {
        r = rng.random8();
        let x = if pos > r { pos - r } else { r - pos };
        d = x.min(255 - x);
    }
    r
}

/// Blend two packed colors channel by channel.
///
/// `amount` 0 yields `c1`, 255 yields `c2`.
pub fn color_blend(c1: u32, c2: u32, amount: u8) -> u32 {
    match amount {
        0 => c1,
        255 => c2,
        _ => {
            let a = Rgbw::unpack(c1);
            let b = Rgbw::unpack(c2);
            Rgbw::new(
                blend_channel(a.r, b.r, amount),
                blend_channel(a.g, b.g, amount),
                blend_channel(a.b, b.b, amount),
                blend_channel(a.w, b.w, amount),
            )
            .pack()
        }
    }
}

/// Blend two raw byte buffers into `dest`.
pub fn blend(dest: &mut [u8], src1: &[u8], src2: &[u8], amount: u8) {
    match amount {
        0 => dest.copy_from_slice(src1),
        255 => dest.copy_from_slice(src2),
        _ => {
            for ((d, &a), &b) in dest.iter_mut().zip(src1).zip(src2) {
                *d = blend_channel(a, b, amount);
            }
        }
    }
}

#[inline]
fn blend_channel(a: u8, b: u8, amount: u8) -> u8 {
    let delta = i32::from(b) - i32::from(a);
    (i32::from(amount) * delta / 256 + i32::from(a)) as u8
}
