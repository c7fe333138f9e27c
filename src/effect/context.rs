//! Explicit per-call generator context.
//!
//! The scheduler builds one of these before invoking a generator, in
//! place of any implicit "current segment" state: the selected segment,
//! its slot runtime, the pixel buffer and the shared PRNG.

use crate::color::Rgbw;
use crate::gamma::gamma8;
use crate::pixels::PixelBuffer;
use crate::prng::Rand16;
use crate::segment::{Segment, SegmentRuntime};

/// Shift pairs selected by the 3-bit fade-rate option; the summed
/// right-shifts approximate per-pass decay factors from roughly 1/2
/// (xfast) down to 1/64 (glacial).
const FADE_RATE_HIGH: [u8; 8] = [0, 1, 1, 1, 2, 3, 4, 6];
const FADE_RATE_LOW: [u8; 8] = [0, 2, 3, 8, 8, 8, 8, 8];

/// Everything a generator may touch during one call.
pub struct EffectContext<'c, 'b, 'd> {
    pub seg: &'c Segment,
    pub rt: &'c mut SegmentRuntime<'d>,
    pub pixels: &'c mut PixelBuffer<'b>,
    pub rng: &'c mut Rand16,
    /// Whether this tick was forced by an external trigger.
    pub triggered: bool,
}

impl EffectContext<'_, '_, '_> {
    /// Number of pixels in the segment.
    pub const fn len(&self) -> u16 {
        self.seg.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.seg.is_empty()
    }

    pub const fn is_reverse(&self) -> bool {
        self.seg.options.is_reverse()
    }

    /// Physical width of a logical dot, `1 << size_option`.
    pub const fn size(&self) -> u16 {
        1 << self.seg.options.size()
    }

    /// Mark one full animation pass as completed.
    pub fn set_cycle(&mut self) {
        self.rt.cycle = true;
    }

    /// Set a pixel, routing through the gamma table when the segment's
    /// gamma option is on.
    pub fn set_pixel(&mut self, n: u16, c: u32) {
        let c = Rgbw::unpack(c);
        self.set_pixel_rgbw(n, c.r, c.g, c.b, c.w);
    }

    pub fn set_pixel_rgbw(&mut self, n: u16, r: u8, g: u8, b: u8, w: u8) {
        if self.seg.options.is_gamma() {
            self.pixels
                .set_pixel_rgbw(n, gamma8(r), gamma8(g), gamma8(b), gamma8(w));
        } else {
            self.pixels.set_pixel_rgbw(n, r, g, b, w);
        }
    }

    /// Fill `count` pixels from `first`, clipped to the segment.
    ///
    /// `count == 0` fills through the segment end; a `first` outside
    /// the segment is a no-op.
    pub fn fill(&mut self, c: u32, first: u16, count: u16) {
        if first >= self.pixels.len() || first < self.seg.start || first > self.seg.stop {
            return;
        }
        let seg_end = self.seg.stop + 1;
        let end = if count == 0 {
            seg_end
        } else {
            first.saturating_add(count).min(seg_end)
        };
        let end = end.min(self.pixels.len());
        for i in first..end {
            self.set_pixel(i, c);
        }
    }

    /// Byte-level pixel move, used by the scrolling effects.
    pub fn copy_pixels(&mut self, dest: u16, src: u16, count: u16) {
        self.pixels.copy_pixels(dest, src, count);
    }

    /// Fade every pixel of the segment towards the segment's second
    /// color.
    pub fn fade_out(&mut self) {
        self.fade_out_to(self.seg.colors[1]);
    }

    /// Fade every pixel of the segment towards `target`.
    ///
    /// Exponential approach: each channel moves by
    /// `(delta >> high) + (delta >> low)` with the shift pair picked by
    /// the fade-rate option. Deltas below 3 jump straight to the target,
    /// otherwise integer truncation would stall the approach short of
    /// it. Rate 0 keeps the legacy halve-towards-black behavior.
    pub fn fade_out_to(&mut self, target: u32) {
        let rate = self.seg.options.fade_rate() as usize;
        let high = FADE_RATE_HIGH[rate];
        let low = FADE_RATE_LOW[rate];
        let target = Rgbw::unpack(target);

        for i in self.seg.start..=self.seg.stop {
            if rate == 0 {
                // legacy fade-to-black
                let c = self.pixels.get_pixel(i);
                self.set_pixel(i, (c >> 1) & 0x7F7F_7F7F);
                continue;
            }
            let current = Rgbw::unpack(self.pixels.get_pixel(i));
            let step = |from: u8, to: u8| {
                let delta = i32::from(to) - i32::from(from);
                let delta = if delta.abs() < 3 {
                    delta
                } else {
                    (delta >> high) + (delta >> low)
                };
                (i32::from(from) + delta) as u8
            };
            self.set_pixel_rgbw(
                i,
                step(current.r, target.r),
                step(current.g, target.g),
                step(current.b, target.b),
                step(current.w, target.w),
            );
        }
    }
}
