//! Packed pixel byte-buffer.
//!
//! The buffer itself is supplied by the caller, pre-sized to
//! `pixel_count * bytes_per_pixel`; this module owns the layout,
//! brightness pre-scaling and the transmission latch timing.

use crate::color::Rgbw;
use crate::order::ColorOrder;

/// Minimum idle time after a transmission before the next one (µs).
pub const LATCH_MICROS: u32 = 300;

/// Pixel storage with channel-offset layout and write-time brightness.
///
/// Brightness is stored as the configured value plus one, so 0 means
/// "no scaling" and a stored 1 means "off". When scaling is active,
/// writes pre-multiply channels into the buffer (lossy) and reads
/// approximately undo the scale; read-after-write equality only holds
/// at the default brightness.
pub struct PixelBuffer<'b> {
    bytes: &'b mut [u8],
    pixel_count: u16,
    order: ColorOrder,
    brightness: u8,
    latched_at: u32,
}

impl<'b> PixelBuffer<'b> {
    /// Wrap an externally supplied byte array and zero it.
    ///
    /// `bytes` must hold at least `pixel_count * bytes_per_pixel` bytes;
    /// a shorter buffer clamps the usable pixel count instead of
    /// faulting.
    pub fn new(bytes: &'b mut [u8], pixel_count: u16, order: ColorOrder) -> Self {
        let bpp = order.bytes_per_pixel();
        let capacity = (bytes.len() / bpp).min(usize::from(pixel_count)) as u16;
        let mut buffer = Self {
            bytes,
            pixel_count: capacity,
            order,
            brightness: 0,
            latched_at: 0,
        };
        buffer.clear();
        buffer
    }

    /// Number of pixels.
    pub const fn len(&self) -> u16 {
        self.pixel_count
    }

    pub const fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }

    /// Channel layout of the buffer.
    pub const fn order(&self) -> ColorOrder {
        self.order
    }

    /// 3 for RGB strips, 4 for RGBW.
    pub const fn bytes_per_pixel(&self) -> usize {
        self.order.bytes_per_pixel()
    }

    /// Number of in-use bytes.
    pub const fn num_bytes(&self) -> usize {
        self.pixel_count as usize * self.bytes_per_pixel()
    }

    /// Raw view of the pixel bytes, in wire order.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.num_bytes()]
    }

    /// Mutable raw view, bypassing brightness pre-scaling entirely.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        let n = self.num_bytes();
        &mut self.bytes[..n]
    }

    /// Set a pixel from a packed `0xWWRRGGBB` color.
    pub fn set_pixel(&mut self, n: u16, c: u32) {
        let c = Rgbw::unpack(c);
        self.set_pixel_rgbw(n, c.r, c.g, c.b, c.w);
    }

    /// Set a pixel from an RGB triple; white is set to 0.
    pub fn set_pixel_rgb(&mut self, n: u16, c: crate::color::Rgb) {
        self.set_pixel_rgbw(n, c.r, c.g, c.b, 0);
    }

    /// Set a pixel from separate channel values.
    ///
    /// No-op when `n` is out of range. With brightness scaling active
    /// every channel is pre-multiplied before storage; those low bits
    /// are gone for good.
    pub fn set_pixel_rgbw(&mut self, n: u16, mut r: u8, mut g: u8, mut b: u8, mut w: u8) {
        if n >= self.pixel_count {
            return;
        }
        if self.brightness != 0 {
            let scale = u16::from(self.brightness);
            r = ((u16::from(r) * scale) >> 8) as u8;
            g = ((u16::from(g) * scale) >> 8) as u8;
            b = ((u16::from(b) * scale) >> 8) as u8;
            w = ((u16::from(w) * scale) >> 8) as u8;
        }
        let bpp = self.bytes_per_pixel();
        let (ro, go, bo, wo) = self.order.offsets();
        let p = &mut self.bytes[n as usize * bpp..n as usize * bpp + bpp];
        if bpp == 4 {
            p[wo] = w;
        }
        p[ro] = r;
        p[go] = g;
        p[bo] = b;
    }

    /// Read a pixel back as a packed color, 0 when out of range.
    ///
    /// With brightness scaling active the stored value is scaled back up
    /// via `(stored << 8) / brightness` -- an approximation, most
    /// visibly wrong at low brightness levels.
    pub fn get_pixel(&self, n: u16) -> u32 {
        if n >= self.pixel_count {
            return 0;
        }
        let mut c = self.read_raw(n);
        if self.brightness != 0 {
            let unscale = |v: u8| (((u32::from(v)) << 8) / u32::from(self.brightness)).min(255) as u8;
            c = Rgbw::new(unscale(c.r), unscale(c.g), unscale(c.b), unscale(c.w));
        }
        c.pack()
    }

    /// Store a packed color without brightness pre-scaling.
    pub fn set_raw_pixel(&mut self, n: u16, c: u32) {
        if n >= self.pixel_count {
            return;
        }
        let c = Rgbw::unpack(c);
        let bpp = self.bytes_per_pixel();
        let (ro, go, bo, wo) = self.order.offsets();
        let p = &mut self.bytes[n as usize * bpp..n as usize * bpp + bpp];
        if bpp == 4 {
            p[wo] = c.w;
        }
        p[ro] = c.r;
        p[go] = c.g;
        p[bo] = c.b;
    }

    /// Read a pixel without undoing brightness pre-scaling.
    pub fn raw_pixel(&self, n: u16) -> u32 {
        if n >= self.pixel_count {
            return 0;
        }
        self.read_raw(n).pack()
    }

    fn read_raw(&self, n: u16) -> Rgbw {
        let bpp = self.bytes_per_pixel();
        let (ro, go, bo, wo) = self.order.offsets();
        let p = &self.bytes[n as usize * bpp..n as usize * bpp + bpp];
        let w = if bpp == 4 { p[wo] } else { 0 };
        Rgbw::new(p[ro], p[go], p[bo], w)
    }

    /// Fill `count` pixels starting at `first` with a packed color.
    ///
    /// `count == 0` fills to the end of the buffer; `first + count` is
    /// clipped to the buffer end; out-of-range `first` is a no-op.
    pub fn fill(&mut self, c: u32, first: u16, count: u16) {
        if first >= self.pixel_count {
            return;
        }
        let end = if count == 0 {
            self.pixel_count
        } else {
            first.saturating_add(count).min(self.pixel_count)
        };
        for i in first..end {
            self.set_pixel(i, c);
        }
    }

    /// Byte-level move of `count` pixels from `src` to `dest`.
    ///
    /// Overlapping ranges are handled; anything outside the buffer is
    /// clipped off.
    pub fn copy_pixels(&mut self, dest: u16, src: u16, count: u16) {
        if dest >= self.pixel_count || src >= self.pixel_count {
            return;
        }
        let headroom = self.pixel_count - dest.max(src);
        let count = count.min(headroom) as usize;
        let bpp = self.bytes_per_pixel();
        let src = src as usize * bpp;
        let dest = dest as usize * bpp;
        self.bytes.copy_within(src..src + count * bpp, dest);
    }

    /// Blank the whole strip.
    pub fn clear(&mut self) {
        let n = self.num_bytes();
        self.bytes[..n].fill(0);
    }

    /// Sum of all channel bytes, a rudimentary power estimate.
    pub fn intensity_sum(&self) -> u32 {
        self.bytes().iter().map(|&b| u32::from(b)).sum()
    }

    /// Last-set brightness, 0 = off, 255 = maximum.
    pub const fn brightness(&self) -> u8 {
        self.brightness.wrapping_sub(1)
    }

    /// Adjust output brightness, rescaling the buffer contents in place.
    ///
    /// Stored internally as `b + 1` (0 = full brightness, no scaling).
    /// The rescale ratio is built from the same stored values the
    /// write-time pre-scale divides by, so scaling down and back up
    /// composes to at most identity per channel. The rescale quantizes
    /// whatever is already in the buffer; repeated brightness changes
    /// compound the error, so treat the strip as write-only and
    /// re-render after calling this.
    pub fn set_brightness(&mut self, b: u8) {
        let new = b.wrapping_add(1);
        if new == self.brightness {
            return;
        }
        // stored 0 scales by 256/256, i.e. not at all
        let old_scale = if self.brightness == 0 {
            256u32
        } else {
            u32::from(self.brightness)
        };
        let new_scale = if new == 0 { 256u32 } else { u32::from(new) };
        let ratio = (new_scale << 8) / old_scale;
        let n = self.num_bytes();
        for byte in &mut self.bytes[..n] {
            *byte = ((u32::from(*byte) * ratio) >> 8).min(255) as u8;
        }
        self.brightness = new;
    }

    /// Whether the inter-frame latch interval has elapsed.
    ///
    /// `last` may exceed `now` if the microsecond counter rolled over
    /// (or rolled over several times during a long idle stretch); the
    /// stored timestamp is clamped to `now` so a wrap costs at most one
    /// extra latch interval instead of a multi-cycle stall.
    pub fn can_transmit(&mut self, now_us: u32) -> bool {
        if self.latched_at > now_us {
            self.latched_at = now_us;
        }
        now_us - self.latched_at >= LATCH_MICROS
    }

    /// Record the end of a transmission for latch timing.
    pub fn record_transmit(&mut self, now_us: u32) {
        self.latched_at = now_us;
    }
}
