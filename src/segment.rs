//! Segment descriptors and per-slot animation runtime state.

use crate::color::RED;
use crate::effect::Mode;

/// Slowest allowed generator cadence, in ms.
pub const SPEED_MIN: u16 = 10;
pub const SPEED_MAX: u16 = 65535;

pub const DEFAULT_SPEED: u16 = 1000;
pub const DEFAULT_BRIGHTNESS: u8 = 50;

/// Colors carried per segment.
pub const MAX_COLORS: usize = 3;

/// Per-segment option bitfield.
///
/// bit 7: reverse animation, bits 4-6: fade rate (0-7), bit 3: gamma
/// correction, bits 1-2: dot size (0-3), bit 0: reserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentOptions(u8);

impl SegmentOptions {
    pub const NONE: Self = Self(0);
    pub const REVERSE: Self = Self(0b1000_0000);
    pub const GAMMA: Self = Self(0b0000_1000);

    pub const FADE_XFAST: Self = Self::with_fade_rate(Self::NONE, 1);
    pub const FADE_FAST: Self = Self::with_fade_rate(Self::NONE, 2);
    pub const FADE_MEDIUM: Self = Self::with_fade_rate(Self::NONE, 3);
    pub const FADE_SLOW: Self = Self::with_fade_rate(Self::NONE, 4);
    pub const FADE_XSLOW: Self = Self::with_fade_rate(Self::NONE, 5);
    pub const FADE_XXSLOW: Self = Self::with_fade_rate(Self::NONE, 6);
    pub const FADE_GLACIAL: Self = Self::with_fade_rate(Self::NONE, 7);

    pub const SIZE_SMALL: Self = Self(0b0000_0000);
    pub const SIZE_MEDIUM: Self = Self(0b0000_0010);
    pub const SIZE_LARGE: Self = Self(0b0000_0100);
    pub const SIZE_XLARGE: Self = Self(0b0000_0110);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Combine two option sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn with_fade_rate(self, rate: u8) -> Self {
        Self((self.0 & !0b0111_0000) | ((rate & 7) << 4))
    }

    #[must_use]
    pub const fn with_size(self, size: u8) -> Self {
        Self((self.0 & !0b0000_0110) | ((size & 3) << 1))
    }

    pub const fn is_reverse(self) -> bool {
        self.0 & Self::REVERSE.0 != 0
    }

    pub const fn is_gamma(self) -> bool {
        self.0 & Self::GAMMA.0 != 0
    }

    /// 3-bit fade rate, 0 = halve-each-pass legacy fade.
    pub const fn fade_rate(self) -> u8 {
        (self.0 >> 4) & 7
    }

    /// 2-bit dot-size field; a logical dot covers `1 << size()` pixels.
    pub const fn size(self) -> u8 {
        (self.0 >> 1) & 3
    }
}

/// One contiguous pixel range with its own effect, speed and colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// First pixel, inclusive.
    pub start: u16,
    /// Last pixel, inclusive.
    pub stop: u16,
    pub speed: u16,
    pub mode: Mode,
    pub options: SegmentOptions,
    pub colors: [u32; MAX_COLORS],
}

impl Segment {
    /// Number of pixels covered.
    pub const fn len(&self) -> u16 {
        self.stop - self.start + 1
    }

    pub const fn is_empty(&self) -> bool {
        self.stop < self.start
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self {
            start: 0,
            stop: 0,
            speed: DEFAULT_SPEED,
            mode: Mode::Static,
            options: SegmentOptions::NONE,
            colors: [RED, 0, 0],
        }
    }
}

/// Segment description consumed by `Strip::set_segment`.
#[derive(Debug, Clone, Copy)]
pub struct SegmentConfig {
    pub start: u16,
    pub stop: u16,
    pub mode: Mode,
    pub colors: [u32; MAX_COLORS],
    pub speed: u16,
    pub options: SegmentOptions,
}

impl SegmentConfig {
    pub const fn new(start: u16, stop: u16, mode: Mode) -> Self {
        Self {
            start,
            stop,
            mode,
            colors: [RED, 0, 0],
            speed: DEFAULT_SPEED,
            options: SegmentOptions::NONE,
        }
    }

    #[must_use]
    pub const fn color(mut self, c: u32) -> Self {
        self.colors[0] = c;
        self
    }

    #[must_use]
    pub const fn colors(mut self, colors: [u32; MAX_COLORS]) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub const fn speed(mut self, speed: u16) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub const fn options(mut self, options: SegmentOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn reverse(self) -> Self {
        let options = self.options.union(SegmentOptions::REVERSE);
        self.options(options)
    }
}

/// Mutable animation state for one *active* segment slot.
///
/// Runtimes belong to active-table slots, not to segments: swapping a
/// running animation onto another segment index keeps the slot's
/// in-flight cadence (`next_time`) while zeroing the counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentRuntime<'d> {
    /// Next due time on the wrapping millisecond counter.
    pub next_time: u32,
    pub counter_mode_step: u32,
    pub counter_mode_call: u32,
    /// Auxiliary param, usually a color-wheel index.
    pub aux: u8,
    /// Auxiliary param, usually a pixel or segment index.
    pub aux3: u16,
    /// Set when the generator ran during the current service tick.
    pub frame: bool,
    /// Set by a generator when one full animation pass completed.
    pub cycle: bool,
    /// Externally supplied values for data-driven effects.
    pub ext_data: Option<&'d [u8]>,
}

impl<'d> SegmentRuntime<'d> {
    pub const fn new() -> Self {
        Self {
            next_time: 0,
            counter_mode_step: 0,
            counter_mode_call: 0,
            aux: 0,
            aux3: 0,
            frame: false,
            cycle: false,
            ext_data: None,
        }
    }

    /// Full reset; the external data source is deliberately kept.
    pub fn reset(&mut self) {
        let ext_data = self.ext_data;
        *self = Self::new();
        self.ext_data = ext_data;
    }

    /// Reset for `swap_active`: counters and flags go, `next_time`
    /// stays so the in-flight frame's cadence is not disturbed.
    pub fn reset_preserving_due_time(&mut self) {
        let next_time = self.next_time;
        self.reset();
        self.next_time = next_time;
    }
}
