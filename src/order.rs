//! Per-pixel channel layout.
//!
//! WS2812-family strips disagree on the order color bytes are shifted
//! out in, and SK6812 variants add a fourth white channel. The layout is
//! encoded in a packed 6-bit code: 2 bits per channel offset, with the
//! white offset in the top bits. White offset equal to the red offset is
//! the sentinel for "no white channel" (3 bytes per pixel).

/// Packed channel-order code, 2 bits per channel offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOrder(u8);

impl ColorOrder {
    pub const RGB: Self = Self::rgb(0, 1, 2);
    pub const RBG: Self = Self::rgb(0, 2, 1);
    pub const GRB: Self = Self::rgb(1, 0, 2);
    pub const GBR: Self = Self::rgb(2, 0, 1);
    pub const BRG: Self = Self::rgb(1, 2, 0);
    pub const BGR: Self = Self::rgb(2, 1, 0);

    pub const RGBW: Self = Self::rgbw(0, 1, 2, 3);
    pub const GRBW: Self = Self::rgbw(1, 0, 2, 3);
    pub const WRGB: Self = Self::rgbw(1, 2, 3, 0);

    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        // w == r marks the 3-byte layout
        Self::rgbw(r, g, b, r)
    }

    const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self(((w & 3) << 6) | ((r & 3) << 4) | ((g & 3) << 2) | (b & 3))
    }

    /// Build from a raw packed code.
    pub const fn from_code(code: u8) -> Self {
        Self(code)
    }

    /// Parse a 3-4 character order string such as `"GRB"` or `"grbw"`.
    ///
    /// Case-insensitive. Unrecognized characters are skipped, leaving the
    /// corresponding offsets at 0, so malformed input degrades to a valid
    /// (if unexpected) layout rather than failing. A missing `w` yields
    /// the 3-byte sentinel.
    pub fn from_str(v: &str) -> Self {
        let mut r = 0u8;
        let mut g = 0u8;
        let mut b = 0u8;
        let mut w: Option<u8> = None;
        for (i, c) in v.bytes().enumerate().take(4) {
            let i = i as u8;
            match c.to_ascii_lowercase() {
                b'r' => r = i,
                b'g' => g = i,
                b'b' => b = i,
                b'w' => w = Some(i),
                _ => {}
            }
        }
        Self::rgbw(r, g, b, w.unwrap_or(r))
    }

    /// Raw packed code.
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Byte offsets within one pixel, in `(r, g, b, w)` order.
    pub const fn offsets(self) -> (usize, usize, usize, usize) {
        (
            ((self.0 >> 4) & 3) as usize,
            ((self.0 >> 2) & 3) as usize,
            (self.0 & 3) as usize,
            ((self.0 >> 6) & 3) as usize,
        )
    }

    /// Whether the layout carries a dedicated white channel.
    pub const fn has_white(self) -> bool {
        (self.0 >> 6) & 3 != (self.0 >> 4) & 3
    }

    /// 3 for RGB layouts, 4 for RGBW.
    pub const fn bytes_per_pixel(self) -> usize {
        if self.has_white() { 4 } else { 3 }
    }
}

impl Default for ColorOrder {
    fn default() -> Self {
        Self::GRB
    }
}
