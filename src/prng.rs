//! Fast 16-bit pseudo-random number generator.
//!
//! Linear congruential generator borrowed from `FastLED`. All effect
//! randomness goes through one reseedable instance, so a fixed seed
//! reproduces an identical animation sequence.

/// 16-bit LCG, `seed = seed * 2053 + 13849`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rand16 {
    seed: u16,
}

impl Rand16 {
    pub const fn new(seed: u16) -> Self {
        Self { seed }
    }

    /// Replace the current seed.
    pub fn reseed(&mut self, seed: u16) {
        self.seed = seed;
    }

    /// Next 8-bit value, folding the high and low bytes of the state.
    pub fn random8(&mut self) -> u8 {
        self.seed = self.seed.wrapping_mul(2053).wrapping_add(13849);
        (self.seed.wrapping_add(self.seed >> 8) & 0xFF) as u8
    }

    /// Next value in `0..lim`.
    pub fn random8_to(&mut self, lim: u8) -> u8 {
        ((u16::from(self.random8()) * u16::from(lim)) >> 8) as u8
    }

    /// Next value in `min..max`. `max` must be greater than `min`.
    pub fn random8_range(&mut self, min: u8, max: u8) -> u8 {
        let range = max.wrapping_sub(min);
        (self.random8() % range).wrapping_add(min)
    }

    /// Next 16-bit value from two consecutive 8-bit draws.
    pub fn random16(&mut self) -> u16 {
        u16::from(self.random8()) * 256 + u16::from(self.random8())
    }

    /// Next value in `0..lim`.
    pub fn random16_to(&mut self, lim: u16) -> u16 {
        ((u32::from(self.random16()) * u32::from(lim)) >> 16) as u16
    }
}

impl Default for Rand16 {
    fn default() -> Self {
        Self::new(0)
    }
}
