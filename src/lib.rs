#![no_std]

pub mod clock;
pub mod color;
pub mod effect;
pub mod gamma;
pub mod order;
pub mod pixels;
pub mod prng;
pub mod segment;
pub mod strip;

pub use clock::{Clock, EmbassyClock};
pub use color::Rgbw;
pub use effect::{CustomMode, EffectContext, Mode};
pub use order::ColorOrder;
pub use pixels::{LATCH_MICROS, PixelBuffer};
pub use prng::Rand16;
pub use segment::{
    DEFAULT_BRIGHTNESS, DEFAULT_SPEED, SPEED_MAX, SPEED_MIN, Segment, SegmentConfig,
    SegmentOptions, SegmentRuntime,
};
pub use strip::{CustomShow, Strip};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract strip transmission driver
///
/// Implement this trait to shift the pixel bytes onto the wire for a
/// concrete platform. The engine is generic over this trait and only
/// guarantees the inter-frame latch timing around calls to `transmit`.
pub trait StripDriver {
    /// Transmit the packed pixel bytes to the LED strip.
    ///
    /// `order` describes the per-pixel channel layout of `bytes`.
    /// The engine wraps this call in a critical section, since the
    /// bit-level protocol usually cannot tolerate preemption.
    fn transmit(&mut self, bytes: &[u8], order: ColorOrder);
}
