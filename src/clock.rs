//! Injected time source.
//!
//! The engine works in wrapping 32-bit microsecond/millisecond counters,
//! matching the counters cheap microcontrollers actually provide. All
//! scheduling and latch math tolerates the wraparound.

use embassy_time::Instant;

/// Monotonic, wrapping time source injected by the platform.
///
/// `micros` rolls over roughly every 71 minutes, `millis` every 49 days.
pub trait Clock {
    /// Wrapping microsecond counter.
    fn micros(&self) -> u32;

    /// Wrapping millisecond counter.
    fn millis(&self) -> u32;
}

/// [`Clock`] backed by `embassy_time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn micros(&self) -> u32 {
        Instant::now().as_micros() as u32
    }

    fn millis(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

impl<C: Clock> Clock for &C {
    fn micros(&self) -> u32 {
        (**self).micros()
    }

    fn millis(&self) -> u32 {
        (**self).millis()
    }
}

/// Check whether `now` has reached `due` on a wrapping counter.
///
/// Treats differences of up to half the counter range as "in the past",
/// so a rollover between two ticks does not stall the scheduler.
pub const fn time_reached(now: u32, due: u32) -> bool {
    (now.wrapping_sub(due) as i32) >= 0
}
