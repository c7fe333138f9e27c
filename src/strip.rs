//! Multi-segment animation engine.
//!
//! `Strip` owns the pixel buffer, the segment table and the per-slot
//! runtimes, and multiplexes up to `MAX_ACTIVE` concurrently animating
//! segments over a single physical strip. Call [`Strip::service`] from
//! the main loop; it advances every due segment and issues one batched
//! transmission for the whole strip.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use heapless::Vec;

use crate::StripDriver;
use crate::clock::{Clock, time_reached};
use crate::effect::{CUSTOM_MODE_COUNT, CustomMode, EffectContext, Mode};
use crate::order::ColorOrder;
use crate::pixels::PixelBuffer;
use crate::prng::Rand16;
use crate::segment::{
    DEFAULT_BRIGHTNESS, MAX_COLORS, SPEED_MAX, SPEED_MIN, Segment, SegmentConfig, SegmentOptions,
    SegmentRuntime,
};

/// Replacement for the engine's transmission step. When registered it
/// receives the packed buffer instead of the driver; latch timing is
/// the callee's problem.
pub type CustomShow = fn(bytes: &[u8], order: ColorOrder);

/// The animation engine.
///
/// `MAX_SEGMENTS` bounds the segment table, `MAX_ACTIVE` the number of
/// segments animating concurrently. Segment 0 always exists and spans
/// the whole strip after construction.
pub struct Strip<'b, 'd, C: Clock, D: StripDriver, const MAX_SEGMENTS: usize, const MAX_ACTIVE: usize>
{
    pixels: PixelBuffer<'b>,
    clock: C,
    driver: D,

    segments: Vec<Segment, MAX_SEGMENTS>,
    runtimes: [SegmentRuntime<'d>; MAX_ACTIVE],
    active: [Option<u8>; MAX_ACTIVE],

    rng: Rand16,
    running: bool,
    triggered: bool,

    custom_modes: [Option<CustomMode>; CUSTOM_MODE_COUNT],
    custom_show: Option<CustomShow>,
}

impl<'b, 'd, C: Clock, D: StripDriver, const MAX_SEGMENTS: usize, const MAX_ACTIVE: usize>
    Strip<'b, 'd, C, D, MAX_SEGMENTS, MAX_ACTIVE>
{
    /// Create an engine over a caller-owned byte buffer.
    ///
    /// `bytes` must hold at least `pixel_count * bytes_per_pixel`
    /// bytes; a shorter buffer clamps the pixel count. Segment 0 is
    /// created spanning the whole strip with default mode and speed.
    pub fn new(bytes: &'b mut [u8], pixel_count: u16, order: ColorOrder, clock: C, driver: D) -> Self {
        const {
            assert!(MAX_ACTIVE <= MAX_SEGMENTS);
            assert!(MAX_SEGMENTS > 0);
        }

        let mut pixels = PixelBuffer::new(bytes, pixel_count, order);
        pixels.set_brightness(DEFAULT_BRIGHTNESS);

        let mut strip = Self {
            pixels,
            clock,
            driver,
            segments: Vec::new(),
            runtimes: [SegmentRuntime::new(); MAX_ACTIVE],
            active: [None; MAX_ACTIVE],
            rng: Rand16::default(),
            running: false,
            triggered: false,
            custom_modes: [None; CUSTOM_MODE_COUNT],
            custom_show: None,
        };

        let stop = strip.pixels.len().saturating_sub(1);
        strip.set_segment(0, SegmentConfig::new(0, stop, Mode::Static));
        strip
    }

    /// Advance every due active segment and transmit once if any of
    /// them produced a frame. Returns whether a transmission happened.
    ///
    /// Runs only while started or when a trigger is pending; the
    /// trigger unblocks every active slot for exactly one tick.
    pub fn service(&mut self) -> bool {
        let mut do_show = false;
        if self.running || self.triggered {
            let now = self.clock.millis();
            for slot in 0..MAX_ACTIVE {
                let Some(id) = self.active[slot] else {
                    continue;
                };
                let Some(seg) = self.segments.get(usize::from(id)) else {
                    continue;
                };
                self.runtimes[slot].frame = false;
                self.runtimes[slot].cycle = false;
                if time_reached(now, self.runtimes[slot].next_time) || self.triggered {
                    do_show = true;
                    let mut ctx = EffectContext {
                        seg,
                        rt: &mut self.runtimes[slot],
                        pixels: &mut self.pixels,
                        rng: &mut self.rng,
                        triggered: self.triggered,
                    };
                    let delay = seg.mode.run(&mut ctx, &self.custom_modes);
                    let rt = &mut self.runtimes[slot];
                    rt.next_time = now.wrapping_add(u32::from(delay.max(SPEED_MIN)));
                    rt.counter_mode_call += 1;
                    rt.frame = true;
                }
            }
            if do_show {
                self.show();
            }
            self.triggered = false;
        }
        do_show
    }

    /// Transmit the pixel buffer, honoring the inter-frame latch.
    ///
    /// Busy-waits until the latch interval since the previous
    /// transmission has elapsed, then hands the bytes to the driver
    /// inside a critical section. A registered custom show function
    /// bypasses both the latch and the driver.
    pub fn show(&mut self) {
        if let Some(custom) = self.custom_show {
            custom(self.pixels.bytes(), self.pixels.order());
            return;
        }

        loop {
            let now = self.clock.micros();
            if self.pixels.can_transmit(now) {
                break;
            }
        }

        critical_section::with(|_cs| {
            self.driver.transmit(self.pixels.bytes(), self.pixels.order());
        });
        let now = self.clock.micros();
        self.pixels.record_transmit(now);
    }

    /// Start servicing animations. Resets every slot runtime.
    pub fn start(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[Strip.start] starting animation service");
        for rt in &mut self.runtimes {
            rt.reset();
        }
        self.running = true;
    }

    /// Stop servicing and blank the strip.
    pub fn stop(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[Strip.stop] stopping and blanking strip");
        self.running = false;
        self.strip_off();
    }

    /// Stop servicing but leave the pixels as they are.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Unblock every active slot for the next tick regardless of its
    /// cadence (e.g. for sound-reactive effects).
    pub fn trigger(&mut self) {
        self.triggered = true;
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Blank the whole strip and transmit immediately.
    pub fn strip_off(&mut self) {
        self.pixels.clear();
        self.show();
    }

    /// Fill a pixel range directly, bypassing the segment machinery.
    /// `count == 0` fills through the end of the strip.
    pub fn fill(&mut self, c: u32, first: u16, count: u16) {
        self.pixels.fill(c, first, count);
    }

    /// Write or overwrite a segment slot and make it active.
    ///
    /// Ids beyond the current count extend the table with default
    /// segments; ids beyond `MAX_SEGMENTS` are dropped. `stop` is
    /// clamped to `start` and the speed into its valid range. If the
    /// segment is already active its runtime restarts.
    pub fn set_segment(&mut self, n: u8, config: SegmentConfig) {
        if usize::from(n) >= MAX_SEGMENTS {
            return;
        }
        while self.segments.len() <= usize::from(n) {
            // capacity checked above
            let _ = self.segments.push(Segment::default());
        }

        let seg = &mut self.segments[usize::from(n)];
        seg.start = config.start;
        seg.stop = config.stop.max(config.start);
        seg.mode = config.mode;
        seg.speed = config.speed.clamp(SPEED_MIN, SPEED_MAX);
        seg.options = config.options;
        seg.colors = config.colors;

        if let Some(slot) = self.find_slot(n) {
            self.runtimes[slot].reset();
        } else {
            self.add_active_segment(n);
        }
    }

    /// Same write as [`Strip::set_segment`] but forces the segment out
    /// of the active table, for staged-but-not-running configurations.
    pub fn set_idle_segment(&mut self, n: u8, config: SegmentConfig) {
        self.set_segment(n, config);
        self.remove_active_segment(n);
    }

    /// Put an existing segment into the first free active slot. No-op
    /// if it is already active or all slots are taken.
    pub fn add_active_segment(&mut self, n: u8) {
        if self.find_slot(n).is_some() {
            return; // segment already active
        }
        for (slot, entry) in self.active.iter_mut().enumerate() {
            if entry.is_none() {
                *entry = Some(n);
                self.runtimes[slot].reset();
                break;
            }
        }
    }

    pub fn remove_active_segment(&mut self, n: u8) {
        for entry in &mut self.active {
            if *entry == Some(n) {
                *entry = None;
            }
        }
    }

    /// Swap a running animation onto a different segment id.
    ///
    /// Counters and aux state restart but the slot keeps its due time,
    /// so the in-flight frame cadence is not disturbed. No-op if the
    /// new id is already active.
    pub fn swap_active_segment(&mut self, old: u8, new: u8) {
        if self.find_slot(new).is_some() {
            return;
        }
        if let Some(slot) = self.find_slot(old) {
            self.active[slot] = Some(new);
            self.runtimes[slot].reset_preserving_due_time();
        }
    }

    pub fn is_active_segment(&self, n: u8) -> bool {
        self.find_slot(n).is_some()
    }

    fn find_slot(&self, n: u8) -> Option<usize> {
        self.active.iter().position(|entry| *entry == Some(n))
    }

    /// Current number of defined segments.
    pub fn num_segments(&self) -> u8 {
        self.segments.len() as u8
    }

    pub fn segment(&self, n: u8) -> Option<&Segment> {
        self.segments.get(usize::from(n))
    }

    /// Change a segment's mode (clamped into the valid id range) and
    /// restart its runtime.
    pub fn set_mode(&mut self, n: u8, mode: Mode) {
        if let Some(slot) = self.find_slot(n) {
            self.runtimes[slot].reset();
        }
        if let Some(seg) = self.segments.get_mut(usize::from(n)) {
            seg.mode = mode;
        }
    }

    /// Change a segment's mode from a raw effect id.
    pub fn set_mode_raw(&mut self, n: u8, mode: u8) {
        self.set_mode(n, Mode::from_raw(mode));
    }

    pub fn set_speed(&mut self, n: u8, speed: u16) {
        if let Some(seg) = self.segments.get_mut(usize::from(n)) {
            seg.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
        }
    }

    pub fn increase_speed(&mut self, n: u8, by: u16) {
        if let Some(seg) = self.segments.get(usize::from(n)) {
            let speed = seg.speed.saturating_add(by);
            self.set_speed(n, speed);
        }
    }

    pub fn decrease_speed(&mut self, n: u8, by: u16) {
        if let Some(seg) = self.segments.get(usize::from(n)) {
            let speed = seg.speed.saturating_sub(by);
            self.set_speed(n, speed);
        }
    }

    pub fn speed(&self, n: u8) -> u16 {
        self.segments.get(usize::from(n)).map_or(0, |seg| seg.speed)
    }

    /// Set a segment's primary color.
    pub fn set_color(&mut self, n: u8, color: u32) {
        if let Some(seg) = self.segments.get_mut(usize::from(n)) {
            seg.colors[0] = color;
        }
    }

    pub fn set_colors(&mut self, n: u8, colors: [u32; MAX_COLORS]) {
        if let Some(seg) = self.segments.get_mut(usize::from(n)) {
            seg.colors = colors;
        }
    }

    pub fn set_options(&mut self, n: u8, options: SegmentOptions) {
        if let Some(seg) = self.segments.get_mut(usize::from(n)) {
            seg.options = options;
        }
    }

    /// Set the global brightness and retransmit at the new level.
    pub fn set_brightness(&mut self, b: u8) {
        self.pixels.set_brightness(b);
        self.show();
    }

    pub fn increase_brightness(&mut self, by: u8) {
        let b = self.pixels.brightness().saturating_add(by);
        self.set_brightness(b);
    }

    pub fn decrease_brightness(&mut self, by: u8) {
        let b = self.pixels.brightness().saturating_sub(by);
        self.set_brightness(b);
    }

    pub fn brightness(&self) -> u8 {
        self.pixels.brightness()
    }

    /// Whether the segment produced a frame during the last tick.
    /// False for segments that are not active.
    pub fn is_frame(&self, n: u8) -> bool {
        self.find_slot(n)
            .is_some_and(|slot| self.runtimes[slot].frame)
    }

    /// Whether the segment completed a full animation pass during the
    /// last tick. False for segments that are not active.
    pub fn is_cycle(&self, n: u8) -> bool {
        self.find_slot(n)
            .is_some_and(|slot| self.runtimes[slot].cycle)
    }

    /// Attach an external data source to a segment's runtime, consumed
    /// by data-driven modes like the VU meter and the flipbook.
    pub fn set_ext_data(&mut self, n: u8, data: Option<&'d [u8]>) {
        if let Some(slot) = self.find_slot(n) {
            self.runtimes[slot].ext_data = data;
        }
    }

    /// Register a generator for one of the custom mode slots.
    pub fn set_custom_mode(&mut self, slot: usize, generator: CustomMode) {
        if let Some(entry) = self.custom_modes.get_mut(slot) {
            *entry = Some(generator);
        }
    }

    /// Replace the transmission step with a custom function.
    pub fn set_custom_show(&mut self, show: CustomShow) {
        self.custom_show = Some(show);
    }

    /// Reseed the effect PRNG, e.g. from a hardware entropy source.
    pub fn set_random_seed(&mut self, seed: u16) {
        self.rng.reseed(seed);
    }

    /// Total number of pixels.
    pub fn len(&self) -> u16 {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Sum of all channel intensities, for rudimentary power
    /// estimation.
    pub fn intensity_sum(&self) -> u32 {
        self.pixels.intensity_sum()
    }

    pub fn pixels(&self) -> &PixelBuffer<'b> {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelBuffer<'b> {
        &mut self.pixels
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
