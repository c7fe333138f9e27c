mod tests {
    use core::cell::Cell;

    use segfx::clock::Clock;
    use segfx::effect::Mode;
    use segfx::order::ColorOrder;
    use segfx::segment::{SPEED_MAX, SPEED_MIN, SegmentConfig};
    use segfx::strip::Strip;
    use segfx::StripDriver;

    /// Manually advanced clock. Every `micros` query also moves time
    /// forward a little so the transmission latch busy-wait terminates.
    struct MockClock {
        micros: Cell<u32>,
    }

    impl MockClock {
        fn new() -> Self {
            Self {
                micros: Cell::new(0),
            }
        }

        fn advance_ms(&self, ms: u32) {
            self.micros.set(self.micros.get().wrapping_add(ms * 1000));
        }
    }

    impl Clock for MockClock {
        fn micros(&self) -> u32 {
            let t = self.micros.get().wrapping_add(50);
            self.micros.set(t);
            t
        }

        fn millis(&self) -> u32 {
            self.micros.get() / 1000
        }
    }

    #[derive(Default)]
    struct MockDriver {
        transmits: usize,
        last_len: usize,
    }

    impl StripDriver for MockDriver {
        fn transmit(&mut self, bytes: &[u8], _order: ColorOrder) {
            self.transmits += 1;
            self.last_len = bytes.len();
        }
    }

    type TestStrip<'b, 'd, 'c> = Strip<'b, 'd, &'c MockClock, MockDriver, 4, 2>;

    fn strip<'b, 'c>(bytes: &'b mut [u8], clock: &'c MockClock) -> TestStrip<'b, 'static, 'c> {
        Strip::new(bytes, 16, ColorOrder::GRB, clock, MockDriver::default())
    }

    #[test]
    fn test_default_segment_spans_strip() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let strip = strip(&mut bytes, &clock);

        assert_eq!(strip.num_segments(), 1);
        let seg = strip.segment(0).unwrap();
        assert_eq!((seg.start, seg.stop), (0, 15));
        assert!(strip.is_active_segment(0));
    }

    #[test]
    fn test_service_gated_on_running() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        assert!(!strip.service()); // not started
        assert_eq!(strip.driver().transmits, 0);

        strip.start();
        assert!(strip.service());
        assert!(strip.is_frame(0));
        assert_eq!(strip.driver().transmits, 1);

        // not due again until the segment speed elapses
        assert!(!strip.service());
        assert_eq!(strip.driver().transmits, 1);

        clock.advance_ms(1000);
        assert!(strip.service());
        assert_eq!(strip.driver().transmits, 2);
    }

    #[test]
    fn test_trigger_unblocks_one_tick() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        strip.trigger();
        assert!(strip.is_triggered());
        assert!(strip.service()); // runs while stopped, trigger pending
        assert!(!strip.is_triggered()); // consumed
        assert!(!strip.service());
    }

    #[test]
    fn test_two_segments_one_transmission() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        strip.set_segment(0, SegmentConfig::new(0, 7, Mode::Static));
        strip.set_segment(1, SegmentConfig::new(8, 15, Mode::Static));
        strip.start();

        // both segments due in the same tick, buffer shipped once
        assert!(strip.service());
        assert!(strip.is_frame(0));
        assert!(strip.is_frame(1));
        assert_eq!(strip.driver().transmits, 1);
    }

    #[test]
    fn test_set_segment_clamps() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        strip.set_segment(1, SegmentConfig::new(10, 2, Mode::Blink).speed(3));
        let seg = strip.segment(1).unwrap();
        assert_eq!(seg.stop, 10); // stop clamped up to start
        assert_eq!(seg.speed, SPEED_MIN);

        strip.set_speed(1, 65535);
        assert_eq!(strip.speed(1), SPEED_MAX);
    }

    #[test]
    fn test_segment_table_capacity() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        // table holds 4 segments; id 9 is silently dropped
        strip.set_segment(9, SegmentConfig::new(0, 3, Mode::Blink));
        assert_eq!(strip.num_segments(), 1);
        assert!(strip.segment(9).is_none());

        // extending to id 2 creates defaults for the gap
        strip.set_segment(2, SegmentConfig::new(0, 3, Mode::Blink));
        assert_eq!(strip.num_segments(), 3);
        assert!(strip.segment(1).is_some());
    }

    #[test]
    fn test_active_table_capacity() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        strip.set_segment(1, SegmentConfig::new(4, 7, Mode::Static));
        strip.set_segment(2, SegmentConfig::new(8, 11, Mode::Static));

        // only two active slots exist
        assert!(strip.is_active_segment(0));
        assert!(strip.is_active_segment(1));
        assert!(!strip.is_active_segment(2));

        // adding an already-active segment is a no-op, not a duplicate
        strip.add_active_segment(1);
        strip.remove_active_segment(0);
        assert!(!strip.is_active_segment(0));
        strip.add_active_segment(2);
        assert!(strip.is_active_segment(2));
    }

    #[test]
    fn test_idle_segment_stays_inactive() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        strip.set_idle_segment(1, SegmentConfig::new(4, 7, Mode::Static));
        assert!(strip.segment(1).is_some());
        assert!(!strip.is_active_segment(1));

        strip.start();
        strip.service();
        assert!(!strip.is_frame(1));
    }

    #[test]
    fn test_swap_preserves_cadence() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        strip.set_segment(0, SegmentConfig::new(0, 7, Mode::Static));
        strip.set_idle_segment(1, SegmentConfig::new(8, 15, Mode::Static));
        strip.start();
        assert!(strip.service()); // segment 0 due at t=0, next due in 1000ms

        strip.swap_active_segment(0, 1);
        assert!(strip.is_active_segment(1));
        assert!(!strip.is_active_segment(0));

        // the slot kept its due time: nothing runs yet
        assert!(!strip.service());

        clock.advance_ms(1000);
        assert!(strip.service());
        assert!(strip.is_frame(1));
    }

    #[test]
    fn test_swap_to_active_segment_is_noop() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        strip.set_segment(1, SegmentConfig::new(8, 15, Mode::Static));
        strip.swap_active_segment(0, 1); // 1 already active
        assert!(strip.is_active_segment(0));
        assert!(strip.is_active_segment(1));
    }

    #[test]
    fn test_stop_blanks_strip() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        strip.start();
        strip.service();
        assert!(strip.intensity_sum() > 0); // default red segment rendered

        strip.stop();
        assert!(!strip.is_running());
        assert_eq!(strip.intensity_sum(), 0);
        assert_eq!(strip.driver().transmits, 2); // service + blank
    }

    #[test]
    fn test_pause_keeps_buffer() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        strip.start();
        strip.service();
        let sum = strip.intensity_sum();
        assert!(sum > 0);

        strip.pause();
        clock.advance_ms(5000);
        assert!(!strip.service());
        assert_eq!(strip.intensity_sum(), sum);

        strip.resume();
        assert!(strip.service());
    }

    #[test]
    fn test_brightness_controls() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let mut strip = strip(&mut bytes, &clock);

        assert_eq!(strip.brightness(), 50);
        strip.set_brightness(100);
        assert_eq!(strip.brightness(), 100);
        assert_eq!(strip.driver().transmits, 1); // brightness change retransmits

        strip.increase_brightness(200);
        assert_eq!(strip.brightness(), 255); // saturates
        strip.decrease_brightness(255);
        assert_eq!(strip.brightness(), 0);
    }

    #[test]
    fn test_frame_and_cycle_for_inactive_segment() {
        let clock = MockClock::new();
        let mut bytes = [0u8; 16 * 3];
        let strip = strip(&mut bytes, &clock);

        assert!(!strip.is_frame(3));
        assert!(!strip.is_cycle(3));
    }
}
