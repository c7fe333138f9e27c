mod tests {
    use segfx::order::ColorOrder;
    use segfx::pixels::{LATCH_MICROS, PixelBuffer};

    const RED: u32 = 0x00FF_0000;

    fn buffer(bytes: &mut [u8], pixels: u16) -> PixelBuffer<'_> {
        PixelBuffer::new(bytes, pixels, ColorOrder::GRB)
    }

    #[test]
    fn test_roundtrip_at_full_brightness() {
        let mut bytes = [0u8; 8 * 3];
        let mut buf = buffer(&mut bytes, 8);
        assert_eq!(buf.brightness(), 255);

        buf.set_pixel(0, RED);
        buf.set_pixel(7, 0x0011_2233);
        assert_eq!(buf.get_pixel(0), RED);
        assert_eq!(buf.get_pixel(7), 0x0011_2233);
    }

    #[test]
    fn test_out_of_range_is_silent() {
        let mut bytes = [0u8; 4 * 3];
        let mut buf = buffer(&mut bytes, 4);
        buf.set_pixel(4, RED); // no-op
        buf.set_pixel(1000, RED); // no-op
        assert_eq!(buf.get_pixel(4), 0);
        assert_eq!(buf.intensity_sum(), 0);
    }

    #[test]
    fn test_short_byte_buffer_clamps_pixel_count() {
        let mut bytes = [0u8; 10]; // room for 3 GRB pixels, not 8
        let buf = buffer(&mut bytes, 8);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.num_bytes(), 9);
    }

    #[test]
    fn test_wire_order_layout() {
        let mut bytes = [0u8; 2 * 3];
        let mut buf = buffer(&mut bytes, 2);
        buf.set_raw_pixel(0, 0x0011_2233);
        // GRB on the wire
        assert_eq!(buf.bytes()[..3], [0x22, 0x11, 0x33]);
    }

    #[test]
    fn test_white_channel_layout() {
        let mut bytes = [0u8; 2 * 4];
        let mut buf = PixelBuffer::new(&mut bytes, 2, ColorOrder::GRBW);
        buf.set_raw_pixel(0, 0x4411_2233);
        assert_eq!(buf.bytes()[..4], [0x22, 0x11, 0x33, 0x44]);
        assert_eq!(buf.raw_pixel(0), 0x4411_2233);
    }

    #[test]
    fn test_brightness_prescale_is_lossy() {
        let mut bytes = [0u8; 4 * 3];
        let mut buf = buffer(&mut bytes, 4);
        buf.set_brightness(50);
        assert_eq!(buf.brightness(), 50);

        buf.set_pixel(0, RED);
        // stored pre-multiplied: (255 * 51) >> 8 = 50
        assert_eq!(buf.raw_pixel(0), 0x0032_0000);
        // read back unscales approximately, not exactly
        assert_eq!(buf.get_pixel(0), 0x00FA_0000);
    }

    #[test]
    fn test_brightness_rescales_in_place() {
        let mut bytes = [0u8; 2 * 3];
        let mut buf = buffer(&mut bytes, 2);
        buf.set_pixel(0, RED);

        buf.set_brightness(127);
        // scale = ((128 << 8) - 1) / 255 = 128
        assert_eq!(buf.raw_pixel(0), 0x007F_0000);

        buf.set_brightness(0);
        assert_eq!(buf.raw_pixel(0), 0);
    }

    #[test]
    fn test_brightness_round_trip_never_gains() {
        let mut bytes = [0u8; 4 * 3];
        let mut buf = buffer(&mut bytes, 4);
        let original = 0x0080_4020u32;

        // scaling down and back up loses magnitude, never gains it
        for level in [1u8, 2, 10, 50, 127, 200] {
            buf.set_brightness(255);
            buf.clear();
            buf.set_pixel(0, original);

            buf.set_brightness(level);
            buf.set_brightness(255);

            let restored = buf.raw_pixel(0);
            for shift in [16u32, 8, 0] {
                let before = (original >> shift) & 0xFF;
                let after = (restored >> shift) & 0xFF;
                assert!(
                    after <= before,
                    "level {level}: {original:#08x} came back as {restored:#08x}"
                );
            }
        }
    }

    #[test]
    fn test_fill_semantics() {
        let mut bytes = [0u8; 8 * 3];
        let mut buf = buffer(&mut bytes, 8);

        buf.fill(RED, 6, 0); // count 0 fills to the end
        assert_eq!(buf.get_pixel(5), 0);
        assert_eq!(buf.get_pixel(6), RED);
        assert_eq!(buf.get_pixel(7), RED);

        buf.clear();
        buf.fill(RED, 6, 100); // clipped at the end
        assert_eq!(buf.get_pixel(7), RED);

        buf.clear();
        buf.fill(RED, 8, 2); // out of range, no-op
        assert_eq!(buf.intensity_sum(), 0);
    }

    #[test]
    fn test_copy_pixels_shifts() {
        let mut bytes = [0u8; 4 * 3];
        let mut buf = buffer(&mut bytes, 4);
        buf.set_pixel(0, RED);
        buf.copy_pixels(1, 0, 3);
        assert_eq!(buf.get_pixel(0), RED);
        assert_eq!(buf.get_pixel(1), RED);
        assert_eq!(buf.get_pixel(3), 0);
    }

    #[test]
    fn test_latch_interval() {
        let mut bytes = [0u8; 3];
        let mut buf = buffer(&mut bytes, 1);

        assert!(!buf.can_transmit(0));
        assert!(buf.can_transmit(LATCH_MICROS));

        buf.record_transmit(1000);
        assert!(!buf.can_transmit(1100));
        assert!(buf.can_transmit(1000 + LATCH_MICROS));
    }

    #[test]
    fn test_latch_tolerates_clock_wrap() {
        let mut bytes = [0u8; 3];
        let mut buf = buffer(&mut bytes, 1);

        buf.record_transmit(u32::MAX - 50);
        // counter wrapped; timestamp clamps to `now` instead of stalling
        assert!(!buf.can_transmit(100));
        assert!(buf.can_transmit(100 + LATCH_MICROS));
    }

    #[test]
    fn test_intensity_sum() {
        let mut bytes = [0u8; 2 * 3];
        let mut buf = buffer(&mut bytes, 2);
        buf.set_pixel(0, 0x0010_2030);
        assert_eq!(buf.intensity_sum(), 0x10 + 0x20 + 0x30);
    }
}
