mod tests {
    use segfx::color::{
        BLACK, BLUE, RED, Rgbw, WHITE, color_blend, color_hsv, color_wheel, random_wheel_index,
    };
    use segfx::gamma::{gamma8, gamma32, sine8};
    use segfx::order::ColorOrder;
    use segfx::prng::Rand16;

    #[test]
    fn test_color_wheel_primaries() {
        assert_eq!(color_wheel(0), 0x00FF_0000);
        assert_eq!(color_wheel(85), 0x0000_FF00);
        assert_eq!(color_wheel(170), 0x0000_00FF);
    }

    #[test]
    fn test_color_wheel_transition() {
        // one step off pure red starts blending towards green
        assert_eq!(color_wheel(1), 0x00FC_0300);
        // every position has at most two lit channels
        for pos in 0..=255u8 {
            let c = color_wheel(pos);
            let lit = [c >> 16 & 0xFF, c >> 8 & 0xFF, c & 0xFF]
                .iter()
                .filter(|&&ch| ch != 0)
                .count();
            assert!(lit <= 2, "wheel({pos}) = {c:#08x}");
        }
    }

    #[test]
    fn test_color_blend() {
        assert_eq!(color_blend(RED, BLUE, 0), RED);
        assert_eq!(color_blend(RED, BLUE, 255), BLUE);
        assert_eq!(color_blend(RED, BLUE, 128), 0x0080_007F);
        assert_eq!(color_blend(BLACK, WHITE, 128), 0x007F_7F7F);
    }

    #[test]
    fn test_random_wheel_index_distance() {
        let mut rng = Rand16::new(1234);
        let mut pos = 0u8;
        for _ in 0..100 {
            let next = random_wheel_index(&mut rng, pos);
            let x = if pos > next { pos - next } else { next - pos };
            let d = x.min(255 - x);
            assert!(d >= 42, "distance {d} from {pos} to {next}");
            pos = next;
        }
    }

    #[test]
    fn test_color_hsv_anchors() {
        assert_eq!(color_hsv(0, 255, 255), 0x00FF_0000); // red
        assert_eq!(color_hsv(32768, 255, 255), 0x0000_FFFF); // cyan
        assert_eq!(color_hsv(0, 0, 255), 0x00FF_FFFF); // no saturation -> white
        assert_eq!(color_hsv(32768, 255, 0), 0x0000_0000); // no value -> black
    }

    #[test]
    fn test_color_hsv_hue_rollover() {
        // red is centered on the rollover: both ends of the hue range
        // produce pure red
        assert_eq!(color_hsv(65535, 255, 255), 0x00FF_0000);
        assert_eq!(color_hsv(1, 255, 255), 0x00FF_0000);
    }

    #[test]
    fn test_gamma8_endpoints_and_monotonic() {
        assert_eq!(gamma8(0), 0);
        assert_eq!(gamma8(255), 255);
        for x in 1..=255u8 {
            assert!(gamma8(x) >= gamma8(x - 1));
        }
    }

    #[test]
    fn test_gamma32_applies_per_byte() {
        assert_eq!(gamma32(0xFFFF_FFFF), 0xFFFF_FFFF);
        let c = 0x2040_80C0;
        let expected = (u32::from(gamma8(0x20)) << 24)
            | (u32::from(gamma8(0x40)) << 16)
            | (u32::from(gamma8(0x80)) << 8)
            | u32::from(gamma8(0xC0));
        assert_eq!(gamma32(c), expected);
    }

    #[test]
    fn test_sine8_anchors() {
        assert_eq!(sine8(0), 128);
        assert_eq!(sine8(64), 255);
        assert_eq!(sine8(128), 128);
        assert_eq!(sine8(192), 0);
    }

    #[test]
    fn test_order_from_str() {
        assert_eq!(ColorOrder::from_str("GRB"), ColorOrder::GRB);
        assert_eq!(ColorOrder::from_str("grb"), ColorOrder::GRB);
        assert_eq!(ColorOrder::from_str("rgbw"), ColorOrder::RGBW);
        assert_eq!(ColorOrder::GRB.bytes_per_pixel(), 3);
        assert_eq!(ColorOrder::GRBW.bytes_per_pixel(), 4);
        assert!(ColorOrder::GRBW.has_white());
        assert!(!ColorOrder::GRB.has_white());
    }

    #[test]
    fn test_order_malformed_degrades_gracefully() {
        // unknown characters leave offsets at zero instead of faulting
        let order = ColorOrder::from_str("qqq");
        assert_eq!(order.bytes_per_pixel(), 3);
    }

    #[test]
    fn test_order_code_roundtrip() {
        for order in [
            ColorOrder::RGB,
            ColorOrder::GRB,
            ColorOrder::BGR,
            ColorOrder::GRBW,
            ColorOrder::WRGB,
        ] {
            assert_eq!(ColorOrder::from_code(order.code()), order);
        }
    }

    #[test]
    fn test_rgbw_pack_unpack() {
        let c = Rgbw::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.pack(), 0x4411_2233);
        assert_eq!(Rgbw::unpack(0x4411_2233), c);
        assert_eq!(c.luma(), 0x44);
    }
}
