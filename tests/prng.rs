mod tests {
    use segfx::prng::Rand16;

    #[test]
    fn test_known_sequence_from_zero_seed() {
        // seed 0: state -> 13849 -> 3222
        let mut rng = Rand16::new(0);
        assert_eq!(rng.random8(), 79);
        assert_eq!(rng.random8(), 162);
    }

    #[test]
    fn test_determinism() {
        let mut a = Rand16::new(4242);
        let mut b = Rand16::new(4242);
        for _ in 0..1000 {
            assert_eq!(a.random8(), b.random8());
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut rng = Rand16::new(7);
        let first = rng.random16();
        rng.random16();
        rng.random16();
        rng.reseed(7);
        assert_eq!(rng.random16(), first);
    }

    #[test]
    fn test_bounded_draws_stay_in_range() {
        let mut rng = Rand16::new(1);
        for _ in 0..1000 {
            assert!(rng.random8_to(10) < 10);
            assert!(rng.random16_to(100) < 100);
            let r = rng.random8_range(5, 10);
            assert!((5..10).contains(&r));
        }
    }

    #[test]
    fn test_random16_folds_two_bytes() {
        let mut a = Rand16::new(99);
        let mut b = Rand16::new(99);
        let hi = b.random8();
        let lo = b.random8();
        assert_eq!(a.random16(), u16::from(hi) * 256 + u16::from(lo));
    }
}
