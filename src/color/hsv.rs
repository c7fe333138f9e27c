//! Fixed-point HSV to packed-RGB conversion.

/// Convert hue, saturation and value into a packed `0x00RRGGBB` color.
///
/// `hue` is a full 16-bit value for one loop of the color wheel, so hues
/// may roll over in either direction and still do the expected thing.
/// Pure red is *centered* on the rollover point: a few values above zero
/// and a few below 65536 all yield pure red.
///
/// The result is linear, not perceptually corrected; pass it through
/// [`crate::gamma::gamma32`] if washed-out colors are a problem. The
/// white channel of the result is always 0.
pub fn color_hsv(hue: u16, sat: u8, val: u8) -> u32 {
    // Remap 0-65535 to the 1530-step hexcone. The 8-bit RGB hexcone only
    // has 1530 distinct hues (not 6*256): the last element of each
    // 256-entry slice equals the first of the next and is dropped to
    // avoid discontinuities. The +32768 centers red on the rollover.
    let hue = (u32::from(hue) * 1530 + 32768) / 65536;

    let (r, g, b): (u32, u32, u32) = if hue < 510 {
        // Red to Green-1
        if hue < 255 {
            (255, hue, 0)
        } else {
            (510 - hue, 255, 0)
        }
    } else if hue < 1020 {
        // Green to Blue-1
        if hue < 765 {
            (0, 255, hue - 510)
        } else {
            (0, 1020 - hue, 255)
        }
    } else if hue < 1530 {
        // Blue to Red-1
        if hue < 1275 {
            (hue - 1020, 0, 255)
        } else {
            (255, 0, 1530 - hue)
        }
    } else {
        // Last half-step of red, cheaper than a modulo
        (255, 0, 0)
    };

    // Apply saturation and value. The +1 offsets turn the /255 divisions
    // into >>8 shifts.
    let v1 = u32::from(val) + 1; // 1 to 256
    let s1 = u32::from(sat) + 1; // 1 to 256
    let s2 = u32::from(255 - sat); // 255 to 0

    (((((r * s1) >> 8) + s2) * v1) & 0xFF00) << 8
        | ((((g * s1) >> 8) + s2) * v1) & 0xFF00
        | (((((b * s1) >> 8) + s2) * v1) >> 8)
}
