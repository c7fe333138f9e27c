//! Shared animation patterns.
//!
//! Most built-in modes are thin parameterizations of the functions in
//! here; each takes the generator context plus the colors that
//! distinguish one mode from its siblings. Per-frame delays are u16
//! math like the segment speeds; `speed / (len * 2)` style formulas
//! assume segments shorter than 32768 pixels.

use crate::color::{WHITE, color_blend, random_wheel_index};

use super::context::EffectContext as Ctx;

/// Alternate the whole segment between two colors.
///
/// With `strobe` the on-phase is a fixed 20 ms flash; otherwise both
/// phases take half the segment speed. Reverse swaps which color is
/// the "on" one.
pub(super) fn blink(ctx: &mut Ctx, color1: u32, color2: u32, strobe: bool) -> u16 {
    if ctx.rt.counter_mode_call & 1 == 1 {
        // off phase
        let color = if ctx.is_reverse() { color1 } else { color2 };
        ctx.fill(color, ctx.seg.start, ctx.len());
        ctx.set_cycle();
        if strobe {
            ctx.seg.speed.saturating_sub(20)
        } else {
            ctx.seg.speed / 2
        }
    } else {
        // on phase
        let color = if ctx.is_reverse() { color2 } else { color1 };
        ctx.fill(color, ctx.seg.start, ctx.len());
        if strobe { 20 } else { ctx.seg.speed / 2 }
    }
}

/// Turn pixels on (`color1`) in sequence, then off (`color2`) in
/// sequence. `rev` flips the direction of the off half relative to the
/// on half.
pub(super) fn color_wipe(ctx: &mut Ctx, color1: u32, color2: u32, rev: bool) -> u16 {
    let len = u32::from(ctx.len());
    if ctx.rt.counter_mode_step < len {
        let offset = ctx.rt.counter_mode_step as u16;
        if ctx.is_reverse() {
            ctx.set_pixel(ctx.seg.stop - offset, color1);
        } else {
            ctx.set_pixel(ctx.seg.start + offset, color1);
        }
    } else {
        let offset = (ctx.rt.counter_mode_step - len) as u16;
        if ctx.is_reverse() != rev {
            ctx.set_pixel(ctx.seg.stop - offset, color2);
        } else {
            ctx.set_pixel(ctx.seg.start + offset, color2);
        }
    }

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) % (len * 2);
    if ctx.rt.counter_mode_step == 0 {
        ctx.set_cycle();
    }

    ctx.seg.speed / (ctx.len() * 2)
}

/// Run a block of pixels back and forth; `dual` runs a mirrored block
/// from the other end as well.
pub(super) fn scan(ctx: &mut Ctx, color1: u32, color2: u32, dual: bool) -> u16 {
    let size = ctx.size();
    ctx.fill(color2, ctx.seg.start, ctx.len());

    let step = ctx.rt.counter_mode_step as u16;
    for i in 0..size {
        if ctx.is_reverse() || dual {
            ctx.set_pixel(ctx.seg.stop.saturating_sub(step + i), color1);
        }
        if !ctx.is_reverse() || dual {
            ctx.set_pixel(ctx.seg.start + step + i, color1);
        }
    }

    if ctx.rt.aux == 0 {
        ctx.rt.counter_mode_step += 1;
    } else {
        ctx.rt.counter_mode_step = ctx.rt.counter_mode_step.saturating_sub(1);
    }
    if ctx.rt.counter_mode_step == 0 {
        ctx.rt.aux = 0;
        ctx.set_cycle();
    }
    if ctx.rt.counter_mode_step >= u32::from(ctx.len().saturating_sub(size)) {
        ctx.rt.aux = 1;
    }

    ctx.seg.speed / (ctx.len() * 2)
}

/// Three-color blocks marching along the segment.
pub(super) fn tricolor_chase(ctx: &mut Ctx, color1: u32, color2: u32, color3: u32) -> u16 {
    let size = ctx.size();
    let size2 = size * 2;
    let size3 = size * 3;
    let mut index = (ctx.rt.counter_mode_step as u16) % size3;
    for i in 0..ctx.len() {
        index %= size3;
        let color = if index < size {
            color1
        } else if index < size2 {
            color2
        } else {
            color3
        };
        if ctx.is_reverse() {
            ctx.set_pixel(ctx.seg.start + i, color);
        } else {
            ctx.set_pixel(ctx.seg.stop - i, color);
        }
        index += 1;
    }

    ctx.rt.counter_mode_step += 1;
    if ctx.rt.counter_mode_step % u32::from(ctx.len()) == 0 {
        ctx.set_cycle();
    }

    ctx.seg.speed / 16
}

/// Blink several random pixels (`color1`) on a background (`color2`).
pub(super) fn twinkle(ctx: &mut Ctx, color1: u32, color2: u32) -> u16 {
    if ctx.rt.counter_mode_step == 0 {
        ctx.fill(color2, ctx.seg.start, ctx.len());
        let min_leds = (ctx.len() / 4) + 1; // at least one LED on
        ctx.rt.counter_mode_step = u32::from(min_leds + ctx.rng.random16_to(min_leds));
        ctx.set_cycle();
    }

    let index = ctx.seg.start + ctx.rng.random16_to(ctx.len());
    ctx.set_pixel(index, color1);

    ctx.rt.counter_mode_step -= 1;
    ctx.seg.speed / ctx.len()
}

/// Twinkle with an afterglow: fade everything, then occasionally seed
/// a fresh dot.
pub(super) fn twinkle_fade(ctx: &mut Ctx, color: u32) -> u16 {
    ctx.fade_out();

    if ctx.rng.random8_to(3) == 0 {
        let size = ctx.size();
        let index = ctx.seg.start + ctx.rng.random16_to(ctx.len().saturating_sub(size) + 1);
        ctx.fill(color, index, size);
        ctx.set_cycle();
    }
    ctx.seg.speed / 16
}

/// One flashing dot jumping between random positions.
///
/// `color1` is the background, `color2` the sparkle; the previous
/// position is remembered in `aux3` and restored each tick.
pub(super) fn sparkle(ctx: &mut Ctx, color1: u32, color2: u32) -> u16 {
    if ctx.rt.counter_mode_step == 0 {
        ctx.fill(color1, ctx.seg.start, ctx.len());
    }

    let size = ctx.size();
    ctx.fill(color1, ctx.seg.start + ctx.rt.aux3, size);

    ctx.rt.aux3 = ctx.rng.random16_to(ctx.len().saturating_sub(size) + 1);
    ctx.fill(color2, ctx.seg.start + ctx.rt.aux3, size);

    ctx.set_cycle();
    ctx.seg.speed / 32
}

/// Three consecutive colored dots circling the segment. `color1` leads,
/// `color2` and `color3` trail at one dot-size stride each.
pub(super) fn chase(ctx: &mut Ctx, color1: u32, color2: u32, color3: u32) -> u16 {
    let size = ctx.size();
    let len = ctx.len();
    for i in 0..size {
        let a = (ctx.rt.counter_mode_step as u16 + i) % len;
        let b = (a + size) % len;
        let c = (b + size) % len;
        if ctx.is_reverse() {
            ctx.set_pixel(ctx.seg.stop - a, color1);
            ctx.set_pixel(ctx.seg.stop - b, color2);
            ctx.set_pixel(ctx.seg.stop - c, color3);
        } else {
            ctx.set_pixel(ctx.seg.start + a, color1);
            ctx.set_pixel(ctx.seg.start + b, color2);
            ctx.set_pixel(ctx.seg.start + c, color3);
        }
    }

    if ctx.rt.counter_mode_step as u16 + size * 3 == len {
        ctx.set_cycle();
    }

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) % u32::from(len);
    ctx.seg.speed / len
}

/// A pixel pair walking the segment, flashing `color2` four times at
/// every stop before moving on.
pub(super) fn chase_flash(ctx: &mut Ctx, color1: u32, color2: u32) -> u16 {
    const FLASH_COUNT: u32 = 4;
    let flash_step = ctx.rt.counter_mode_call % (FLASH_COUNT * 2 + 1);
    let len = ctx.len();

    if flash_step < FLASH_COUNT * 2 {
        let color = if flash_step % 2 == 0 { color2 } else { color1 };
        let n = ctx.rt.counter_mode_step as u16;
        let m = (n + 1) % len;
        if ctx.is_reverse() {
            ctx.set_pixel(ctx.seg.stop - n, color);
            ctx.set_pixel(ctx.seg.stop - m, color);
        } else {
            ctx.set_pixel(ctx.seg.start + n, color);
            ctx.set_pixel(ctx.seg.start + m, color);
        }
        return 30;
    }

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) % u32::from(len);
    if ctx.rt.counter_mode_step == 0 {
        // advance aux so the random variant picks its next color
        ctx.rt.aux = random_wheel_index(ctx.rng, ctx.rt.aux);
        ctx.set_cycle();
    }
    ctx.seg.speed / len
}

/// Alternating blocks of two colors scrolling along the segment.
pub(super) fn running(ctx: &mut Ctx, color1: u32, color2: u32) -> u16 {
    let size = 2 << ctx.seg.options.size();
    let color = if ctx.rt.counter_mode_step & size != 0 {
        color1
    } else {
        color2
    };

    if ctx.is_reverse() {
        ctx.copy_pixels(ctx.seg.start, ctx.seg.start + 1, ctx.len() - 1);
        ctx.set_pixel(ctx.seg.stop, color);
    } else {
        ctx.copy_pixels(ctx.seg.start + 1, ctx.seg.start, ctx.len() - 1);
        ctx.set_pixel(ctx.seg.start, color);
    }

    ctx.rt.counter_mode_step += 1;
    if ctx.rt.counter_mode_step % u32::from(ctx.len()) == 0 {
        ctx.set_cycle();
    }
    ctx.seg.speed / 16
}

/// Random bright bursts decaying through a horizontal blur.
///
/// The blur works on the raw buffer bytes, bypassing brightness
/// pre-scaling, spreading each byte's glow into its neighbors. When the
/// tick was externally triggered the seeding is dense instead of
/// stochastic.
pub(super) fn fireworks(ctx: &mut Ctx, color: u32) -> u16 {
    ctx.fade_out();

    let bpp = ctx.pixels.bytes_per_pixel();
    let start_byte = ctx.seg.start as usize * bpp + bpp;
    let stop_byte = ctx.seg.stop as usize * bpp;
    let bytes = ctx.pixels.bytes_mut();
    for i in start_byte..stop_byte.min(bytes.len().saturating_sub(bpp)) {
        let glow = u16::from(bytes[i - bpp] >> 2)
            + u16::from(bytes[i])
            + u16::from(bytes[i + bpp] >> 2);
        bytes[i] = glow.min(255) as u8;
    }

    let len = ctx.len();
    let size = 2 << ctx.seg.options.size();
    if ctx.triggered {
        // dense burst seeding on an external trigger
        for _ in 0..(len / 10).max(1) {
            let index = ctx.seg.start + ctx.rng.random16_to(len.saturating_sub(size) + 1);
            ctx.fill(color, index, size);
            ctx.set_cycle();
        }
    } else {
        for _ in 0..(len / 20).max(1) {
            if ctx.rng.random8_to(10) == 0 {
                let index = ctx.seg.start + ctx.rng.random16_to(len.saturating_sub(size) + 1);
                ctx.fill(color, index, size);
                ctx.set_cycle();
            }
        }
    }

    ctx.seg.speed / 16
}

/// Randomly dim every pixel of the first color; a smaller
/// `rev_intensity` flickers harder.
pub(super) fn fire_flicker(ctx: &mut Ctx, rev_intensity: u8) -> u16 {
    let c = crate::color::Rgbw::unpack(ctx.seg.colors[0]);
    let lum = c.luma() / rev_intensity;
    for i in ctx.seg.start..=ctx.seg.stop {
        let flicker = ctx.rng.random8_to(lum);
        ctx.set_pixel_rgbw(
            i,
            c.r.saturating_sub(flicker),
            c.g.saturating_sub(flicker),
            c.b.saturating_sub(flicker),
            c.w.saturating_sub(flicker),
        );
    }

    ctx.set_cycle();
    ctx.seg.speed / ctx.len()
}

/// Triangle-wave blend between two colors across the segment, used by
/// the fade and breath modes. Returns the current blend level.
pub(super) fn fade_level(ctx: &mut Ctx, step_size: u32) -> u8 {
    let mut lum = ctx.rt.counter_mode_step;
    if lum > 255 {
        lum = 511 - lum; // triangle: 0 -> 255 -> 0
    }
    ctx.rt.counter_mode_step += step_size;
    if ctx.rt.counter_mode_step > 511 {
        ctx.rt.counter_mode_step = 0;
        ctx.set_cycle();
    }
    lum as u8
}

/// Fill the segment with a blend of its two primary colors.
pub(super) fn fill_blend(ctx: &mut Ctx, level: u8) {
    let color = color_blend(ctx.seg.colors[1], ctx.seg.colors[0], level);
    ctx.fill(color, ctx.seg.start, ctx.len());
}

/// Flash-sparkle core shared by the flash/hyper variants: white flashes
/// over a solid background, firing `threshold` times out of 5 with
/// `flashes` simultaneous dots.
pub(super) fn flash_sparkle(ctx: &mut Ctx, flashes: u16, threshold: u8) -> u16 {
    if ctx.rt.counter_mode_call == 0 {
        ctx.fill(ctx.seg.colors[0], ctx.seg.start, ctx.len());
    }

    let size = ctx.size();
    ctx.fill(ctx.seg.colors[0], ctx.seg.start + ctx.rt.aux3, size);

    if ctx.rng.random8_to(5) < threshold {
        for _ in 0..flashes {
            ctx.rt.aux3 = ctx.rng.random16_to(ctx.len().saturating_sub(size) + 1);
            ctx.fill(WHITE, ctx.seg.start + ctx.rt.aux3, size);
        }
        ctx.set_cycle();
        return 20;
    }
    ctx.seg.speed
}
