//! Built-in effect generators.
//!
//! Each function advances one active segment by a single frame and
//! returns the delay in milliseconds until the next invocation. The
//! scheduler clamps the returned delay to the minimum speed, so `0`
//! means "as fast as possible".

use libm::sqrtf;

use crate::color::{
    BLACK, BLUE, GREEN, ORANGE, PURPLE, RED, WHITE, color_blend, color_wheel, random_wheel_index,
};
use crate::gamma::sine8;
use crate::segment::MAX_COLORS;

use super::context::EffectContext as Ctx;
use super::helpers;

pub(crate) fn static_color(ctx: &mut Ctx) -> u16 {
    ctx.fill(ctx.seg.colors[0], ctx.seg.start, ctx.len());
    ctx.set_cycle();
    ctx.seg.speed
}

pub(crate) fn blink(ctx: &mut Ctx) -> u16 {
    helpers::blink(ctx, ctx.seg.colors[0], ctx.seg.colors[1], false)
}

/// Does the "standby breathing" of well known i-Devices.
pub(crate) fn breath(ctx: &mut Ctx) -> u16 {
    let mut lum = ctx.rt.counter_mode_step;
    if lum > 255 {
        lum = 511 - lum; // lum = 15 -> 255 -> 15
    }

    let delay = match lum {
        15 => 970, // the plateau of the closed eye
        0..=25 => 38,
        26..=50 => 36,
        51..=75 => 28,
        76..=100 => 20,
        101..=125 => 14,
        126..=150 => 11,
        _ => 10,
    };

    let color = color_blend(ctx.seg.colors[1], ctx.seg.colors[0], lum as u8);
    ctx.fill(color, ctx.seg.start, ctx.len());

    ctx.rt.counter_mode_step += 2;
    if ctx.rt.counter_mode_step > (512 - 15) {
        ctx.rt.counter_mode_step = 15;
        ctx.set_cycle();
    }
    delay
}

pub(crate) fn color_wipe(ctx: &mut Ctx) -> u16 {
    helpers::color_wipe(ctx, ctx.seg.colors[0], ctx.seg.colors[1], false)
}

pub(crate) fn color_wipe_inverse(ctx: &mut Ctx) -> u16 {
    helpers::color_wipe(ctx, ctx.seg.colors[1], ctx.seg.colors[0], false)
}

pub(crate) fn color_wipe_reverse(ctx: &mut Ctx) -> u16 {
    helpers::color_wipe(ctx, ctx.seg.colors[0], ctx.seg.colors[1], true)
}

pub(crate) fn color_wipe_reverse_inverse(ctx: &mut Ctx) -> u16 {
    helpers::color_wipe(ctx, ctx.seg.colors[1], ctx.seg.colors[0], true)
}

/// Turns all LEDs on in a random color, then wipes to black.
pub(crate) fn color_wipe_random(ctx: &mut Ctx) -> u16 {
    if ctx.rt.counter_mode_step % u32::from(ctx.len()) == 0 {
        // aux stores the random color wheel index
        ctx.rt.aux = random_wheel_index(ctx.rng, ctx.rt.aux);
    }
    let color = color_wheel(ctx.rt.aux);
    helpers::color_wipe(ctx, color, color, false) * 2
}

/// Lights all LEDs in one random color, then switches to the next.
pub(crate) fn random_color(ctx: &mut Ctx) -> u16 {
    ctx.rt.aux = random_wheel_index(ctx.rng, ctx.rt.aux);
    ctx.fill(color_wheel(ctx.rt.aux), ctx.seg.start, ctx.len());
    ctx.set_cycle();
    ctx.seg.speed
}

/// Lights every LED in a random color, changing one LED at a time.
pub(crate) fn single_dynamic(ctx: &mut Ctx) -> u16 {
    if ctx.rt.counter_mode_call == 0 {
        for i in ctx.seg.start..=ctx.seg.stop {
            let r = ctx.rng.random8();
            ctx.set_pixel(i, color_wheel(r));
        }
    }

    let index = ctx.seg.start + ctx.rng.random16_to(ctx.len());
    let r = ctx.rng.random8();
    ctx.set_pixel(index, color_wheel(r));
    ctx.set_cycle();
    ctx.seg.speed
}

/// Lights every LED in a random color, changing all LEDs at once.
pub(crate) fn multi_dynamic(ctx: &mut Ctx) -> u16 {
    for i in ctx.seg.start..=ctx.seg.stop {
        let r = ctx.rng.random8();
        ctx.set_pixel(i, color_wheel(r));
    }
    ctx.set_cycle();
    ctx.seg.speed
}

/// Cycles all LEDs at once through the color wheel.
pub(crate) fn rainbow(ctx: &mut Ctx) -> u16 {
    let color = color_wheel(ctx.rt.counter_mode_step as u8);
    ctx.fill(color, ctx.seg.start, ctx.len());

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) & 0xFF;
    if ctx.rt.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.seg.speed / 256
}

/// Distributes the color wheel across the segment and rotates it.
pub(crate) fn rainbow_cycle(ctx: &mut Ctx) -> u16 {
    let len = ctx.len();
    for i in 0..len {
        let pos = (u32::from(i) * 256 / u32::from(len) + ctx.rt.counter_mode_step) & 0xFF;
        ctx.set_pixel(ctx.seg.start + i, color_wheel(pos as u8));
    }

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) & 0xFF;
    if ctx.rt.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.seg.speed / 256
}

pub(crate) fn scan(ctx: &mut Ctx) -> u16 {
    helpers::scan(ctx, ctx.seg.colors[0], ctx.seg.colors[1], false)
}

pub(crate) fn dual_scan(ctx: &mut Ctx) -> u16 {
    helpers::scan(ctx, ctx.seg.colors[0], ctx.seg.colors[1], true)
}

/// Fades the whole segment between its two primary colors.
pub(crate) fn fade(ctx: &mut Ctx) -> u16 {
    let lum = helpers::fade_level(ctx, 4);
    helpers::fill_blend(ctx, lum);
    ctx.seg.speed / 128
}

pub(crate) fn theater_chase(ctx: &mut Ctx) -> u16 {
    helpers::tricolor_chase(ctx, ctx.seg.colors[0], ctx.seg.colors[1], ctx.seg.colors[1])
}

pub(crate) fn theater_chase_rainbow(ctx: &mut Ctx) -> u16 {
    let color = color_wheel((ctx.rt.counter_mode_call % 256) as u8);
    helpers::tricolor_chase(ctx, color, BLACK, BLACK)
}

/// Sine-modulated bands of color drifting along the segment.
pub(crate) fn running_lights(ctx: &mut Ctx) -> u16 {
    let len = ctx.len();
    let size = ctx.size();
    let sine_incr = ((256 / len).max(1) * size) as u8;
    for i in 0..len {
        let lum = sine8(((i + ctx.rt.counter_mode_step as u16).wrapping_mul(u16::from(
            sine_incr,
        )) & 0xFF) as u8);
        let color = color_blend(ctx.seg.colors[0], ctx.seg.colors[1], lum);
        if ctx.is_reverse() {
            ctx.set_pixel(ctx.seg.start + i, color);
        } else {
            ctx.set_pixel(ctx.seg.stop - i, color);
        }
    }

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) % 256;
    if ctx.rt.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.seg.speed / len
}

pub(crate) fn twinkle(ctx: &mut Ctx) -> u16 {
    helpers::twinkle(ctx, ctx.seg.colors[0], ctx.seg.colors[1])
}

pub(crate) fn twinkle_random(ctx: &mut Ctx) -> u16 {
    let r = ctx.rng.random8();
    helpers::twinkle(ctx, color_wheel(r), ctx.seg.colors[1])
}

pub(crate) fn twinkle_fade(ctx: &mut Ctx) -> u16 {
    helpers::twinkle_fade(ctx, ctx.seg.colors[0])
}

pub(crate) fn twinkle_fade_random(ctx: &mut Ctx) -> u16 {
    let r = ctx.rng.random8();
    helpers::twinkle_fade(ctx, color_wheel(r))
}

pub(crate) fn sparkle(ctx: &mut Ctx) -> u16 {
    helpers::sparkle(ctx, ctx.seg.colors[1], ctx.seg.colors[0])
}

pub(crate) fn flash_sparkle(ctx: &mut Ctx) -> u16 {
    helpers::flash_sparkle(ctx, 1, 1)
}

pub(crate) fn hyper_sparkle(ctx: &mut Ctx) -> u16 {
    let flashes = (ctx.len() / 3).max(1);
    helpers::flash_sparkle(ctx, flashes, 2)
}

pub(crate) fn strobe(ctx: &mut Ctx) -> u16 {
    helpers::blink(ctx, ctx.seg.colors[0], ctx.seg.colors[1], true)
}

pub(crate) fn strobe_rainbow(ctx: &mut Ctx) -> u16 {
    let color = color_wheel((ctx.rt.counter_mode_call & 0xFF) as u8);
    helpers::blink(ctx, color, ctx.seg.colors[1], true)
}

/// Strobe with a configurable flash count derived from the speed.
pub(crate) fn multi_strobe(ctx: &mut Ctx) -> u16 {
    ctx.fill(ctx.seg.colors[1], ctx.seg.start, ctx.len());

    let mut delay = 200 + ((9 - (ctx.seg.speed % 10)) * 100);
    let count = u32::from(2 * ((ctx.seg.speed / 100) + 1));
    if ctx.rt.counter_mode_step < count {
        if ctx.rt.counter_mode_step & 1 == 0 {
            ctx.fill(ctx.seg.colors[0], ctx.seg.start, ctx.len());
            delay = 20;
        } else {
            delay = 50;
        }
    }

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) % (count + 1);
    if ctx.rt.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    delay
}

pub(crate) fn blink_rainbow(ctx: &mut Ctx) -> u16 {
    let color = color_wheel((ctx.rt.counter_mode_call & 0xFF) as u8);
    helpers::blink(ctx, color, ctx.seg.colors[1], false)
}

pub(crate) fn chase_white(ctx: &mut Ctx) -> u16 {
    helpers::chase(ctx, WHITE, ctx.seg.colors[0], ctx.seg.colors[0])
}

pub(crate) fn chase_color(ctx: &mut Ctx) -> u16 {
    helpers::chase(ctx, ctx.seg.colors[0], WHITE, WHITE)
}

pub(crate) fn chase_random(ctx: &mut Ctx) -> u16 {
    if ctx.rt.counter_mode_step == 0 {
        ctx.rt.aux = random_wheel_index(ctx.rng, ctx.rt.aux);
    }
    helpers::chase(ctx, color_wheel(ctx.rt.aux), WHITE, WHITE)
}

pub(crate) fn chase_rainbow(ctx: &mut Ctx) -> u16 {
    let color_sep = 256 / u32::from(ctx.len());
    let color_index = ctx.rt.counter_mode_call & 0xFF;
    let color = color_wheel(((ctx.rt.counter_mode_step * color_sep + color_index) & 0xFF) as u8);
    helpers::chase(ctx, color, WHITE, WHITE)
}

pub(crate) fn chase_flash(ctx: &mut Ctx) -> u16 {
    helpers::chase_flash(ctx, ctx.seg.colors[0], WHITE)
}

pub(crate) fn chase_flash_random(ctx: &mut Ctx) -> u16 {
    helpers::chase_flash(ctx, color_wheel(ctx.rt.aux), WHITE)
}

/// White background, rainbow pixel pair.
pub(crate) fn chase_rainbow_white(ctx: &mut Ctx) -> u16 {
    let len = u32::from(ctx.len());
    let n = ctx.rt.counter_mode_step;
    let m = (n + 1) % len;
    let call = ctx.rt.counter_mode_call & 0xFF;
    let color2 = color_wheel(((n * 256 / len + call) & 0xFF) as u8);
    let color3 = color_wheel(((m * 256 / len + call) & 0xFF) as u8);
    helpers::chase(ctx, WHITE, color2, color3)
}

pub(crate) fn chase_blackout(ctx: &mut Ctx) -> u16 {
    helpers::chase(ctx, ctx.seg.colors[0], BLACK, BLACK)
}

pub(crate) fn chase_blackout_rainbow(ctx: &mut Ctx) -> u16 {
    let len = u32::from(ctx.len());
    let call = ctx.rt.counter_mode_call & 0xFF;
    let color =
        color_wheel(((ctx.rt.counter_mode_step * 256 / len + call) & 0xFF) as u8);
    helpers::chase(ctx, color, BLACK, BLACK)
}

/// Like the random wipe but erasing in reverse.
pub(crate) fn color_sweep_random(ctx: &mut Ctx) -> u16 {
    if ctx.rt.counter_mode_step % u32::from(ctx.len()) == 0 {
        ctx.rt.aux = random_wheel_index(ctx.rng, ctx.rt.aux);
    }
    let color = color_wheel(ctx.rt.aux);
    helpers::color_wipe(ctx, color, color, true) * 2
}

pub(crate) fn running_color(ctx: &mut Ctx) -> u16 {
    helpers::running(ctx, ctx.seg.colors[0], ctx.seg.colors[1])
}

pub(crate) fn running_red_blue(ctx: &mut Ctx) -> u16 {
    helpers::running(ctx, RED, BLUE)
}

pub(crate) fn running_random(ctx: &mut Ctx) -> u16 {
    let size = u32::from(2u16 << ctx.seg.options.size());
    if ctx.rt.counter_mode_step % size == 0 {
        ctx.rt.aux = random_wheel_index(ctx.rng, ctx.rt.aux);
    }
    let color = color_wheel(ctx.rt.aux);
    helpers::running(ctx, color, color)
}

/// K.I.T.T.
pub(crate) fn larson_scanner(ctx: &mut Ctx) -> u16 {
    ctx.fade_out();

    let len = ctx.len();
    let index = if ctx.rt.counter_mode_step < u32::from(len) {
        ctx.rt.counter_mode_step as u16
    } else {
        (u32::from(len) * 2)
            .saturating_sub(ctx.rt.counter_mode_step)
            .saturating_sub(2) as u16
    };
    if ctx.is_reverse() {
        ctx.set_pixel(ctx.seg.stop - index, ctx.seg.colors[0]);
    } else {
        ctx.set_pixel(ctx.seg.start + index, ctx.seg.colors[0]);
    }

    ctx.rt.counter_mode_step += 1;
    if ctx.rt.counter_mode_step >= u32::from(len) * 2 - 2 {
        ctx.rt.counter_mode_step = 0;
        ctx.set_cycle();
    }
    ctx.seg.speed / (len * 2)
}

pub(crate) fn comet(ctx: &mut Ctx) -> u16 {
    ctx.fade_out();

    let index = ctx.rt.counter_mode_step as u16;
    if ctx.is_reverse() {
        ctx.set_pixel(ctx.seg.stop - index, ctx.seg.colors[0]);
    } else {
        ctx.set_pixel(ctx.seg.start + index, ctx.seg.colors[0]);
    }

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) % u32::from(ctx.len());
    if ctx.rt.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.seg.speed / ctx.len()
}

pub(crate) fn fireworks(ctx: &mut Ctx) -> u16 {
    helpers::fireworks(ctx, ctx.seg.colors[0])
}

pub(crate) fn fireworks_random(ctx: &mut Ctx) -> u16 {
    let r = ctx.rng.random8();
    helpers::fireworks(ctx, color_wheel(r))
}

pub(crate) fn merry_christmas(ctx: &mut Ctx) -> u16 {
    helpers::running(ctx, RED, GREEN)
}

pub(crate) fn fire_flicker(ctx: &mut Ctx) -> u16 {
    helpers::fire_flicker(ctx, 3)
}

pub(crate) fn fire_flicker_soft(ctx: &mut Ctx) -> u16 {
    helpers::fire_flicker(ctx, 6)
}

pub(crate) fn fire_flicker_intense(ctx: &mut Ctx) -> u16 {
    helpers::fire_flicker(ctx, 1)
}

pub(crate) fn circus_combustus(ctx: &mut Ctx) -> u16 {
    helpers::tricolor_chase(ctx, RED, WHITE, BLACK)
}

pub(crate) fn halloween(ctx: &mut Ctx) -> u16 {
    helpers::running(ctx, PURPLE, ORANGE)
}

pub(crate) fn bicolor_chase(ctx: &mut Ctx) -> u16 {
    helpers::chase(ctx, ctx.seg.colors[0], ctx.seg.colors[1], ctx.seg.colors[2])
}

pub(crate) fn tricolor_chase(ctx: &mut Ctx) -> u16 {
    helpers::tricolor_chase(ctx, ctx.seg.colors[0], ctx.seg.colors[1], ctx.seg.colors[2])
}

/// Mark Kriegsman's per-pixel deterministic twinkle: a throwaway LCG
/// gives every other pixel its own blend phase and increment.
pub(crate) fn twinkle_fox(ctx: &mut Ctx) -> u16 {
    let mut seed: u16 = 0;
    let color0 = ctx.seg.colors[0];
    let color1 = ctx.seg.colors[1];
    let color2 = ctx.seg.colors[2];

    let mut i = ctx.seg.start;
    while i <= ctx.seg.stop {
        seed = seed.wrapping_mul(2053).wrapping_add(13849);
        let init_value = ((seed + (seed >> 8)) & 0xFF) as u8;
        seed = seed.wrapping_mul(2053).wrapping_add(13849);
        let incr_value = ((((seed + (seed >> 8)) & 0x07) + 1) * 2) as u32;

        let blend_index = (u32::from(init_value) + ctx.rt.counter_mode_call * incr_value) & 0xFF;
        let blend_amt = sine8(blend_index as u8);

        let blended = if color2 == BLACK {
            color_blend(color_wheel(init_value), color0, blend_amt)
        } else if init_value < 128 {
            color_blend(color1, color0, blend_amt)
        } else {
            color_blend(color2, color0, blend_amt)
        };

        ctx.set_pixel(i, blended);
        ctx.set_pixel(i + 1, blended);
        i += 2;
    }
    ctx.seg.speed / 32
}

/// Twinkle-fade plus a two-pixel drift, like rain on a window.
pub(crate) fn rain(ctx: &mut Ctx) -> u16 {
    let r = ctx.rng.random8();
    let mut rain_color = if r & 1 == 0 {
        ctx.seg.colors[0]
    } else {
        ctx.seg.colors[2]
    };
    if ctx.seg.colors[0] == ctx.seg.colors[1] {
        let r = ctx.rng.random8();
        rain_color = color_wheel(r);
    }

    helpers::twinkle_fade(ctx, rain_color);

    // shift everything two pixels
    let count = ctx.len().saturating_sub(2);
    if ctx.is_reverse() {
        ctx.copy_pixels(ctx.seg.start, ctx.seg.start + 2, count);
    } else {
        ctx.copy_pixels(ctx.seg.start + 2, ctx.seg.start, count);
    }

    ctx.seg.speed / 16
}

/// Paints random pixels in the current color until the segment is
/// saturated, then moves to the next color.
pub(crate) fn block_dissolve(ctx: &mut Ctx) -> u16 {
    let color = ctx.seg.colors[usize::from(ctx.rt.aux) % MAX_COLORS];
    let index = ctx.seg.start + ctx.rng.random16_to(ctx.len());
    ctx.set_pixel(index, color);

    ctx.rt.counter_mode_step += 1;
    if ctx.rt.counter_mode_step > u32::from(ctx.len()) * 2 {
        ctx.rt.counter_mode_step = 0;
        ctx.rt.aux = (ctx.rt.aux + 1) % MAX_COLORS as u8;
        ctx.set_cycle();
    }
    ctx.seg.speed / ctx.len()
}

/// Two "eyes" that dart around and occasionally blink.
pub(crate) fn icu(ctx: &mut Ctx) -> u16 {
    let half = ctx.len() / 2;
    let mut dest = ctx.rt.counter_mode_step as u16;

    ctx.set_pixel(ctx.seg.start + dest, ctx.seg.colors[0]);
    ctx.set_pixel(ctx.seg.start + dest + half, ctx.seg.colors[0]);

    if ctx.rt.aux3 == dest {
        // pause between eye movements
        if ctx.rng.random8_to(6) == 0 {
            // blink once in a while
            ctx.set_pixel(ctx.seg.start + dest, BLACK);
            ctx.set_pixel(ctx.seg.start + dest + half, BLACK);
            return 200;
        }
        ctx.rt.aux3 = ctx.rng.random16_to(half);
        ctx.set_cycle();
        return 1000 + ctx.rng.random16_to(2000);
    }

    ctx.set_pixel(ctx.seg.start + dest, BLACK);
    ctx.set_pixel(ctx.seg.start + dest + half, BLACK);

    if u32::from(ctx.rt.aux3) > ctx.rt.counter_mode_step {
        ctx.rt.counter_mode_step += 1;
        dest += 1;
    } else {
        ctx.rt.counter_mode_step -= 1;
        dest -= 1;
    }

    ctx.set_pixel(ctx.seg.start + dest, ctx.seg.colors[0]);
    ctx.set_pixel(ctx.seg.start + dest + half, ctx.seg.colors[0]);

    ctx.seg.speed / ctx.len()
}

/// Larson scanners running from both ends at once.
pub(crate) fn dual_larson(ctx: &mut Ctx) -> u16 {
    ctx.fade_out();

    let index = ctx.rt.counter_mode_step as u16;
    let color2 = if ctx.seg.colors[2] == BLACK {
        ctx.seg.colors[0]
    } else {
        ctx.seg.colors[2]
    };
    ctx.set_pixel(ctx.seg.start + index, ctx.seg.colors[0]);
    ctx.set_pixel(ctx.seg.stop - index, color2);

    if ctx.rt.aux == 0 {
        ctx.rt.counter_mode_step += 1;
    } else {
        ctx.rt.counter_mode_step = ctx.rt.counter_mode_step.saturating_sub(1);
    }
    if ctx.rt.counter_mode_step == 0 || ctx.rt.counter_mode_step >= u32::from(ctx.len() - 1) {
        ctx.rt.aux = u8::from(ctx.rt.aux == 0);
        ctx.set_cycle();
    }

    ctx.seg.speed / (ctx.len() * 2)
}

/// Running effect with freshly rolled colors and occasional gaps.
pub(crate) fn running_random2(ctx: &mut Ctx) -> u16 {
    let size = u32::from(2u16 << ctx.seg.options.size());
    if ctx.rt.counter_mode_step % size == 0 {
        ctx.rt.aux = ctx.rng.random8();
    }
    let color = if ctx.rt.aux < 64 {
        BLACK
    } else {
        color_wheel(ctx.rt.aux)
    };
    helpers::running(ctx, color, color)
}

/// A drop falls from the far end and stacks up at the near end until
/// the segment is full.
pub(crate) fn filler_up(ctx: &mut Ctx) -> u16 {
    let len = ctx.len();
    let filled = ctx.rt.aux3.min(len);

    ctx.fill(ctx.seg.colors[1], ctx.seg.start, len);
    if filled > 0 {
        if ctx.is_reverse() {
            ctx.fill(ctx.seg.colors[0], ctx.seg.start, filled);
        } else {
            ctx.fill(ctx.seg.colors[0], ctx.seg.stop + 1 - filled, filled);
        }
    }

    let drop = ctx.rt.counter_mode_step as u16;
    if ctx.is_reverse() {
        ctx.set_pixel(ctx.seg.stop - drop, ctx.seg.colors[0]);
    } else {
        ctx.set_pixel(ctx.seg.start + drop, ctx.seg.colors[0]);
    }

    ctx.rt.counter_mode_step += 1;
    if ctx.rt.counter_mode_step >= u32::from(len - filled) {
        ctx.rt.counter_mode_step = 0;
        ctx.rt.aux3 += 1;
        if ctx.rt.aux3 >= len {
            ctx.rt.aux3 = 0;
            ctx.set_cycle();
        }
    }

    ctx.seg.speed / len
}

/// Larson scanner cycling through the color wheel.
pub(crate) fn rainbow_larson(ctx: &mut Ctx) -> u16 {
    ctx.fade_out();

    let len = ctx.len();
    let index = if ctx.rt.counter_mode_step < u32::from(len) {
        ctx.rt.counter_mode_step as u16
    } else {
        (u32::from(len) * 2)
            .saturating_sub(ctx.rt.counter_mode_step)
            .saturating_sub(2) as u16
    };
    let color = color_wheel((ctx.rt.counter_mode_call & 0xFF) as u8);
    if ctx.is_reverse() {
        ctx.set_pixel(ctx.seg.stop - index, color);
    } else {
        ctx.set_pixel(ctx.seg.start + index, color);
    }

    ctx.rt.counter_mode_step += 1;
    if ctx.rt.counter_mode_step >= u32::from(len) * 2 - 2 {
        ctx.rt.counter_mode_step = 0;
        ctx.set_cycle();
    }
    ctx.seg.speed / (len * 2)
}

pub(crate) fn rainbow_fireworks(ctx: &mut Ctx) -> u16 {
    let color = color_wheel((ctx.rt.counter_mode_call & 0xFF) as u8);
    helpers::fireworks(ctx, color)
}

/// Fades through all three segment colors in turn.
pub(crate) fn trifade(ctx: &mut Ctx) -> u16 {
    let phase = usize::from(ctx.rt.aux) % MAX_COLORS;
    let from = ctx.seg.colors[phase];
    let to = ctx.seg.colors[(phase + 1) % MAX_COLORS];

    let color = color_blend(from, to, ctx.rt.counter_mode_step as u8);
    ctx.fill(color, ctx.seg.start, ctx.len());

    ctx.rt.counter_mode_step += 4;
    if ctx.rt.counter_mode_step > 255 {
        ctx.rt.counter_mode_step = 0;
        ctx.rt.aux = ((usize::from(ctx.rt.aux) + 1) % MAX_COLORS) as u8;
        if ctx.rt.aux == 0 {
            ctx.set_cycle();
        }
    }
    ctx.seg.speed / 128
}

/// Renders external data as level bars; each byte of the external
/// slice is one bar's level (0-255).
pub(crate) fn vu_meter(ctx: &mut Ctx) -> u16 {
    let Some(data) = ctx.rt.ext_data else {
        return ctx.seg.speed;
    };
    let bars = data.len() as u16;
    if bars == 0 {
        return ctx.seg.speed;
    }

    let len = ctx.len();
    let bar_len = (len / bars).max(1);
    for bar in 0..bars.min(len) {
        let level = u32::from(data[usize::from(bar)]);
        let lit = (level * u32::from(bar_len) / 256) as u16;
        let base = ctx.seg.start + bar * bar_len;
        if base > ctx.seg.stop {
            break;
        }
        for i in 0..bar_len {
            let color = if i < lit {
                ctx.seg.colors[0]
            } else {
                ctx.seg.colors[1]
            };
            ctx.set_pixel(base + i, color);
        }
    }

    ctx.set_cycle();
    ctx.seg.speed / 16
}

/// Classic lub-dub double pulse with a decaying afterglow.
pub(crate) fn heartbeat(ctx: &mut Ctx) -> u16 {
    ctx.fade_out();

    let delay = match ctx.rt.counter_mode_step {
        0 => {
            // first thump
            ctx.fill(ctx.seg.colors[0], ctx.seg.start, ctx.len());
            ctx.seg.speed / 6
        }
        1 => ctx.seg.speed / 6,
        2 => {
            // weaker second thump
            let color = color_blend(ctx.seg.colors[1], ctx.seg.colors[0], 192);
            ctx.fill(color, ctx.seg.start, ctx.len());
            ctx.seg.speed / 6
        }
        _ => {
            // rest until the next beat
            ctx.set_cycle();
            ctx.seg.speed / 2
        }
    };

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) % 4;
    delay
}

/// Random blocks toggling between the two primary colors.
pub(crate) fn bits(ctx: &mut Ctx) -> u16 {
    let size = ctx.size();
    let blocks = (ctx.len() / size).max(1);

    let block = ctx.rng.random16_to(blocks);
    let bit = ctx.rng.random8() & 1;
    let color = if bit == 0 {
        ctx.seg.colors[0]
    } else {
        ctx.seg.colors[1]
    };
    ctx.fill(color, ctx.seg.start + block * size, size);

    if ctx.rt.counter_mode_call % u32::from(blocks) == 0 {
        ctx.set_cycle();
    }
    ctx.seg.speed / 16
}

/// Three comets spaced a third of the segment apart.
pub(crate) fn multi_comet(ctx: &mut Ctx) -> u16 {
    ctx.fade_out();

    let len = ctx.len();
    let spacing = (len / 3).max(1);
    for k in 0..3u16 {
        let pos = (ctx.rt.counter_mode_step as u16 + k * spacing) % len;
        let color = match ctx.seg.colors[usize::from(k) % MAX_COLORS] {
            BLACK => ctx.seg.colors[0],
            c => c,
        };
        if ctx.is_reverse() {
            ctx.set_pixel(ctx.seg.stop - pos, color);
        } else {
            ctx.set_pixel(ctx.seg.start + pos, color);
        }
    }

    ctx.rt.counter_mode_step = (ctx.rt.counter_mode_step + 1) % u32::from(len);
    if ctx.rt.counter_mode_step == 0 {
        ctx.set_cycle();
    }
    ctx.seg.speed / len
}

/// Plays external data as animation frames; each page is `len` pixels
/// of packed RGB bytes.
pub(crate) fn flipbook(ctx: &mut Ctx) -> u16 {
    let Some(data) = ctx.rt.ext_data else {
        return ctx.seg.speed;
    };
    let len = usize::from(ctx.len());
    let page_size = len * 3;
    let pages = data.len() / page_size;
    if pages == 0 {
        return ctx.seg.speed;
    }

    let page = ctx.rt.counter_mode_step as usize % pages;
    for i in 0..len {
        let o = page * page_size + i * 3;
        ctx.set_pixel_rgbw(ctx.seg.start + i as u16, data[o], data[o + 1], data[o + 2], 0);
    }

    ctx.rt.counter_mode_step += 1;
    if ctx.rt.counter_mode_step as usize % pages == 0 {
        ctx.set_cycle();
    }
    ctx.seg.speed
}

// popcorn kernel physics, 8.8 fixed point, pixels per tick
const POP_GRAVITY: f32 = 0.1;

/// A kernel launched from the near end, decelerating under gravity and
/// falling back down.
pub(crate) fn popcorn(ctx: &mut Ctx) -> u16 {
    let len = ctx.len();
    ctx.fill(ctx.seg.colors[1], ctx.seg.start, len);

    let mut pos = ctx.rt.counter_mode_step as i32; // position * 256
    let mut vel = i32::from(ctx.rt.aux3 as i16); // velocity * 256

    if pos <= 0 && vel <= 0 {
        // pop: launch velocity just high enough to reach the far end
        let v = sqrtf(2.0 * POP_GRAVITY * len as f32);
        vel = (v * 256.0) as i32;
        pos = 0;
        ctx.set_cycle();
    }

    pos += vel;
    vel -= (POP_GRAVITY * 256.0) as i32;
    if pos < 0 {
        pos = 0;
        vel = 0;
    }

    let index = ((pos >> 8) as u16).min(len - 1);
    if ctx.is_reverse() {
        ctx.set_pixel(ctx.seg.stop - index, ctx.seg.colors[0]);
    } else {
        ctx.set_pixel(ctx.seg.start + index, ctx.seg.colors[0]);
    }

    ctx.rt.counter_mode_step = pos as u32;
    ctx.rt.aux3 = vel as i16 as u16;
    ctx.seg.speed / len
}

/// Two blocks bouncing between the segment ends at different rates,
/// blending where they overlap. The bounce period is tracked in u16,
/// bounding segments at 32768 pixels like the delay formulas.
pub(crate) fn oscillator(ctx: &mut Ctx) -> u16 {
    let len = ctx.len();
    let size = ctx.size().min(len);
    let span = len - size;
    if span == 0 {
        ctx.fill(ctx.seg.colors[0], ctx.seg.start, len);
        ctx.set_cycle();
        return ctx.seg.speed;
    }
    let period = u32::from(span) * 2;

    ctx.fill(BLACK, ctx.seg.start, len);

    let t1 = (ctx.rt.counter_mode_step % period) as u16;
    let pos1 = if t1 < span { t1 } else { (period as u16) - t1 };
    let t2 = (ctx.rt.counter_mode_step * 3 / 2 % period) as u16;
    let pos2 = if t2 < span { t2 } else { (period as u16) - t2 };
    let pos2 = span - pos2;

    let color2 = if ctx.seg.colors[2] == BLACK {
        ctx.seg.colors[1]
    } else {
        ctx.seg.colors[2]
    };
    for i in 0..size {
        ctx.set_pixel(ctx.seg.start + pos1 + i, ctx.seg.colors[0]);
    }
    for i in 0..size {
        let n = pos2 + i;
        let color = if n >= pos1 && n < pos1 + size {
            color_blend(ctx.seg.colors[0], color2, 128)
        } else {
            color2
        };
        ctx.set_pixel(ctx.seg.start + n, color);
    }

    ctx.rt.counter_mode_step += 1;
    if ctx.rt.counter_mode_step % period == 0 {
        ctx.set_cycle();
    }
    ctx.seg.speed / len
}
