//! Effect generators and dispatch.
//!
//! All built-in modes live in a closed enum and run through one dispatch
//! site; the eight custom slots are user-supplied functions invoked with
//! the exact same calling contract. A generator reads and writes pixels
//! only within its segment, mutates its own runtime counters, and
//! returns the requested delay (ms) until its next run.

mod context;
mod helpers;
mod modes;

pub use context::EffectContext;

/// User-supplied effect generator for the custom mode slots.
pub type CustomMode = fn(&mut EffectContext) -> u16;

/// Number of custom mode slots.
pub const CUSTOM_MODE_COUNT: usize = 8;

/// Animation mode of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Static = 0,
    Blink = 1,
    Breath = 2,
    ColorWipe = 3,
    ColorWipeInverse = 4,
    ColorWipeReverse = 5,
    ColorWipeReverseInverse = 6,
    ColorWipeRandom = 7,
    RandomColor = 8,
    SingleDynamic = 9,
    MultiDynamic = 10,
    Rainbow = 11,
    RainbowCycle = 12,
    Scan = 13,
    DualScan = 14,
    Fade = 15,
    TheaterChase = 16,
    TheaterChaseRainbow = 17,
    RunningLights = 18,
    Twinkle = 19,
    TwinkleRandom = 20,
    TwinkleFade = 21,
    TwinkleFadeRandom = 22,
    Sparkle = 23,
    FlashSparkle = 24,
    HyperSparkle = 25,
    Strobe = 26,
    StrobeRainbow = 27,
    MultiStrobe = 28,
    BlinkRainbow = 29,
    ChaseWhite = 30,
    ChaseColor = 31,
    ChaseRandom = 32,
    ChaseRainbow = 33,
    ChaseFlash = 34,
    ChaseFlashRandom = 35,
    ChaseRainbowWhite = 36,
    ChaseBlackout = 37,
    ChaseBlackoutRainbow = 38,
    ColorSweepRandom = 39,
    RunningColor = 40,
    RunningRedBlue = 41,
    RunningRandom = 42,
    LarsonScanner = 43,
    Comet = 44,
    Fireworks = 45,
    FireworksRandom = 46,
    MerryChristmas = 47,
    FireFlicker = 48,
    FireFlickerSoft = 49,
    FireFlickerIntense = 50,
    CircusCombustus = 51,
    Halloween = 52,
    BicolorChase = 53,
    TricolorChase = 54,
    TwinkleFox = 55,
    Rain = 56,
    BlockDissolve = 57,
    Icu = 58,
    DualLarson = 59,
    RunningRandom2 = 60,
    FillerUp = 61,
    RainbowLarson = 62,
    RainbowFireworks = 63,
    Trifade = 64,
    VuMeter = 65,
    Heartbeat = 66,
    Bits = 67,
    MultiComet = 68,
    Flipbook = 69,
    Popcorn = 70,
    Oscillator = 71,
    Custom0 = 72,
    Custom1 = 73,
    Custom2 = 74,
    Custom3 = 75,
    Custom4 = 76,
    Custom5 = 77,
    Custom6 = 78,
    Custom7 = 79,
}

impl Mode {
    /// Total number of modes, custom slots included.
    pub const COUNT: u8 = 80;

    /// Map a raw mode id; out-of-range ids clamp to the last mode.
    pub const fn from_raw(value: u8) -> Self {
        // Table order matches the discriminants exactly.
        const TABLE: [Mode; Mode::COUNT as usize] = [
            Mode::Static,
            Mode::Blink,
            Mode::Breath,
            Mode::ColorWipe,
            Mode::ColorWipeInverse,
            Mode::ColorWipeReverse,
            Mode::ColorWipeReverseInverse,
            Mode::ColorWipeRandom,
            Mode::RandomColor,
            Mode::SingleDynamic,
            Mode::MultiDynamic,
            Mode::Rainbow,
            Mode::RainbowCycle,
            Mode::Scan,
            Mode::DualScan,
            Mode::Fade,
            Mode::TheaterChase,
            Mode::TheaterChaseRainbow,
            Mode::RunningLights,
            Mode::Twinkle,
            Mode::TwinkleRandom,
            Mode::TwinkleFade,
            Mode::TwinkleFadeRandom,
            Mode::Sparkle,
            Mode::FlashSparkle,
            Mode::HyperSparkle,
            Mode::Strobe,
            Mode::StrobeRainbow,
            Mode::MultiStrobe,
            Mode::BlinkRainbow,
            Mode::ChaseWhite,
            Mode::ChaseColor,
            Mode::ChaseRandom,
            Mode::ChaseRainbow,
            Mode::ChaseFlash,
            Mode::ChaseFlashRandom,
            Mode::ChaseRainbowWhite,
            Mode::ChaseBlackout,
            Mode::ChaseBlackoutRainbow,
            Mode::ColorSweepRandom,
            Mode::RunningColor,
            Mode::RunningRedBlue,
            Mode::RunningRandom,
            Mode::LarsonScanner,
            Mode::Comet,
            Mode::Fireworks,
            Mode::FireworksRandom,
            Mode::MerryChristmas,
            Mode::FireFlicker,
            Mode::FireFlickerSoft,
            Mode::FireFlickerIntense,
            Mode::CircusCombustus,
            Mode::Halloween,
            Mode::BicolorChase,
            Mode::TricolorChase,
            Mode::TwinkleFox,
            Mode::Rain,
            Mode::BlockDissolve,
            Mode::Icu,
            Mode::DualLarson,
            Mode::RunningRandom2,
            Mode::FillerUp,
            Mode::RainbowLarson,
            Mode::RainbowFireworks,
            Mode::Trifade,
            Mode::VuMeter,
            Mode::Heartbeat,
            Mode::Bits,
            Mode::MultiComet,
            Mode::Flipbook,
            Mode::Popcorn,
            Mode::Oscillator,
            Mode::Custom0,
            Mode::Custom1,
            Mode::Custom2,
            Mode::Custom3,
            Mode::Custom4,
            Mode::Custom5,
            Mode::Custom6,
            Mode::Custom7,
        ];
        let value = if value >= Self::COUNT {
            Self::COUNT - 1
        } else {
            value
        };
        TABLE[value as usize]
    }

    /// Index of the custom slot, for modes `Custom0..Custom7`.
    pub const fn custom_slot(self) -> Option<usize> {
        let raw = self as u8;
        if raw >= Mode::Custom0 as u8 {
            Some((raw - Mode::Custom0 as u8) as usize)
        } else {
            None
        }
    }

    /// Human-readable display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Blink => "Blink",
            Self::Breath => "Breath",
            Self::ColorWipe => "Color Wipe",
            Self::ColorWipeInverse => "Color Wipe Inverse",
            Self::ColorWipeReverse => "Color Wipe Reverse",
            Self::ColorWipeReverseInverse => "Color Wipe Reverse Inverse",
            Self::ColorWipeRandom => "Color Wipe Random",
            Self::RandomColor => "Random Color",
            Self::SingleDynamic => "Single Dynamic",
            Self::MultiDynamic => "Multi Dynamic",
            Self::Rainbow => "Rainbow",
            Self::RainbowCycle => "Rainbow Cycle",
            Self::Scan => "Scan",
            Self::DualScan => "Dual Scan",
            Self::Fade => "Fade",
            Self::TheaterChase => "Theater Chase",
            Self::TheaterChaseRainbow => "Theater Chase Rainbow",
            Self::RunningLights => "Running Lights",
            Self::Twinkle => "Twinkle",
            Self::TwinkleRandom => "Twinkle Random",
            Self::TwinkleFade => "Twinkle Fade",
            Self::TwinkleFadeRandom => "Twinkle Fade Random",
            Self::Sparkle => "Sparkle",
            Self::FlashSparkle => "Flash Sparkle",
            Self::HyperSparkle => "Hyper Sparkle",
            Self::Strobe => "Strobe",
            Self::StrobeRainbow => "Strobe Rainbow",
            Self::MultiStrobe => "Multi Strobe",
            Self::BlinkRainbow => "Blink Rainbow",
            Self::ChaseWhite => "Chase White",
            Self::ChaseColor => "Chase Color",
            Self::ChaseRandom => "Chase Random",
            Self::ChaseRainbow => "Chase Rainbow",
            Self::ChaseFlash => "Chase Flash",
            Self::ChaseFlashRandom => "Chase Flash Random",
            Self::ChaseRainbowWhite => "Chase Rainbow White",
            Self::ChaseBlackout => "Chase Blackout",
            Self::ChaseBlackoutRainbow => "Chase Blackout Rainbow",
            Self::ColorSweepRandom => "Color Sweep Random",
            Self::RunningColor => "Running Color",
            Self::RunningRedBlue => "Running Red Blue",
            Self::RunningRandom => "Running Random",
            Self::LarsonScanner => "Larson Scanner",
            Self::Comet => "Comet",
            Self::Fireworks => "Fireworks",
            Self::FireworksRandom => "Fireworks Random",
            Self::MerryChristmas => "Merry Christmas",
            Self::FireFlicker => "Fire Flicker",
            Self::FireFlickerSoft => "Fire Flicker (soft)",
            Self::FireFlickerIntense => "Fire Flicker (intense)",
            Self::CircusCombustus => "Circus Combustus",
            Self::Halloween => "Halloween",
            Self::BicolorChase => "Bicolor Chase",
            Self::TricolorChase => "Tricolor Chase",
            Self::TwinkleFox => "TwinkleFOX",
            Self::Rain => "Rain",
            Self::BlockDissolve => "Block Dissolve",
            Self::Icu => "ICU",
            Self::DualLarson => "Dual Larson",
            Self::RunningRandom2 => "Running Random2",
            Self::FillerUp => "Filler Up",
            Self::RainbowLarson => "Rainbow Larson",
            Self::RainbowFireworks => "Rainbow Fireworks",
            Self::Trifade => "Trifade",
            Self::VuMeter => "VU Meter",
            Self::Heartbeat => "Heartbeat",
            Self::Bits => "Bits",
            Self::MultiComet => "Multi Comet",
            Self::Flipbook => "Flipbook",
            Self::Popcorn => "Popcorn",
            Self::Oscillator => "Oscillator",
            Self::Custom0 => "Custom 0",
            Self::Custom1 => "Custom 1",
            Self::Custom2 => "Custom 2",
            Self::Custom3 => "Custom 3",
            Self::Custom4 => "Custom 4",
            Self::Custom5 => "Custom 5",
            Self::Custom6 => "Custom 6",
            Self::Custom7 => "Custom 7",
        }
    }

    /// Run one frame of the mode, returning the requested delay in ms.
    ///
    /// Custom slots with no registered generator complete a cycle
    /// immediately and idle at the segment speed.
    pub(crate) fn run(
        self,
        ctx: &mut EffectContext,
        custom: &[Option<CustomMode>; CUSTOM_MODE_COUNT],
    ) -> u16 {
        if let Some(slot) = self.custom_slot() {
            return match custom[slot] {
                Some(generator) => generator(ctx),
                None => {
                    ctx.set_cycle();
                    ctx.seg.speed
                }
            };
        }
        match self {
            Self::Static => modes::static_color(ctx),
            Self::Blink => modes::blink(ctx),
            Self::Breath => modes::breath(ctx),
            Self::ColorWipe => modes::color_wipe(ctx),
            Self::ColorWipeInverse => modes::color_wipe_inverse(ctx),
            Self::ColorWipeReverse => modes::color_wipe_reverse(ctx),
            Self::ColorWipeReverseInverse => modes::color_wipe_reverse_inverse(ctx),
            Self::ColorWipeRandom => modes::color_wipe_random(ctx),
            Self::RandomColor => modes::random_color(ctx),
            Self::SingleDynamic => modes::single_dynamic(ctx),
            Self::MultiDynamic => modes::multi_dynamic(ctx),
            Self::Rainbow => modes::rainbow(ctx),
            Self::RainbowCycle => modes::rainbow_cycle(ctx),
            Self::Scan => modes::scan(ctx),
            Self::DualScan => modes::dual_scan(ctx),
            Self::Fade => modes::fade(ctx),
            Self::TheaterChase => modes::theater_chase(ctx),
            Self::TheaterChaseRainbow => modes::theater_chase_rainbow(ctx),
            Self::RunningLights => modes::running_lights(ctx),
            Self::Twinkle => modes::twinkle(ctx),
            Self::TwinkleRandom => modes::twinkle_random(ctx),
            Self::TwinkleFade => modes::twinkle_fade(ctx),
            Self::TwinkleFadeRandom => modes::twinkle_fade_random(ctx),
            Self::Sparkle => modes::sparkle(ctx),
            Self::FlashSparkle => modes::flash_sparkle(ctx),
            Self::HyperSparkle => modes::hyper_sparkle(ctx),
            Self::Strobe => modes::strobe(ctx),
            Self::StrobeRainbow => modes::strobe_rainbow(ctx),
            Self::MultiStrobe => modes::multi_strobe(ctx),
            Self::BlinkRainbow => modes::blink_rainbow(ctx),
            Self::ChaseWhite => modes::chase_white(ctx),
            Self::ChaseColor => modes::chase_color(ctx),
            Self::ChaseRandom => modes::chase_random(ctx),
            Self::ChaseRainbow => modes::chase_rainbow(ctx),
            Self::ChaseFlash => modes::chase_flash(ctx),
            Self::ChaseFlashRandom => modes::chase_flash_random(ctx),
            Self::ChaseRainbowWhite => modes::chase_rainbow_white(ctx),
            Self::ChaseBlackout => modes::chase_blackout(ctx),
            Self::ChaseBlackoutRainbow => modes::chase_blackout_rainbow(ctx),
            Self::ColorSweepRandom => modes::color_sweep_random(ctx),
            Self::RunningColor => modes::running_color(ctx),
            Self::RunningRedBlue => modes::running_red_blue(ctx),
            Self::RunningRandom => modes::running_random(ctx),
            Self::LarsonScanner => modes::larson_scanner(ctx),
            Self::Comet => modes::comet(ctx),
            Self::Fireworks => modes::fireworks(ctx),
            Self::FireworksRandom => modes::fireworks_random(ctx),
            Self::MerryChristmas => modes::merry_christmas(ctx),
            Self::FireFlicker => modes::fire_flicker(ctx),
            Self::FireFlickerSoft => modes::fire_flicker_soft(ctx),
            Self::FireFlickerIntense => modes::fire_flicker_intense(ctx),
            Self::CircusCombustus => modes::circus_combustus(ctx),
            Self::Halloween => modes::halloween(ctx),
            Self::BicolorChase => modes::bicolor_chase(ctx),
            Self::TricolorChase => modes::tricolor_chase(ctx),
            Self::TwinkleFox => modes::twinkle_fox(ctx),
            Self::Rain => modes::rain(ctx),
            Self::BlockDissolve => modes::block_dissolve(ctx),
            Self::Icu => modes::icu(ctx),
            Self::DualLarson => modes::dual_larson(ctx),
            Self::RunningRandom2 => modes::running_random2(ctx),
            Self::FillerUp => modes::filler_up(ctx),
            Self::RainbowLarson => modes::rainbow_larson(ctx),
            Self::RainbowFireworks => modes::rainbow_fireworks(ctx),
            Self::Trifade => modes::trifade(ctx),
            Self::VuMeter => modes::vu_meter(ctx),
            Self::Heartbeat => modes::heartbeat(ctx),
            Self::Bits => modes::bits(ctx),
            Self::MultiComet => modes::multi_comet(ctx),
            Self::Flipbook => modes::flipbook(ctx),
            Self::Popcorn => modes::popcorn(ctx),
            Self::Oscillator => modes::oscillator(ctx),
            // Custom slots are handled above.
            _ => ctx.seg.speed,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Static
    }
}
