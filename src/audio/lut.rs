//! Sine table for buzzer tone synthesis.
//!
//! One full cycle in 256 steps, built at compile time.

/// Number of entries in the table.
pub const LUT_SIZE: usize = 256;

/// Peak amplitude of the table.
pub const LUT_PEAK: i16 = i16::MAX;

/// `SINE_LUT[i] = sin(2π·i/256) · 32767`
///
/// Index 0 = 0°, 64 = 90°, 128 = 180°, 192 = 270°.
pub static SINE_LUT: [i16; LUT_SIZE] = build_table();

const fn build_table() -> [i16; LUT_SIZE] {
    const QUARTER: usize = LUT_SIZE / 4;

    let mut table = [0i16; LUT_SIZE];
    let mut i = 0;
    while i < LUT_SIZE {
        // Fold every index onto the first quadrant, then mirror the sign.
        let quadrant = i / QUARTER;
        let offset = i % QUARTER;
        let step = if quadrant % 2 == 0 { offset } else { QUARTER - offset };
        let value = quarter_sine(step, QUARTER);
        table[i] = if quadrant < 2 { value } else { -value };
        i += 1;
    }
    table
}

/// `sin(π/2 · step/quarter)` scaled to `LUT_PEAK`, for `step` in `0..=quarter`.
const fn quarter_sine(step: usize, quarter: usize) -> i16 {
    let x = core::f64::consts::FRAC_PI_2 * step as f64 / quarter as f64;
    let x2 = x * x;
    // Taylor series to x^11: error < 1e-8 on [0, π/2]
    let s = x
        * (1.0
            - x2 / 6.0
                * (1.0
                    - x2 / 20.0
                        * (1.0 - x2 / 42.0 * (1.0 - x2 / 72.0 * (1.0 - x2 / 110.0)))));
    let scaled = s * LUT_PEAK as f64;
    // Round to nearest, clamp the peak against series overshoot.
    let rounded = (scaled + 0.5) as i32;
    if rounded > LUT_PEAK as i32 {
        LUT_PEAK
    } else {
        rounded as i16
    }
}
