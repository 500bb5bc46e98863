//! Sine table tests

use morse_tx::audio::lut::{LUT_PEAK, LUT_SIZE, SINE_LUT};

#[test]
fn test_lut_size() {
    assert_eq!(SINE_LUT.len(), LUT_SIZE);
    assert!(LUT_SIZE.is_power_of_two());
}

#[test]
fn test_lut_cardinal_points() {
    assert_eq!(SINE_LUT[0], 0);
    assert_eq!(SINE_LUT[64], LUT_PEAK);
    assert_eq!(SINE_LUT[128], 0);
    assert_eq!(SINE_LUT[192], -LUT_PEAK);
}

#[test]
fn test_lut_half_wave_antisymmetry() {
    for i in 0..LUT_SIZE / 2 {
        assert_eq!(SINE_LUT[i], -SINE_LUT[i + LUT_SIZE / 2], "index {}", i);
    }
}

#[test]
fn test_lut_matches_sine() {
    for (i, &v) in SINE_LUT.iter().enumerate() {
        let expected = (2.0 * std::f64::consts::PI * i as f64 / LUT_SIZE as f64).sin()
            * LUT_PEAK as f64;
        assert!(
            (v as f64 - expected).abs() <= 1.0,
            "index {}: {} vs {}",
            i,
            v,
            expected
        );
    }
}

#[test]
fn test_lut_rising_first_quadrant() {
    for i in 1..=64 {
        assert!(SINE_LUT[i] > SINE_LUT[i - 1], "index {}", i);
    }
}
