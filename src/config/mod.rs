//! Module: config
//!
//! Purpose: compile-time configuration for the transmitter.
//!
//! Timing, tone and pin assignments are fixed for the lifetime of the
//! firmware. There is no runtime mutation and no persistence: everything is
//! `const` and readable from any context without locking.

use crate::timing::TimingProfile;

/// Complete transmitter configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Dot length and derived gaps.
    pub timing: TimingProfile,
    /// Buzzer frequency in Hz.
    pub tone_hz: u32,
    /// GPIO driving the indicator LED.
    pub led_gpio: u8,
    /// GPIO driving the buzzer (LEDC PWM output).
    pub buzzer_gpio: u8,
    /// Buzzer PWM duty in percent.
    pub buzzer_duty_pct: u8,
    /// Serial console speed.
    pub uart_baud: u32,
    /// PCM sample rate for rendered sidetone.
    pub sample_rate: u32,
    /// Attack/release ramp for rendered sidetone, in samples.
    pub fade_samples: u16,
}

impl Config {
    pub const DEFAULT: Self = Self {
        timing: TimingProfile::DEFAULT,
        tone_hz: 800,
        led_gpio: 13,
        buzzer_gpio: 8,
        buzzer_duty_pct: 50,
        uart_baud: 9600,
        sample_rate: 8000,
        fade_samples: 40, // 5 ms @ 8 kHz
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Input line capacity in bytes.
pub const LINE_SIZE: usize = 128;

/// Active configuration.
pub const CONFIG: Config = Config::DEFAULT;
