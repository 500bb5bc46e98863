//! Keyed tone oscillator.
//!
//! Phase accumulator over [`SINE_LUT`] with a linear attack/release ramp so
//! that keying edges do not click. Integer-only per sample.

use super::lut::{LUT_SIZE, SINE_LUT};

/// Envelope phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// No output.
    Silent,
    /// Ramping up after key down.
    Attack,
    /// Full amplitude.
    Hold,
    /// Ramping down after key up.
    Release,
}

/// Full-scale envelope gain.
const GAIN_MAX: u32 = 1 << 16;

/// Tone generator keyed on/off per sample.
pub struct Sidetone {
    /// 32-bit phase, the top 8 bits index the table.
    phase: u32,
    step: u32,
    sample_rate: u32,
    envelope: Envelope,
    /// Position within the ramp, 0..=ramp.
    level: u16,
    ramp: u16,
}

impl Sidetone {
    /// * `freq_hz` - tone frequency
    /// * `sample_rate` - output rate in Hz
    /// * `ramp_samples` - attack/release length (clamped to at least 1)
    pub fn new(freq_hz: u32, sample_rate: u32, ramp_samples: u16) -> Self {
        Self {
            phase: 0,
            step: phase_step(freq_hz, sample_rate),
            sample_rate,
            envelope: Envelope::Silent,
            level: 0,
            ramp: ramp_samples.max(1),
        }
    }

    /// Retune without resetting phase (no discontinuity).
    pub fn set_frequency(&mut self, freq_hz: u32) {
        self.step = phase_step(freq_hz, self.sample_rate);
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn envelope(&self) -> Envelope {
        self.envelope
    }

    /// Produce the next sample.
    pub fn next_sample(&mut self, key_down: bool) -> i16 {
        self.advance_envelope(key_down);
        if self.envelope == Envelope::Silent {
            return 0;
        }

        let index = (self.phase >> 24) as usize % LUT_SIZE;
        self.phase = self.phase.wrapping_add(self.step);

        let gain = self.level as u32 * GAIN_MAX / self.ramp as u32;
        ((SINE_LUT[index] as i32 * gain as i32) >> 16) as i16
    }

    /// Back to silence, phase zeroed.
    pub fn reset(&mut self) {
        self.phase = 0;
        self.level = 0;
        self.envelope = Envelope::Silent;
    }

    fn advance_envelope(&mut self, key_down: bool) {
        self.envelope = match (self.envelope, key_down) {
            (Envelope::Silent, false) => Envelope::Silent,
            (Envelope::Silent, true) | (Envelope::Release, true) | (Envelope::Attack, true) => {
                self.level = (self.level + 1).min(self.ramp);
                if self.level == self.ramp {
                    Envelope::Hold
                } else {
                    Envelope::Attack
                }
            }
            (Envelope::Hold, true) => Envelope::Hold,
            (Envelope::Hold, false) | (Envelope::Attack, false) | (Envelope::Release, false) => {
                self.level = self.level.saturating_sub(1);
                if self.level == 0 {
                    Envelope::Silent
                } else {
                    Envelope::Release
                }
            }
        };
    }
}

/// `step = freq · 2^32 / sample_rate`
#[inline]
fn phase_step(freq_hz: u32, sample_rate: u32) -> u32 {
    ((u64::from(freq_hz) << 32) / u64::from(sample_rate.max(1))) as u32
}
