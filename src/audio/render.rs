//! Render a transmission to PCM.
//!
//! [`PcmSink`] is a [`SignalSink`] that turns waits into samples instead of
//! sleeping, e.g. to feed an I2S codec or to inspect the keying envelope in
//! tests. Time advances only in `wait_ms`.

use super::sidetone::Sidetone;
use crate::sink::SignalSink;

/// PCM renderer writing each sample to `out`.
pub struct PcmSink<F: FnMut(i16)> {
    tone: Sidetone,
    out: F,
    signal: bool,
    /// Sample index where the current tone ends.
    tone_end: u64,
    /// Time waited so far.
    elapsed_ms: u64,
    /// Samples rendered so far.
    rendered: u64,
}

impl<F: FnMut(i16)> PcmSink<F> {
    pub fn new(sample_rate: u32, ramp_samples: u16, out: F) -> Self {
        Self {
            tone: Sidetone::new(0, sample_rate, ramp_samples),
            out,
            signal: false,
            tone_end: 0,
            elapsed_ms: 0,
            rendered: 0,
        }
    }

    /// Total samples written.
    pub fn rendered(&self) -> u64 {
        self.rendered
    }

    /// Whether the visual indicator is currently raised.
    pub fn signal(&self) -> bool {
        self.signal
    }

    /// Sample index at `ms` since the start. Computed from absolute time so
    /// rounding never accumulates across waits.
    fn sample_at(&self, ms: u64) -> u64 {
        ms * u64::from(self.tone.sample_rate()) / 1000
    }
}

impl<F: FnMut(i16)> SignalSink for PcmSink<F> {
    fn set_signal(&mut self, on: bool) {
        self.signal = on;
    }

    fn sound_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.tone.set_frequency(frequency_hz);
        self.tone_end = self.sample_at(self.elapsed_ms + u64::from(duration_ms));
    }

    fn wait_ms(&mut self, ms: u32) {
        self.elapsed_ms += u64::from(ms);
        let target = self.sample_at(self.elapsed_ms);
        while self.rendered < target {
            // Audible only while the indicator is up and the tone lasts
            let keyed = self.signal && self.rendered < self.tone_end;
            let sample = self.tone.next_sample(keyed);
            (self.out)(sample);
            self.rendered += 1;
        }
    }
}
