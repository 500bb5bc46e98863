//! Output side: the timed-signal sink.
//!
//! The sequencer never waits or touches hardware itself. [`play`] turns each
//! [`TimedEvent`] into sink calls; the sink decides what "wait" means
//! (blocking delay on the device, sample rendering, or nothing at all in
//! tests).

use crate::timing::TimedEvent;

/// Visual + audible indicator driven by the transmitter.
pub trait SignalSink {
    /// Raise or lower the visual indicator.
    fn set_signal(&mut self, on: bool);

    /// Start a tone that stops by itself after `duration_ms`.
    fn sound_tone(&mut self, frequency_hz: u32, duration_ms: u32);

    /// Block for `ms` milliseconds.
    fn wait_ms(&mut self, ms: u32);
}

impl<S: SignalSink + ?Sized> SignalSink for &mut S {
    fn set_signal(&mut self, on: bool) {
        (**self).set_signal(on)
    }

    fn sound_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        (**self).sound_tone(frequency_hz, duration_ms)
    }

    fn wait_ms(&mut self, ms: u32) {
        (**self).wait_ms(ms)
    }
}

/// Perform one event on `sink`.
///
/// A signal raises the indicator and starts the tone together, holds for the
/// full duration, then lowers the indicator.
pub fn play<S: SignalSink + ?Sized>(event: TimedEvent, sink: &mut S, tone_hz: u32) {
    match event {
        TimedEvent::Signal { ms } => {
            sink.set_signal(true);
            sink.sound_tone(tone_hz, ms);
            sink.wait_ms(ms);
            sink.set_signal(false);
        }
        TimedEvent::Pause { ms } => sink.wait_ms(ms),
    }
}

/// Sink that discards everything. Used for dry runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SignalSink for NullSink {
    fn set_signal(&mut self, _on: bool) {}

    fn sound_tone(&mut self, _frequency_hz: u32, _duration_ms: u32) {}

    fn wait_ms(&mut self, _ms: u32) {}
}
