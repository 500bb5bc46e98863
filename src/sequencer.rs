//! Message sequencer: text in, timed on/off events out.
//!
//! # State machine (per message)
//!
//! ```text
//! NextChar ── ' ' ─────────▶ WordGap ─────────────────────────▶ NextChar
//!          ── unsupported ───────────────────────────────────▶ NextChar
//!          ── encoded ─────▶ Symbol ⇄ ElementGap ─▶ LetterGap ─▶ NextChar
//! ```
//!
//! An element gap sits only between two symbols of the same character. The
//! letter gap follows every character, the last one included. A space gets
//! the word gap instead of a letter gap; an unsupported character gets
//! nothing at all.
//!
//! Pure logic, no delays and no hardware: the [`Sequencer`] only produces
//! [`TimedEvent`]s. [`Transmitter`] feeds them to a [`SignalSink`], which
//! does the actual waiting. Nothing survives between messages.

use core::str::Chars;

use crate::logging::TX_LOG;
use crate::morse::{encode, MorseCode};
use crate::progress::Progress;
use crate::sink::{play, SignalSink};
use crate::timing::{TimedEvent, TimingProfile};

/// Sequencing output, including the markers used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Starting a character (already upper-cased).
    Char { ch: char, code: MorseCode },
    /// A space: the word gap event follows.
    WordBreak,
    /// Character not in the alphabet. No event and no gap follow.
    Skipped(char),
    /// Timed output.
    Event(TimedEvent),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    NextChar,
    WordGap,
    /// Key the symbol at `pos`.
    Symbol { code: MorseCode, pos: usize },
    /// Gap before the symbol at `pos`.
    ElementGap { code: MorseCode, pos: usize },
    LetterGap,
}

/// Lazy event sequence for one message.
///
/// # Example
///
/// ```
/// use morse_tx::sequencer::Sequencer;
/// use morse_tx::timing::{TimedEvent, TimingProfile};
///
/// let events: Vec<_> = Sequencer::new("E", TimingProfile::new(100)).collect();
/// assert_eq!(
///     events,
///     [TimedEvent::Signal { ms: 100 }, TimedEvent::Pause { ms: 300 }]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Sequencer<'a> {
    chars: Chars<'a>,
    timing: TimingProfile,
    state: State,
    elapsed_ms: u64,
}

impl<'a> Sequencer<'a> {
    pub fn new(message: &'a str, timing: TimingProfile) -> Self {
        Self {
            chars: message.chars(),
            timing,
            state: State::NextChar,
            elapsed_ms: 0,
        }
    }

    /// Total duration of the events produced so far.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Advance the state machine by one step.
    pub fn next_step(&mut self) -> Option<Step> {
        match self.state {
            State::NextChar => self.begin_char(),
            State::WordGap => {
                self.state = State::NextChar;
                Some(self.pause(self.timing.word_gap_ms()))
            }
            State::Symbol { code, pos } => {
                // pos < code.len() by construction
                let symbol = code.symbol(pos)?;
                self.state = if pos + 1 < code.len() {
                    State::ElementGap { code, pos: pos + 1 }
                } else {
                    State::LetterGap
                };
                Some(self.signal(self.timing.symbol_ms(symbol)))
            }
            State::ElementGap { code, pos } => {
                self.state = State::Symbol { code, pos };
                Some(self.pause(self.timing.element_gap_ms()))
            }
            State::LetterGap => {
                self.state = State::NextChar;
                Some(self.pause(self.timing.letter_gap_ms()))
            }
        }
    }

    fn begin_char(&mut self) -> Option<Step> {
        let c = self.chars.next()?;
        if c == ' ' {
            self.state = State::WordGap;
            return Some(Step::WordBreak);
        }

        let ch = c.to_ascii_uppercase();
        match encode(ch) {
            Ok(code) => {
                self.state = State::Symbol { code, pos: 0 };
                Some(Step::Char { ch, code })
            }
            Err(_) => Some(Step::Skipped(c)),
        }
    }

    fn signal(&mut self, ms: u32) -> Step {
        self.elapsed_ms += u64::from(ms);
        Step::Event(TimedEvent::Signal { ms })
    }

    fn pause(&mut self, ms: u32) -> Step {
        self.elapsed_ms += u64::from(ms);
        Step::Event(TimedEvent::Pause { ms })
    }
}

impl Iterator for Sequencer<'_> {
    type Item = TimedEvent;

    fn next(&mut self) -> Option<TimedEvent> {
        loop {
            if let Step::Event(event) = self.next_step()? {
                return Some(event);
            }
        }
    }
}

/// Total on-air time of `message`, trailing letter gap included.
pub fn airtime_ms(message: &str, timing: TimingProfile) -> u64 {
    let mut seq = Sequencer::new(message, timing);
    while seq.next_step().is_some() {}
    seq.elapsed_ms()
}

/// Drives a sink from a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transmitter {
    pub timing: TimingProfile,
    pub tone_hz: u32,
}

impl Transmitter {
    /// 200 ms unit, 800 Hz tone.
    pub const DEFAULT: Self = Self {
        timing: TimingProfile::DEFAULT,
        tone_hz: 800,
    };

    pub const fn new(timing: TimingProfile, tone_hz: u32) -> Self {
        Self { timing, tone_hz }
    }

    /// Events for `message` with this transmitter's timing.
    pub fn events<'a>(&self, message: &'a str) -> Sequencer<'a> {
        Sequencer::new(message, self.timing)
    }

    /// Send `message` on `sink`, returning when the last event has been
    /// played. Unsupported characters are skipped.
    pub fn transmit<S: SignalSink + ?Sized>(&self, message: &str, sink: &mut S) {
        self.transmit_with_progress(message, sink, &mut ());
    }

    /// As [`transmit`](Self::transmit), reporting milestones to `progress`.
    pub fn transmit_with_progress<S, P>(&self, message: &str, sink: &mut S, progress: &mut P)
    where
        S: SignalSink + ?Sized,
        P: Progress + ?Sized,
    {
        let mut seq = self.events(message);
        progress.message_start(message);

        while let Some(step) = seq.next_step() {
            let now_us = seq.elapsed_ms() as i64 * 1000;
            match step {
                Step::Char { ch, code } => progress.character(ch, code),
                Step::WordBreak => progress.word_break(),
                Step::Skipped(c) => {
                    crate::tx_debug!(TX_LOG, now_us, "skipped unsupported {:?}", c);
                }
                Step::Event(event) => play(event, sink, self.tone_hz),
            }
        }

        progress.message_end();
        crate::tx_info!(
            TX_LOG,
            seq.elapsed_ms() as i64 * 1000,
            "sent {} chars in {} ms",
            message.chars().count(),
            seq.elapsed_ms()
        );
    }
}

impl Default for Transmitter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Send `message` on `sink` with the default timing and tone.
pub fn transmit<S: SignalSink + ?Sized>(message: &str, sink: &mut S) {
    Transmitter::DEFAULT.transmit(message, sink);
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: TimingProfile = TimingProfile::new(1);

    fn steps(message: &str) -> Vec<Step> {
        let mut seq = Sequencer::new(message, T);
        core::iter::from_fn(|| seq.next_step()).collect()
    }

    #[test]
    fn test_empty_message() {
        assert!(steps("").is_empty());
        assert_eq!(airtime_ms("", T), 0);
    }

    #[test]
    fn test_single_dot_char() {
        let e = encode('E').unwrap();
        assert_eq!(
            steps("e"),
            [
                Step::Char { ch: 'E', code: e },
                Step::Event(TimedEvent::Signal { ms: 1 }),
                Step::Event(TimedEvent::Pause { ms: 3 }),
            ]
        );
    }

    #[test]
    fn test_space_only() {
        assert_eq!(
            steps(" "),
            [Step::WordBreak, Step::Event(TimedEvent::Pause { ms: 7 })]
        );
    }

    #[test]
    fn test_skipped_marker_keeps_input_char() {
        assert_eq!(steps("é"), [Step::Skipped('é')]);
    }

    #[test]
    fn test_elapsed_matches_airtime() {
        // PARIS is 50 units including the 7-unit word gap; here the trailing
        // gap is a 3-unit letter gap instead.
        assert_eq!(airtime_ms("PARIS", T), 50 - 7 + 3);
        assert_eq!(airtime_ms("PARIS ", T), 50 + 3);
    }
}
