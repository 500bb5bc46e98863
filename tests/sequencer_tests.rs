//! Sequencer and transmitter tests
//!
//! A recording sink stands in for the LED and buzzer so the full event
//! stream can be compared without real-time delays.

use morse_tx::morse::encode;
use morse_tx::progress::Progress;
use morse_tx::sequencer::{airtime_ms, transmit, Sequencer, Step, Transmitter};
use morse_tx::sink::{NullSink, SignalSink};
use morse_tx::timing::{TimedEvent, TimingProfile};
use morse_tx::MorseCode;

const U: u32 = 200;

const DOT: TimedEvent = TimedEvent::Signal { ms: U };
const DASH: TimedEvent = TimedEvent::Signal { ms: 3 * U };
const GAP: TimedEvent = TimedEvent::Pause { ms: U };
const LETTER_GAP: TimedEvent = TimedEvent::Pause { ms: 3 * U };
const WORD_GAP: TimedEvent = TimedEvent::Pause { ms: 7 * U };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Signal(bool),
    Tone(u32, u32),
    Wait(u32),
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<Call>,
}

impl RecordingSink {
    /// Rebuild timed events from raw sink calls.
    fn events(&self) -> Vec<TimedEvent> {
        let mut events = Vec::new();
        let mut on = false;
        for call in &self.calls {
            match *call {
                Call::Signal(state) => on = state,
                Call::Tone(..) => {}
                Call::Wait(ms) if on => events.push(TimedEvent::Signal { ms }),
                Call::Wait(ms) => events.push(TimedEvent::Pause { ms }),
            }
        }
        events
    }
}

impl SignalSink for RecordingSink {
    fn set_signal(&mut self, on: bool) {
        self.calls.push(Call::Signal(on));
    }

    fn sound_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.calls.push(Call::Tone(frequency_hz, duration_ms));
    }

    fn wait_ms(&mut self, ms: u32) {
        self.calls.push(Call::Wait(ms));
    }
}

fn record(message: &str) -> Vec<TimedEvent> {
    let mut sink = RecordingSink::default();
    transmit(message, &mut sink);
    sink.events()
}

fn sos() -> Vec<TimedEvent> {
    vec![
        DOT, GAP, DOT, GAP, DOT, LETTER_GAP, //
        DASH, GAP, DASH, GAP, DASH, LETTER_GAP, //
        DOT, GAP, DOT, GAP, DOT, LETTER_GAP,
    ]
}

#[test]
fn test_sos_sequence() {
    assert_eq!(record("SOS"), sos());
}

#[test]
fn test_iterator_matches_sink_output() {
    let events: Vec<TimedEvent> = Sequencer::new("SOS", TimingProfile::DEFAULT).collect();
    assert_eq!(events, sos());
}

#[test]
fn test_space_is_word_gap_only() {
    let expected = vec![
        DOT, GAP, DASH, LETTER_GAP, // A
        WORD_GAP, //
        DASH, GAP, DOT, GAP, DOT, GAP, DOT, LETTER_GAP, // B
    ];
    assert_eq!(record("A B"), expected);
}

#[test]
fn test_consecutive_spaces_each_charge_a_word_gap() {
    assert_eq!(record("  "), vec![WORD_GAP, WORD_GAP]);
}

#[test]
fn test_unsupported_character_is_transparent() {
    assert_eq!(record("A#B"), record("AB"));
    assert_eq!(record("#"), Vec::<TimedEvent>::new());
    assert_eq!(record("S\u{e9}O\u{1F600}S!"), sos());
}

#[test]
fn test_lowercase_is_folded() {
    assert_eq!(record("sos"), sos());
    assert_eq!(record("sOs"), sos());
}

#[test]
fn test_repeat_transmission_is_identical() {
    let mut first = RecordingSink::default();
    let mut second = RecordingSink::default();

    let tx = Transmitter::DEFAULT;
    tx.transmit("Hello, World 73?", &mut first);
    tx.transmit("Hello, World 73?", &mut second);

    assert_eq!(first.calls, second.calls);
    assert!(!first.calls.is_empty());
}

#[test]
fn test_signal_call_order() {
    let mut sink = RecordingSink::default();
    transmit("E", &mut sink);

    assert_eq!(
        sink.calls,
        [
            Call::Signal(true),
            Call::Tone(800, U),
            Call::Wait(U),
            Call::Signal(false),
            Call::Wait(3 * U),
        ]
    );
}

#[test]
fn test_custom_timing_and_tone() {
    let tx = Transmitter::new(TimingProfile::new(10), 600);
    let mut sink = RecordingSink::default();
    tx.transmit("T", &mut sink);

    assert_eq!(sink.calls[1], Call::Tone(600, 30));
    assert_eq!(
        sink.events(),
        [TimedEvent::Signal { ms: 30 }, TimedEvent::Pause { ms: 30 }]
    );
}

#[test]
fn test_intra_gap_never_after_last_symbol() {
    let events = record("5"); // .....
    let signals = events.iter().filter(|e| e.is_signal()).count();
    let gaps = events.iter().filter(|&&e| e == GAP).count();
    assert_eq!(signals, 5);
    assert_eq!(gaps, 4);
    assert_eq!(events.last(), Some(&LETTER_GAP));
}

#[test]
fn test_step_markers() {
    let mut seq = Sequencer::new("a #", TimingProfile::new(1));
    let steps: Vec<Step> = std::iter::from_fn(|| seq.next_step()).collect();
    let a = encode('A').unwrap();

    assert_eq!(
        steps,
        [
            Step::Char { ch: 'A', code: a },
            Step::Event(TimedEvent::Signal { ms: 1 }),
            Step::Event(TimedEvent::Pause { ms: 1 }),
            Step::Event(TimedEvent::Signal { ms: 3 }),
            Step::Event(TimedEvent::Pause { ms: 3 }),
            Step::WordBreak,
            Step::Event(TimedEvent::Pause { ms: 7 }),
            Step::Skipped('#'),
        ]
    );
}

#[test]
fn test_airtime_matches_events() {
    let message = "CQ CQ DE N0CALL";
    let total: u64 = record(message)
        .iter()
        .map(|e| u64::from(e.duration_ms()))
        .sum();
    assert_eq!(airtime_ms(message, TimingProfile::DEFAULT), total);
}

#[test]
fn test_sequencer_is_lazy() {
    let mut seq = Sequencer::new("MMMMMMMM", TimingProfile::DEFAULT);
    assert_eq!(seq.next(), Some(DASH));
    assert_eq!(seq.elapsed_ms(), u64::from(3 * U));
}

#[derive(Default)]
struct Transcript {
    chars: String,
    breaks: usize,
    started: Option<String>,
    ended: bool,
}

impl Progress for Transcript {
    fn message_start(&mut self, message: &str) {
        self.started = Some(message.to_string());
    }

    fn character(&mut self, ch: char, _code: MorseCode) {
        self.chars.push(ch);
    }

    fn word_break(&mut self) {
        self.breaks += 1;
    }

    fn message_end(&mut self) {
        self.ended = true;
    }
}

#[test]
fn test_progress_sees_folded_chars_and_breaks() {
    let mut progress = Transcript::default();
    Transmitter::DEFAULT.transmit_with_progress("hi #there", &mut NullSink, &mut progress);

    assert_eq!(progress.started.as_deref(), Some("hi #there"));
    assert_eq!(progress.chars, "HITHERE");
    assert_eq!(progress.breaks, 1);
    assert!(progress.ended);
}
