//! Timing grammar for transmitted Morse.
//!
//! Everything is a multiple of one unit `U`:
//!
//! | element            | length |
//! |--------------------|--------|
//! | dot                | 1U     |
//! | dash               | 3U     |
//! | intra-character gap| 1U     |
//! | inter-letter gap   | 3U     |
//! | inter-word gap     | 7U     |

use crate::morse::Symbol;

/// Process-wide timing constants derived from a single unit length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingProfile {
    unit_ms: u32,
}

impl TimingProfile {
    /// 200 ms unit (6 WPM).
    pub const DEFAULT: Self = Self::new(200);

    /// Create a profile from a unit length in milliseconds.
    ///
    /// The unit must be non-zero and small enough for a 7-unit word gap to
    /// fit in a `u32`.
    pub const fn new(unit_ms: u32) -> Self {
        assert!(unit_ms > 0, "unit length must be non-zero");
        assert!(unit_ms <= u32::MAX / 7, "unit length too large");
        Self { unit_ms }
    }

    /// Create a profile for a given speed.
    ///
    /// PARIS timing: unit = 1.2 / WPM seconds
    pub const fn from_wpm(wpm: u32) -> Self {
        assert!(wpm > 0 && wpm <= 1200, "WPM out of range");
        Self::new(1_200 / wpm)
    }

    #[inline]
    pub const fn unit_ms(&self) -> u32 {
        self.unit_ms
    }

    #[inline]
    pub const fn dot_ms(&self) -> u32 {
        self.unit_ms
    }

    #[inline]
    pub const fn dash_ms(&self) -> u32 {
        self.unit_ms * 3
    }

    /// Silence between symbols of the same character.
    #[inline]
    pub const fn element_gap_ms(&self) -> u32 {
        self.unit_ms
    }

    /// Silence after every character.
    #[inline]
    pub const fn letter_gap_ms(&self) -> u32 {
        self.unit_ms * 3
    }

    /// Silence for a space character.
    #[inline]
    pub const fn word_gap_ms(&self) -> u32 {
        self.unit_ms * 7
    }

    /// Key-down time for a symbol.
    #[inline]
    pub const fn symbol_ms(&self, symbol: Symbol) -> u32 {
        self.unit_ms * symbol.units()
    }
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One emission instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimedEvent {
    /// Signal on (LED lit, tone sounding) for `ms`.
    Signal { ms: u32 },
    /// Silence for `ms`.
    Pause { ms: u32 },
}

impl TimedEvent {
    #[inline]
    pub fn duration_ms(&self) -> u32 {
        match *self {
            TimedEvent::Signal { ms } | TimedEvent::Pause { ms } => ms,
        }
    }

    #[inline]
    pub fn is_signal(&self) -> bool {
        matches!(self, TimedEvent::Signal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let t = TimingProfile::DEFAULT;
        assert_eq!(t.dot_ms(), 200);
        assert_eq!(t.dash_ms(), 600);
        assert_eq!(t.element_gap_ms(), 200);
        assert_eq!(t.letter_gap_ms(), 600);
        assert_eq!(t.word_gap_ms(), 1400);
    }

    #[test]
    fn test_wpm_timing() {
        // 1.2s / 20 = 60ms
        assert_eq!(TimingProfile::from_wpm(20).unit_ms(), 60);
        assert_eq!(TimingProfile::from_wpm(6), TimingProfile::DEFAULT);
    }

    #[test]
    fn test_symbol_ms() {
        let t = TimingProfile::new(50);
        assert_eq!(t.symbol_ms(Symbol::Dot), 50);
        assert_eq!(t.symbol_ms(Symbol::Dash), 150);
    }

    #[test]
    fn test_largest_unit_keeps_word_gap_in_range() {
        let t = TimingProfile::new(u32::MAX / 7);
        assert_eq!(t.word_gap_ms(), u32::MAX / 7 * 7);
    }

    #[test]
    #[should_panic(expected = "unit length too large")]
    fn test_unit_too_large() {
        let _ = TimingProfile::new(u32::MAX / 7 + 1);
    }

    #[test]
    fn test_event_duration() {
        assert_eq!(TimedEvent::Signal { ms: 10 }.duration_ms(), 10);
        assert!(!TimedEvent::Pause { ms: 10 }.is_signal());
    }
}
