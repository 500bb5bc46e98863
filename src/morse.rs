//! Morse alphabet and character encoder.
//!
//! Pure lookup, no state. Tables are `const` data validated at compile time:
//! a pattern containing anything other than `.` or `-`, or an empty pattern,
//! fails the build.
//!
//! Callers fold to uppercase before calling [`encode`]. The space character
//! is a word boundary handled by the sequencer and is never tabulated.

use core::fmt;

/// One Morse element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    /// Length of the element in timing units.
    #[inline]
    pub const fn units(self) -> u32 {
        match self {
            Symbol::Dot => 1,
            Symbol::Dash => 3,
        }
    }

    /// Printable form (`.` or `-`).
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    #[inline]
    const fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'.' => Some(Symbol::Dot),
            b'-' => Some(Symbol::Dash),
            _ => None,
        }
    }
}

/// Encoding of a single character: a non-empty sequence of [`Symbol`].
///
/// Backed by a `'static` dot/dash pattern, so it is `Copy` and never
/// allocates.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MorseCode(&'static str);

impl MorseCode {
    const fn new(pattern: &'static str) -> Self {
        let bytes = pattern.as_bytes();
        assert!(!bytes.is_empty(), "Morse pattern must not be empty");
        let mut i = 0;
        while i < bytes.len() {
            assert!(
                Symbol::from_byte(bytes[i]).is_some(),
                "Morse pattern may only contain '.' and '-'"
            );
            i += 1;
        }
        Self(pattern)
    }

    /// Number of symbols (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbol at `index`, if any.
    #[inline]
    pub fn symbol(&self, index: usize) -> Option<Symbol> {
        self.0.as_bytes().get(index).and_then(|&b| Symbol::from_byte(b))
    }

    /// Symbols in transmission order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + 'static {
        let pattern: &'static str = self.0;
        pattern.bytes().filter_map(Symbol::from_byte)
    }

    /// Dot/dash rendering, e.g. `".-"`.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Sum of the symbol lengths in timing units, excluding gaps.
    pub fn units(&self) -> u32 {
        self.symbols().map(Symbol::units).sum()
    }
}

impl fmt::Display for MorseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for MorseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MorseCode({})", self.0)
    }
}

/// Character has no entry in the alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unsupported(pub char);

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported character {:?}", self.0)
    }
}

/// Letters `A`..=`Z`.
static LETTERS: [MorseCode; 26] = [
    MorseCode::new(".-"),   // A
    MorseCode::new("-..."), // B
    MorseCode::new("-.-."), // C
    MorseCode::new("-.."),  // D
    MorseCode::new("."),    // E
    MorseCode::new("..-."), // F
    MorseCode::new("--."),  // G
    MorseCode::new("...."), // H
    MorseCode::new(".."),   // I
    MorseCode::new(".---"), // J
    MorseCode::new("-.-"),  // K
    MorseCode::new(".-.."), // L
    MorseCode::new("--"),   // M
    MorseCode::new("-."),   // N
    MorseCode::new("---"),  // O
    MorseCode::new(".--."), // P
    MorseCode::new("--.-"), // Q
    MorseCode::new(".-."),  // R
    MorseCode::new("..."),  // S
    MorseCode::new("-"),    // T
    MorseCode::new("..-"),  // U
    MorseCode::new("...-"), // V
    MorseCode::new(".--"),  // W
    MorseCode::new("-..-"), // X
    MorseCode::new("-.--"), // Y
    MorseCode::new("--.."), // Z
];

/// Digits `0`..=`9`.
static DIGITS: [MorseCode; 10] = [
    MorseCode::new("-----"), // 0
    MorseCode::new(".----"), // 1
    MorseCode::new("..---"), // 2
    MorseCode::new("...--"), // 3
    MorseCode::new("....-"), // 4
    MorseCode::new("....."), // 5
    MorseCode::new("-...."), // 6
    MorseCode::new("--..."), // 7
    MorseCode::new("---.."), // 8
    MorseCode::new("----."), // 9
];

static PUNCTUATION: [(char, MorseCode); 5] = [
    ('.', MorseCode::new(".-.-.-")),
    (',', MorseCode::new("--..--")),
    ('?', MorseCode::new("..--..")),
    ('/', MorseCode::new("-..-.")),
    ('@', MorseCode::new(".--.-.")),
];

/// Number of characters in the alphabet.
pub const ALPHABET_LEN: usize = LETTERS.len() + DIGITS.len() + PUNCTUATION.len();

/// Look up the Morse encoding of `c`.
///
/// Only uppercase letters are tabulated; `'a'` is [`Unsupported`].
///
/// # Example
///
/// ```
/// use morse_tx::morse::{encode, Symbol};
///
/// let a = encode('A').unwrap();
/// assert_eq!(a.symbols().collect::<Vec<_>>(), [Symbol::Dot, Symbol::Dash]);
/// assert!(encode(' ').is_err());
/// ```
pub fn encode(c: char) -> Result<MorseCode, Unsupported> {
    match c {
        'A'..='Z' => Ok(LETTERS[c as usize - 'A' as usize]),
        '0'..='9' => Ok(DIGITS[c as usize - '0' as usize]),
        _ => PUNCTUATION
            .iter()
            .find(|(p, _)| *p == c)
            .map(|&(_, code)| code)
            .ok_or(Unsupported(c)),
    }
}

/// Every `(character, encoding)` pair: letters, then digits, then punctuation.
pub fn alphabet() -> impl Iterator<Item = (char, MorseCode)> {
    let letters = ('A'..='Z').zip(LETTERS.iter().copied());
    let digits = ('0'..='9').zip(DIGITS.iter().copied());
    letters.chain(digits).chain(PUNCTUATION.iter().copied())
}
