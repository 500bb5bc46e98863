//! Alphabet and encoder tests

use morse_tx::morse::{alphabet, encode, Symbol, Unsupported, ALPHABET_LEN};

const LETTERS: [(char, &str); 26] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
];

const DIGITS: [(char, &str); 10] = [
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
];

const PUNCTUATION: [(char, &str); 5] = [
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('/', "-..-."),
    ('@', ".--.-."),
];

fn pattern(symbols: impl Iterator<Item = Symbol>) -> String {
    symbols.map(Symbol::as_char).collect()
}

#[test]
fn test_letters_match_table() {
    for (c, expected) in LETTERS {
        let code = encode(c).unwrap();
        assert_eq!(pattern(code.symbols()), expected, "letter {}", c);
    }
}

#[test]
fn test_digits_match_table() {
    for (c, expected) in DIGITS {
        let code = encode(c).unwrap();
        assert_eq!(pattern(code.symbols()), expected, "digit {}", c);
    }
}

#[test]
fn test_punctuation_match_table() {
    for (c, expected) in PUNCTUATION {
        assert_eq!(encode(c).unwrap().as_str(), expected, "punctuation {}", c);
    }
}

#[test]
fn test_a_and_zero_symbols() {
    let a: Vec<Symbol> = encode('A').unwrap().symbols().collect();
    assert_eq!(a, [Symbol::Dot, Symbol::Dash]);

    let zero: Vec<Symbol> = encode('0').unwrap().symbols().collect();
    assert_eq!(zero, [Symbol::Dash; 5]);
}

#[test]
fn test_unsupported_characters() {
    for c in [' ', '#', '!', '-', '\n', '\t', 'a', 'z', 'é', 'Ä', '€', '\0'] {
        assert_eq!(encode(c), Err(Unsupported(c)), "{:?} should be unsupported", c);
    }
}

#[test]
fn test_every_ascii_outside_alphabet_is_unsupported() {
    for b in 0u8..=0x7F {
        let c = b as char;
        let tabulated = c.is_ascii_uppercase() || c.is_ascii_digit() || ".,?/@".contains(c);
        assert_eq!(encode(c).is_ok(), tabulated, "{:?}", c);
    }
}

#[test]
fn test_alphabet_lists_every_entry_once() {
    let entries: Vec<(char, String)> = alphabet()
        .map(|(c, code)| (c, code.to_string()))
        .collect();
    assert_eq!(entries.len(), ALPHABET_LEN);

    let expected: Vec<(char, String)> = LETTERS
        .iter()
        .chain(DIGITS.iter())
        .chain(PUNCTUATION.iter())
        .map(|&(c, p)| (c, p.to_string()))
        .collect();
    assert_eq!(entries, expected);
}

#[test]
fn test_display_renders_pattern() {
    assert_eq!(format!("{}", encode('Q').unwrap()), "--.-");
    assert_eq!(format!("{:?}", encode('Q').unwrap()), "MorseCode(--.-)");
}
