//! Static byte classification tables.
//!
//! Lookups are a single indexed load, so the tokenizer's inner loops never
//! branch on character ranges.

/// Bytes that can appear inside a word: ASCII letters, digits, `_` and `'`.
pub static WORD: [bool; 256] = build_word_table();

/// ASCII digits `0-9`.
pub static DIGIT: [bool; 256] = build_digit_table();

/// Space, tab, carriage return and line feed.
pub static WHITESPACE: [bool; 256] = build_whitespace_table();

#[inline]
#[must_use]
pub fn is_word_char(byte: u8) -> bool {
    WORD[usize::from(byte)]
}

#[inline]
#[must_use]
pub fn is_digit(byte: u8) -> bool {
    DIGIT[usize::from(byte)]
}

#[inline]
#[must_use]
pub fn is_whitespace(byte: u8) -> bool {
    WHITESPACE[usize::from(byte)]
}

const fn build_digit_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut b = b'0';
    while b <= b'9' {
        table[b as usize] = true;
        b += 1;
    }
    table
}

const fn build_word_table() -> [bool; 256] {
    let mut table = build_digit_table();
    let mut b = b'a';
    while b <= b'z' {
        table[b as usize] = true;
        table[b.to_ascii_uppercase() as usize] = true;
        b += 1;
    }
    table[b'_' as usize] = true;
    table[b'\'' as usize] = true;
    table
}

const fn build_whitespace_table() -> [bool; 256] {
    let mut table = [false; 256];
    table[b' ' as usize] = true;
    table[b'\t' as usize] = true;
    table[b'\r' as usize] = true;
    table[b'\n' as usize] = true;
    table
}
