//! Classifying tokenizer.
//!
//! Splits text into typed spans that tile the input exactly: the first token
//! starts at 0, each token ends where the next begins, and the last token ends
//! at the input length.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::byte_class::{is_digit, is_whitespace, is_word_char};
use crate::error::Error;

/// Kind of a token span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TokenType {
    Word = 0,
    Number = 1,
    Date = 2,
    Email = 3,
    Currency = 4,
    Punctuation = 5,
    Whitespace = 6,
    Unknown = 7,
}

impl TokenType {
    pub const ALL: [Self; 8] = [
        Self::Word,
        Self::Number,
        Self::Date,
        Self::Email,
        Self::Currency,
        Self::Punctuation,
        Self::Whitespace,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Number => "number",
            Self::Date => "date",
            Self::Email => "email",
            Self::Currency => "currency",
            Self::Punctuation => "punctuation",
            Self::Whitespace => "whitespace",
            Self::Unknown => "unknown",
        }
    }

    /// Stable integer code used at adapter boundaries.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| Error::UnknownTokenType(s.to_string()))
    }
}

/// A typed span borrowed from the tokenized buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a [u8],
    pub token_type: TokenType,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    /// The span as UTF-8 text, if it is valid UTF-8.
    ///
    /// Only single-byte punctuation tokens can hold a lone non-ASCII byte.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.text).ok()
    }
}

/// Stateless tokenizer backed by the static byte tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Split `text` into tokens that tile it without gaps or overlaps.
    ///
    /// Whitespace runs become one token. A run that starts with a word byte,
    /// `@`, `.` or `$` extends over word bytes and `@ . / - $ ,`, then gets
    /// classified. Any other byte is a one-byte punctuation token.
    #[must_use]
    pub fn tokenize<'a>(&self, text: &'a (impl AsRef<[u8]> + ?Sized)) -> Vec<Token<'a>> {
        let bytes = text.as_ref();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            let start = i;
            let byte = bytes[i];

            let token_type = if is_whitespace(byte) {
                while i < bytes.len() && is_whitespace(bytes[i]) {
                    i += 1;
                }
                TokenType::Whitespace
            } else if starts_run(byte) {
                while i < bytes.len() && continues_run(bytes[i]) {
                    i += 1;
                }
                classify_token(&bytes[start..i])
            } else {
                i += 1;
                TokenType::Punctuation
            };

            tokens.push(Token {
                text: &bytes[start..i],
                token_type,
                start,
                end: i,
            });
        }

        tokens
    }

    /// The word tokens of `text`, in order.
    #[must_use]
    pub fn split_words<'a>(&self, text: &'a (impl AsRef<[u8]> + ?Sized)) -> Vec<&'a str> {
        self.tokenize(text)
            .into_iter()
            .filter(|t| t.token_type == TokenType::Word)
            .filter_map(|t| t.as_str())
            .collect()
    }
}

fn starts_run(byte: u8) -> bool {
    is_word_char(byte) || matches!(byte, b'@' | b'.' | b'$')
}

fn continues_run(byte: u8) -> bool {
    is_word_char(byte) || matches!(byte, b'@' | b'.' | b'/' | b'-' | b'$' | b',')
}

/// Classify a single span.
///
/// Rules apply in order: email (`@` and `.` both present), currency (leading
/// `$` or the `0xE2` lead byte of multi-byte currency signs), date (digits
/// and a `/` or `-`, no letters), number (digits, no letters), word (any ASCII
/// letter), whitespace, punctuation.
#[must_use]
pub fn classify_token(span: &[u8]) -> TokenType {
    let Some(&first) = span.first() else {
        return TokenType::Unknown;
    };

    if span.contains(&b'@') && span.contains(&b'.') {
        return TokenType::Email;
    }

    if first == b'$' || first == 0xE2 {
        return TokenType::Currency;
    }

    let mut has_digit = false;
    let mut has_alpha = false;
    let mut has_date_sep = false;
    for &byte in span {
        if is_digit(byte) {
            has_digit = true;
        } else if byte.is_ascii_alphabetic() {
            has_alpha = true;
        }
        if byte == b'/' || byte == b'-' {
            has_date_sep = true;
        }
    }

    if has_digit && !has_alpha {
        if has_date_sep {
            return TokenType::Date;
        }
        return TokenType::Number;
    }
    if has_alpha {
        return TokenType::Word;
    }
    if is_whitespace(first) {
        return TokenType::Whitespace;
    }
    TokenType::Punctuation
}
