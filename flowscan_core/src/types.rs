//! Data model shared by the literal matchers.

use serde::{Deserialize, Serialize};

/// A literal registered with a matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub text: Vec<u8>,
    pub id: usize,
    pub confidence: f32,
}

/// One occurrence of a pattern in a searched buffer.
///
/// `start..end` is a byte range into the buffer that was searched, never a
/// code-point range. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub pattern_id: usize,
    pub confidence: f32,
}

impl Match {
    /// Length of the matched span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrow the matched bytes out of the buffer that produced this match.
    #[must_use]
    pub fn slice<'a>(&self, haystack: &'a [u8]) -> &'a [u8] {
        &haystack[self.start..self.end]
    }
}
