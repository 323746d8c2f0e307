//! Multi-pattern literal substring scanner.
//!
//! Each registered pattern is located by scanning the text for its first byte
//! and verifying the full pattern at every candidate offset. Matching is
//! ASCII case-insensitive unless the scanner was configured otherwise.

pub mod first_byte;

use serde::{Deserialize, Serialize};

use crate::byte_class::is_word_char;
use crate::types::{Match, Pattern};

/// Scanner behavior switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Compare bytes exactly instead of ASCII-lowercasing both sides.
    #[serde(default)]
    pub case_sensitive: bool,

    /// Keep a match only when it is not glued to word bytes on either side.
    #[serde(default)]
    pub whole_word: bool,

    /// Confidence given to patterns added without one.
    #[serde(default = "ScannerConfig::default_confidence")]
    pub base_confidence: f32,
}

impl ScannerConfig {
    const fn default_confidence() -> f32 {
        0.8
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            base_confidence: Self::default_confidence(),
        }
    }
}

#[derive(Debug, Clone)]
struct StoredPattern {
    pattern: Pattern,
    lowered: Vec<u8>,
}

/// Literal scanner reporting every occurrence of every pattern.
///
/// Occurrences of the same pattern may overlap: after a hit at `p` the next
/// candidate is `p + 1`, so `"aa"` is found twice in `"aaa"`.
#[derive(Debug, Clone, Default)]
pub struct SubstringScanner {
    patterns: Vec<StoredPattern>,
    config: ScannerConfig,
}

impl SubstringScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: ScannerConfig) -> Self {
        Self {
            patterns: Vec::new(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Register a pattern under a caller-chosen id.
    ///
    /// Empty patterns are stored but never match.
    pub fn add_pattern(&mut self, text: impl AsRef<[u8]>, id: usize, confidence: f32) {
        let text = text.as_ref().to_vec();
        let lowered = text.to_ascii_lowercase();
        self.patterns.push(StoredPattern {
            pattern: Pattern {
                text,
                id,
                confidence,
            },
            lowered,
        });
    }

    /// Register a pattern with the configured base confidence.
    pub fn add_pattern_default(&mut self, text: impl AsRef<[u8]>, id: usize) {
        self.add_pattern(text, id, self.config.base_confidence);
    }

    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Every occurrence of every pattern, sorted by start offset.
    ///
    /// Matches that share a start offset come out in no particular order.
    #[must_use]
    pub fn find_all(&self, text: impl AsRef<[u8]>) -> Vec<Match> {
        let text = text.as_ref();
        let mut matches = Vec::new();

        if self.patterns.is_empty() || text.is_empty() {
            return matches;
        }

        let lowered;
        let haystack: &[u8] = if self.config.case_sensitive {
            text
        } else {
            lowered = text.to_ascii_lowercase();
            &lowered
        };

        for stored in &self.patterns {
            let needle: &[u8] = if self.config.case_sensitive {
                &stored.pattern.text
            } else {
                &stored.lowered
            };

            let Some(&first) = needle.first() else {
                continue;
            };
            if needle.len() > haystack.len() {
                continue;
            }

            for pos in first_byte::find_all(haystack, first) {
                let end = pos + needle.len();
                if end > haystack.len() || &haystack[pos..end] != needle {
                    continue;
                }
                if self.config.whole_word && !Self::on_word_boundary(haystack, pos, end) {
                    continue;
                }
                matches.push(Match {
                    start: pos,
                    end,
                    pattern_id: stored.pattern.id,
                    confidence: stored.pattern.confidence,
                });
            }
        }

        matches.sort_by_key(|m| m.start);
        matches
    }

    /// Number of matches `find_all` would return.
    #[must_use]
    pub fn count_matches(&self, text: impl AsRef<[u8]>) -> usize {
        self.find_all(text).len()
    }

    fn on_word_boundary(haystack: &[u8], start: usize, end: usize) -> bool {
        let before = start.checked_sub(1).map(|i| haystack[i]);
        let after = haystack.get(end).copied();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    }
}
