//! Built-in category patterns.
//!
//! Date and amount patterns are compiled case-insensitively by the extractor,
//! in the order listed here. The email pattern is fixed and case-sensitive.
//!
//! Every pattern runs over bytes with Unicode mode off: `\d`, `\s`, `\b` and
//! case folding are ASCII-only, so non-ASCII digits or spaces never match.

use once_cell::sync::Lazy;
use regex::bytes::{Regex, RegexBuilder};

/// Date patterns: numeric day-first or month-first, ISO-like, then written
/// month names ("January 20, 2024", "Jan 20 2024").
pub const DATE_PATTERNS: &[&str] = &[
    r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}",
    r"\d{4}[/-]\d{1,2}[/-]\d{1,2}",
    r"(January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}",
    r"(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{1,2},?\s+\d{4}",
];

/// Amount patterns: dollar-prefixed, currency-suffixed, magnitude-suffixed.
pub const AMOUNT_PATTERNS: &[&str] = &[
    r"\$[\d,]+(\.\d{2})?",
    r"[\d,]+\s*(USD|EUR|GBP|dollars?|euros?)",
    r"\d+\s*(million|billion|thousand|[MBK])\b",
];

pub const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

pub const DATE_CONFIDENCE: f32 = 0.85;
pub const AMOUNT_CONFIDENCE: f32 = 0.90;
pub const EMAIL_CONFIDENCE: f32 = 0.95;

/// Compiled once; a failure is kept so callers can degrade to no matches.
#[allow(clippy::non_std_lazy_statics)]
pub static EMAIL_REGEX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| RegexBuilder::new(EMAIL_PATTERN).unicode(false).build());

/// Compile a category pattern the way the extractor does.
pub fn compile_category(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(false)
        .build()
}

#[must_use]
pub fn default_date_patterns() -> Vec<String> {
    DATE_PATTERNS.iter().map(ToString::to_string).collect()
}

#[must_use]
pub fn default_amount_patterns() -> Vec<String> {
    AMOUNT_PATTERNS.iter().map(ToString::to_string).collect()
}
