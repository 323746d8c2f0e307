#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! Multi-pattern text scanning and entity extraction.
//!
//! Every engine works on raw bytes and reports byte offsets into the buffer
//! it was given. Engines are built up with `add_*` calls and then queried
//! through `&self`; a populated engine can be shared across threads for
//! reads, but mutation needs exclusive access.

pub mod automaton;
pub mod byte_class;
pub mod entity;
pub mod error;
pub mod scanner;
pub mod tokenizer;
mod types;

pub use automaton::{Automaton, MATCH_CONFIDENCE};
pub use entity::extractor::{EntityExtractor, ExtractorConfig, KeywordGroup, PatternCategory};
pub use entity::parallel::extract_all_parallel;
pub use entity::{Entity, EntityType};
pub use error::{Error, Result};
pub use scanner::{ScannerConfig, SubstringScanner};
pub use tokenizer::{Token, TokenType, Tokenizer};
pub use types::{Match, Pattern};
