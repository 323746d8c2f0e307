//! Typed entity extraction.
//!
//! Category regexes (dates, amounts, email) and a keyword automaton produce
//! confidence-scored entities with byte offsets into the source text.

pub mod extractor;
pub mod parallel;
pub mod patterns;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of an extracted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EntityType {
    Date = 0,
    Person = 1,
    Organization = 2,
    Amount = 3,
    Email = 4,
    Unknown = 99,
}

impl EntityType {
    pub const ALL: [Self; 6] = [
        Self::Date,
        Self::Person,
        Self::Organization,
        Self::Amount,
        Self::Email,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Person => "person",
            Self::Organization => "organization",
            Self::Amount => "amount",
            Self::Email => "email",
            Self::Unknown => "unknown",
        }
    }

    /// Stable integer code used at adapter boundaries.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "person" => Ok(Self::Person),
            "organization" | "org" => Ok(Self::Organization),
            "amount" => Ok(Self::Amount),
            "email" => Ok(Self::Email),
            "unknown" => Ok(Self::Unknown),
            _ => Err(Error::UnknownEntityType(s.to_string())),
        }
    }
}

/// An extracted entity. `start..end` is a byte range into the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub value: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Entity {
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        entity_type: EntityType,
        start: usize,
        end: usize,
        confidence: f32,
    ) -> Self {
        Self {
            value: value.into(),
            entity_type,
            start,
            end,
            confidence,
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
