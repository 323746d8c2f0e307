//! Composite entity extractor.
//!
//! Runs date patterns, amount patterns, the email pattern and the keyword
//! automaton over a text and merges their results. Pattern compile failures
//! never reach the caller of `extract`: the pattern is skipped, logged and
//! recorded in `compile_errors`.

use std::collections::HashMap;

use rayon::prelude::*;
use regex::bytes::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::automaton::Automaton;
use crate::entity::patterns::{
    self, AMOUNT_CONFIDENCE, DATE_CONFIDENCE, EMAIL_CONFIDENCE, EMAIL_REGEX,
};
use crate::entity::{Entity, EntityType};
use crate::error::Error;

/// Keywords registered under one entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub entity_type: EntityType,
    pub keywords: Vec<String>,
}

/// Configuration for an [`EntityExtractor`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Date regexes, applied in order. Empty disables date extraction.
    #[serde(default = "patterns::default_date_patterns")]
    pub date_patterns: Vec<String>,

    /// Amount regexes, applied in order. Empty disables amount extraction.
    #[serde(default = "patterns::default_amount_patterns")]
    pub amount_patterns: Vec<String>,

    /// Keyword groups, registered in order.
    #[serde(default)]
    pub keywords: Vec<KeywordGroup>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            date_patterns: patterns::default_date_patterns(),
            amount_patterns: patterns::default_amount_patterns(),
            keywords: Vec::new(),
        }
    }
}

/// Categories whose regex list can be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCategory {
    Date,
    Amount,
}

impl PatternCategory {
    const fn name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone)]
struct CategoryPattern {
    source: String,
    regex: Regex,
}

/// Extracts dates, amounts, emails and registered keywords from text.
///
/// An extractor starts with no date or amount patterns; install them with
/// [`add_date_patterns`](Self::add_date_patterns) and
/// [`add_amount_patterns`](Self::add_amount_patterns), or build one from an
/// [`ExtractorConfig`]. Email extraction is always on.
#[derive(Debug, Clone, Default)]
pub struct EntityExtractor {
    date_patterns: Vec<CategoryPattern>,
    amount_patterns: Vec<CategoryPattern>,
    keywords: Automaton,
    keyword_types: HashMap<usize, EntityType>,
    next_keyword_id: usize,
    compile_errors: Vec<String>,
}

impl EntityExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an extractor with the configured patterns and keyword groups.
    #[must_use]
    pub fn from_config(config: &ExtractorConfig) -> Self {
        let mut extractor = Self::new();
        extractor.set_patterns(PatternCategory::Date, config.date_patterns.as_slice());
        extractor.set_patterns(PatternCategory::Amount, config.amount_patterns.as_slice());
        for group in &config.keywords {
            extractor.add_keywords(group.entity_type, group.keywords.as_slice());
        }
        extractor
    }

    /// Install the built-in date patterns, replacing any previous list.
    pub fn add_date_patterns(&mut self) {
        self.set_patterns(PatternCategory::Date, patterns::DATE_PATTERNS);
    }

    /// Install the built-in amount patterns, replacing any previous list.
    pub fn add_amount_patterns(&mut self) {
        self.set_patterns(PatternCategory::Amount, patterns::AMOUNT_PATTERNS);
    }

    /// Replace the regex list of one category.
    ///
    /// Each pattern is compiled case-insensitively. Patterns that fail to
    /// compile are left out; the failure is logged and kept in
    /// [`compile_errors`](Self::compile_errors).
    pub fn set_patterns<S: AsRef<str>>(&mut self, category: PatternCategory, sources: &[S]) {
        let mut compiled = Vec::with_capacity(sources.len());
        for source in sources {
            let source = source.as_ref();
            match patterns::compile_category(source) {
                Ok(regex) => compiled.push(CategoryPattern {
                    source: source.to_string(),
                    regex,
                }),
                Err(err) => {
                    let err = Error::PatternCompile {
                        category: category.name(),
                        pattern: source.to_string(),
                        source: err,
                    };
                    warn!("Skipping pattern: {err}");
                    self.compile_errors.push(err.to_string());
                }
            }
        }

        debug!(
            category = category.name(),
            installed = compiled.len(),
            requested = sources.len(),
            "category patterns installed"
        );

        match category {
            PatternCategory::Date => self.date_patterns = compiled,
            PatternCategory::Amount => self.amount_patterns = compiled,
        }
    }

    /// Register keywords under `entity_type`, each with a fresh id.
    ///
    /// The keyword automaton is rebuilt before returning, so `extract` stays
    /// a read-only call.
    pub fn add_keywords<S: AsRef<str>>(&mut self, entity_type: EntityType, keywords: &[S]) {
        for keyword in keywords {
            self.keywords
                .add_pattern(keyword.as_ref().as_bytes(), self.next_keyword_id);
            self.keyword_types.insert(self.next_keyword_id, entity_type);
            self.next_keyword_id += 1;
        }
        self.keywords.build();
    }

    /// Number of keywords registered so far.
    #[must_use]
    pub const fn keyword_count(&self) -> usize {
        self.next_keyword_id
    }

    /// Source text of the installed patterns of one category, in order.
    #[must_use]
    pub fn patterns(&self, category: PatternCategory) -> Vec<&str> {
        let list = match category {
            PatternCategory::Date => &self.date_patterns,
            PatternCategory::Amount => &self.amount_patterns,
        };
        list.iter().map(|p| p.source.as_str()).collect()
    }

    /// Every pattern compile failure since this extractor was created.
    #[must_use]
    pub fn compile_errors(&self) -> &[String] {
        &self.compile_errors
    }

    /// All entities in `text`, sorted by start offset.
    ///
    /// Entities with the same start keep category order: dates, amounts,
    /// emails, keywords.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let mut entities = self.extract_dates(text);
        entities.extend(self.extract_amounts(text));
        entities.extend(Self::extract_emails(text));
        if !self.keyword_types.is_empty() {
            entities.extend(self.extract_keywords(text));
        }

        entities.sort_by_key(|e| e.start);
        entities
    }

    /// Entities of one type.
    ///
    /// Date, amount and email run only their own category and come back in
    /// pattern order, unsorted. Every other type runs the full `extract` and
    /// filters it.
    #[must_use]
    pub fn extract_type(&self, text: &str, entity_type: EntityType) -> Vec<Entity> {
        match entity_type {
            EntityType::Date => self.extract_dates(text),
            EntityType::Amount => self.extract_amounts(text),
            EntityType::Email => Self::extract_emails(text),
            EntityType::Person | EntityType::Organization | EntityType::Unknown => self
                .extract(text)
                .into_iter()
                .filter(|e| e.entity_type == entity_type)
                .collect(),
        }
    }

    /// Run `extract` over many texts on the rayon pool, keeping input order.
    #[must_use]
    pub fn extract_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Vec<Entity>> {
        texts
            .par_iter()
            .map(|text| self.extract(text.as_ref()))
            .collect()
    }

    fn extract_dates(&self, text: &str) -> Vec<Entity> {
        find_with(
            &self.date_patterns,
            text,
            EntityType::Date,
            DATE_CONFIDENCE,
            "date",
        )
    }

    fn extract_amounts(&self, text: &str) -> Vec<Entity> {
        find_with(
            &self.amount_patterns,
            text,
            EntityType::Amount,
            AMOUNT_CONFIDENCE,
            "amount",
        )
    }

    fn extract_emails(text: &str) -> Vec<Entity> {
        let Ok(regex) = EMAIL_REGEX.as_ref() else {
            return Vec::new();
        };
        regex
            .find_iter(text.as_bytes())
            .map(|m| {
                Entity::new(
                    String::from_utf8_lossy(m.as_bytes()),
                    EntityType::Email,
                    m.start(),
                    m.end(),
                    EMAIL_CONFIDENCE,
                )
                .with_metadata("matcher", "email")
            })
            .collect()
    }

    fn extract_keywords(&self, text: &str) -> Vec<Entity> {
        self.keywords
            .search(text.as_bytes())
            .into_iter()
            .filter_map(|m| {
                let entity_type = *self.keyword_types.get(&m.pattern_id)?;
                let value = text.get(m.start..m.end)?;
                Some(
                    Entity::new(value, entity_type, m.start, m.end, m.confidence)
                        .with_metadata("matcher", "keyword")
                        .with_metadata("keyword_id", m.pattern_id.to_string()),
                )
            })
            .collect()
    }
}

fn find_with(
    patterns: &[CategoryPattern],
    text: &str,
    entity_type: EntityType,
    confidence: f32,
    matcher: &str,
) -> Vec<Entity> {
    patterns
        .iter()
        .flat_map(|p| p.regex.find_iter(text.as_bytes()))
        .map(|m| {
            let value = String::from_utf8_lossy(m.as_bytes());
            Entity::new(value, entity_type, m.start(), m.end(), confidence)
                .with_metadata("matcher", matcher)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Meeting on 2024-01-15 about the $5 million deal with john@acme.com";

    fn full() -> EntityExtractor {
        let mut extractor = EntityExtractor::new();
        extractor.add_date_patterns();
        extractor.add_amount_patterns();
        extractor
    }

    fn values(entities: &[Entity], kind: EntityType) -> Vec<&str> {
        entities
            .iter()
            .filter(|e| e.entity_type == kind)
            .map(|e| e.value.as_str())
            .collect()
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "confidences are fixed constants")]
    fn composite_sample_yields_every_category() {
        let entities = full().extract(SAMPLE);

        let dates: Vec<&Entity> = entities
            .iter()
            .filter(|e| e.entity_type == EntityType::Date)
            .collect();
        assert!(dates.iter().any(|e| e.value == "2024-01-15"));
        assert!(dates.iter().all(|e| e.confidence == DATE_CONFIDENCE));

        let amounts = values(&entities, EntityType::Amount);
        assert!(amounts.contains(&"$5"));
        assert!(amounts.contains(&"5 million"));

        let emails: Vec<&Entity> = entities
            .iter()
            .filter(|e| e.entity_type == EntityType::Email)
            .collect();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].value, "john@acme.com");
        assert_eq!(emails[0].confidence, EMAIL_CONFIDENCE);

        assert!(entities.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn offsets_point_back_into_the_text() {
        for entity in full().extract(SAMPLE) {
            assert_eq!(&SAMPLE[entity.start..entity.end], entity.value);
        }
    }

    #[test]
    fn fresh_extractor_only_finds_emails() {
        let entities = EntityExtractor::new().extract(SAMPLE);
        assert_eq!(values(&entities, EntityType::Email), vec!["john@acme.com"]);
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn installing_defaults_twice_does_not_duplicate() {
        let mut extractor = full();
        extractor.add_date_patterns();
        extractor.add_amount_patterns();
        assert_eq!(extractor.extract(SAMPLE).len(), full().extract(SAMPLE).len());
    }

    #[test]
    fn written_dates_are_found() {
        let entities = full().extract_type(
            "Signed January 20, 2024 and renewed feb 3 2025.",
            EntityType::Date,
        );
        assert_eq!(
            values(&entities, EntityType::Date),
            vec!["January 20, 2024", "feb 3 2025"]
        );
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "confidence is the automaton constant")]
    fn keywords_use_automaton_confidence_and_metadata() {
        let mut extractor = EntityExtractor::new();
        extractor.add_keywords(EntityType::Organization, &["Acme", "Globex"]);
        extractor.add_keywords(EntityType::Person, &["John"]);
        assert_eq!(extractor.keyword_count(), 3);

        let entities = extractor.extract("John from Acme met Globex.");
        let keyword_hits: Vec<&Entity> = entities
            .iter()
            .filter(|e| e.metadata.get("matcher").map(String::as_str) == Some("keyword"))
            .collect();

        assert_eq!(keyword_hits.len(), 3);
        assert_eq!(keyword_hits[0].entity_type, EntityType::Person);
        assert_eq!(keyword_hits[1].value, "Acme");
        assert_eq!(keyword_hits[1].entity_type, EntityType::Organization);
        assert_eq!(
            keyword_hits[2].metadata.get("keyword_id").map(String::as_str),
            Some("1")
        );
        assert!(
            keyword_hits
                .iter()
                .all(|e| e.confidence == crate::automaton::MATCH_CONFIDENCE)
        );
    }

    #[test]
    fn keyword_matching_is_case_sensitive() {
        let mut extractor = EntityExtractor::new();
        extractor.add_keywords(EntityType::Organization, &["Acme"]);
        assert!(extractor.extract_type("acme corp", EntityType::Organization).is_empty());
    }

    #[test]
    fn later_keyword_groups_do_not_duplicate_suffix_hits() {
        let mut extractor = EntityExtractor::new();
        extractor.add_keywords(EntityType::Organization, &["Acme", "Big Acme"]);
        extractor.add_keywords(EntityType::Person, &["Bob"]);
        extractor.add_keywords(EntityType::Person, &["Alice"]);

        let entities = extractor.extract("Big Acme hired Bob");
        let hits: Vec<(&str, usize)> = entities
            .iter()
            .map(|e| (e.value.as_str(), e.start))
            .collect();
        assert_eq!(hits, vec![("Big Acme", 0), ("Acme", 4), ("Bob", 15)]);
    }

    #[test]
    fn non_ascii_digits_are_not_dates_or_amounts() {
        let extractor = full();
        assert!(extractor.extract("on ١٢/٠٥/٢٠٢٤ paid ٥ million").is_empty());
        assert_eq!(
            values(&extractor.extract("on 12/05/2024 paid ٥ million"), EntityType::Date),
            vec!["12/05/2024"]
        );
    }

    #[test]
    fn extract_type_fast_path_skips_sorting() {
        let extractor = full();
        // Pattern order puts the ISO match (second pattern) after the
        // numeric one (first pattern) even though it starts earlier.
        let dates = extractor.extract_type("2024-01-15", EntityType::Date);
        assert_eq!(values(&dates, EntityType::Date), vec!["24-01-15", "2024-01-15"]);

        let sorted = extractor.extract("2024-01-15");
        assert_eq!(values(&sorted, EntityType::Date), vec!["2024-01-15", "24-01-15"]);
    }

    #[test]
    fn extract_type_slow_path_filters_full_extraction() {
        let mut extractor = full();
        extractor.add_keywords(EntityType::Person, &["Alice"]);
        extractor.add_keywords(EntityType::Organization, &["Initech"]);

        let people = extractor.extract_type("Alice paid Initech $300", EntityType::Person);
        assert_eq!(values(&people, EntityType::Person), vec!["Alice"]);
        assert_eq!(people.len(), 1);

        assert!(
            extractor
                .extract_type("Alice paid Initech $300", EntityType::Unknown)
                .is_empty()
        );
    }

    #[test]
    fn broken_patterns_are_skipped_not_fatal() {
        let mut extractor = EntityExtractor::new();
        extractor.set_patterns(PatternCategory::Date, &[r"(\d{4}", r"\d{4}-\d{2}-\d{2}"]);

        assert_eq!(extractor.compile_errors().len(), 1);
        assert!(extractor.compile_errors()[0].contains("date"));
        assert_eq!(
            extractor.patterns(PatternCategory::Date),
            vec![r"\d{4}-\d{2}-\d{2}"]
        );

        let dates = extractor.extract_type("on 2024-01-15", EntityType::Date);
        assert_eq!(values(&dates, EntityType::Date), vec!["2024-01-15"]);
    }

    #[test]
    fn fully_broken_category_degrades_to_empty() {
        let mut extractor = EntityExtractor::new();
        extractor.set_patterns(PatternCategory::Amount, &["[unclosed"]);

        assert!(
            extractor
                .extract_type("$100 USD", EntityType::Amount)
                .is_empty()
        );
        assert!(!extractor.extract("mail me@example.org").is_empty());
    }

    #[test]
    fn empty_text_yields_nothing() {
        let mut extractor = full();
        extractor.add_keywords(EntityType::Person, &["Bob"]);
        assert!(extractor.extract("").is_empty());
    }

    #[test]
    fn config_drives_patterns_and_keywords() {
        let config = ExtractorConfig {
            date_patterns: Vec::new(),
            amount_patterns: vec![r"\d+ credits".to_string()],
            keywords: vec![KeywordGroup {
                entity_type: EntityType::Organization,
                keywords: vec!["Umbrella".to_string()],
            }],
        };
        let extractor = EntityExtractor::from_config(&config);

        let entities = extractor.extract("Umbrella owes 40 Credits since 2024-01-15");
        assert_eq!(values(&entities, EntityType::Organization), vec!["Umbrella"]);
        assert_eq!(values(&entities, EntityType::Amount), vec!["40 Credits"]);
        assert!(values(&entities, EntityType::Date).is_empty());
    }

    #[test]
    fn batch_preserves_input_order() {
        let extractor = full();
        let texts = ["pay $10", "nothing here", "write a@b.io"];
        let results = extractor.extract_batch(&texts);

        assert_eq!(results.len(), 3);
        assert_eq!(values(&results[0], EntityType::Amount), vec!["$10"]);
        assert!(results[1].is_empty());
        assert_eq!(values(&results[2], EntityType::Email), vec!["a@b.io"]);
    }
}
