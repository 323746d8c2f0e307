//! Fork-join extraction over the three regex categories.

use tracing::debug;

use crate::entity::extractor::EntityExtractor;
use crate::entity::{Entity, EntityType};

/// Extract dates, amounts and emails concurrently.
///
/// Each branch owns its own extractor, so the branches share nothing. The
/// join always waits for all three. Results are concatenated as dates,
/// amounts, emails and are **not** sorted by offset, unlike
/// [`EntityExtractor::extract`]. As a set they equal the union of the three
/// single-category `extract_type` calls.
#[must_use]
pub fn extract_all_parallel(text: &str) -> Vec<Entity> {
    let (dates, (amounts, emails)) = rayon::join(
        || {
            let mut extractor = EntityExtractor::new();
            extractor.add_date_patterns();
            extractor.extract_type(text, EntityType::Date)
        },
        || {
            rayon::join(
                || {
                    let mut extractor = EntityExtractor::new();
                    extractor.add_amount_patterns();
                    extractor.extract_type(text, EntityType::Amount)
                },
                || EntityExtractor::new().extract_type(text, EntityType::Email),
            )
        },
    );

    debug!(
        dates = dates.len(),
        amounts = amounts.len(),
        emails = emails.len(),
        "parallel extraction joined"
    );

    let mut all = Vec::with_capacity(dates.len() + amounts.len() + emails.len());
    all.extend(dates);
    all.extend(amounts);
    all.extend(emails);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_in_category_order() {
        let entities = extract_all_parallel("Payment of $1,000,000 on 12/25/2024 from ceo@company.com");
        let kinds: Vec<EntityType> = entities.iter().map(|e| e.entity_type).collect();

        assert_eq!(
            kinds,
            vec![EntityType::Date, EntityType::Amount, EntityType::Email]
        );
        assert_eq!(entities[0].value, "12/25/2024");
        assert_eq!(entities[1].value, "$1,000,000");
        assert_eq!(entities[2].value, "ceo@company.com");
    }

    #[test]
    fn output_is_not_resorted() {
        // The email starts first but still comes last.
        let entities = extract_all_parallel("x@y.com paid $5");
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].entity_type, EntityType::Amount);
        assert_eq!(entities[1].entity_type, EntityType::Email);
        assert!(entities[0].start > entities[1].start);
    }

    #[test]
    fn empty_text_joins_cleanly() {
        assert!(extract_all_parallel("").is_empty());
    }
}
