//! Entity extraction command.
//!
//! Three routes: the configured extractor (optionally narrowed to one type or
//! run per line in parallel), or the fixed fork-join over the built-in regex
//! categories.

use flowscan_core::{
    Entity, EntityExtractor, EntityType, ExtractorConfig, KeywordGroup, extract_all_parallel,
};
use tracing::{debug, warn};

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    pub config: ExtractorConfig,
    /// Restrict output to one entity type
    pub entity_type: Option<EntityType>,
    /// Use the fork-join extractor over the built-in patterns
    pub parallel: bool,
    /// Extract each line of `text` separately
    pub lines: bool,
    /// Keyword groups added on top of the configured ones
    pub keywords: Vec<KeywordGroup>,
    pub text: String,
}

/// Strategy for the composite entity extractor.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        if input.parallel {
            if !input.keywords.is_empty() || !input.config.keywords.is_empty() {
                warn!("--parallel uses the built-in patterns only; keywords are ignored");
            }
            return super::print_json(&extract_all_parallel(&input.text));
        }

        let mut config = input.config;
        config.keywords.extend(input.keywords);
        let extractor = EntityExtractor::from_config(&config);
        debug!(
            keywords = extractor.keyword_count(),
            compile_errors = extractor.compile_errors().len(),
            "extractor ready"
        );

        if input.lines {
            let lines: Vec<&str> = input.text.lines().collect();
            return super::print_json(&extract_lines(&extractor, &lines, input.entity_type));
        }

        super::print_json(&extract_one(&extractor, &input.text, input.entity_type))
    }
}

fn extract_one(extractor: &EntityExtractor, text: &str, kind: Option<EntityType>) -> Vec<Entity> {
    kind.map_or_else(
        || extractor.extract(text),
        |kind| extractor.extract_type(text, kind),
    )
}

/// One result list per line. Without a type filter the lines go through the
/// parallel batch; with one, each line takes the `extract_type` route.
fn extract_lines(
    extractor: &EntityExtractor,
    lines: &[&str],
    kind: Option<EntityType>,
) -> Vec<Vec<Entity>> {
    if kind.is_none() {
        return extractor.extract_batch(lines);
    }
    lines
        .iter()
        .map(|line| extract_one(extractor, line, kind))
        .collect()
}
