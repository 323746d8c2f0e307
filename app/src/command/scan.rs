use flowscan_core::{Match, ScannerConfig, SubstringScanner};
use serde::Serialize;
use tracing::debug;

/// Input parameters for the Scan command strategy.
#[derive(Debug, Clone)]
pub struct ScanInput {
    pub config: ScannerConfig,
    /// Literals in id order
    pub patterns: Vec<String>,
    /// Print the match count instead of the matches
    pub count: bool,
    pub text: String,
}

#[derive(Debug, Serialize)]
struct MatchView<'a> {
    #[serde(flatten)]
    found: Match,
    pattern: &'a str,
    text: String,
}

/// Strategy for the literal substring scanner.
#[derive(Debug, Clone, Copy)]
pub struct ScanStrategy;

impl super::CommandStrategy for ScanStrategy {
    type Input = ScanInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut scanner = SubstringScanner::with_config(input.config);
        for (id, pattern) in input.patterns.iter().enumerate() {
            scanner.add_pattern_default(pattern, id);
        }
        debug!(
            patterns = scanner.pattern_count(),
            case_sensitive = scanner.config().case_sensitive,
            whole_word = scanner.config().whole_word,
            "scanner ready"
        );

        if input.count {
            println!("{}", scanner.count_matches(&input.text));
            return Ok(());
        }

        let haystack = input.text.as_bytes();
        let views: Vec<MatchView<'_>> = scanner
            .find_all(haystack)
            .into_iter()
            .map(|found| MatchView {
                found,
                pattern: input
                    .patterns
                    .get(found.pattern_id)
                    .map_or("", String::as_str),
                text: String::from_utf8_lossy(found.slice(haystack)).into_owned(),
            })
            .collect();

        super::print_json(&views)
    }
}
