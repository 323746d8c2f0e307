use flowscan_core::{Automaton, Match};
use serde::Serialize;
use tracing::debug;

/// Input parameters for the Search command strategy.
#[derive(Debug, Clone)]
pub struct SearchInput {
    /// Keywords in id order
    pub patterns: Vec<String>,
    pub text: String,
}

#[derive(Debug, Serialize)]
struct MatchView<'a> {
    start: usize,
    end: usize,
    pattern_id: usize,
    pattern: &'a str,
}

/// Strategy for the keyword automaton.
///
/// Matches come out in end-offset order, as the automaton reports them.
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy;

impl super::CommandStrategy for SearchStrategy {
    type Input = SearchInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut automaton = Automaton::new();
        for (id, pattern) in input.patterns.iter().enumerate() {
            automaton.add_pattern(pattern, id);
        }
        automaton.build();
        debug!(
            patterns = automaton.pattern_count(),
            nodes = automaton.node_count(),
            "automaton built"
        );

        let views: Vec<MatchView<'_>> = automaton
            .search(&input.text)
            .into_iter()
            .map(|m: Match| MatchView {
                start: m.start,
                end: m.end,
                pattern_id: m.pattern_id,
                pattern: input.patterns.get(m.pattern_id).map_or("", String::as_str),
            })
            .collect();

        super::print_json(&views)
    }
}
