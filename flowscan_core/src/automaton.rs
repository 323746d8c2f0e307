//! Aho-Corasick automaton over raw bytes.
//!
//! The trie lives in one `Vec<Node>`; child and failure links are indices into
//! that vector, so back-edges need no shared ownership.
//!
//! **Usage contract:** `search` only reports matches after `build` has run
//! since the last `add_pattern`. Searching an unbuilt automaton returns an
//! empty list rather than an error.

use std::collections::VecDeque;

use tracing::debug;

use crate::types::Match;

/// Confidence attached to every automaton match.
pub const MATCH_CONFIDENCE: f32 = 0.9;

const ALPHABET_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(u32);

impl NodeId {
    const ROOT: Self = Self(0);

    const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct Node {
    children: [Option<NodeId>; ALPHABET_SIZE],
    fail: NodeId,
    /// `(pattern_id, pattern_len)` for patterns inserted ending here.
    own: Vec<(usize, usize)>,
    /// `own` followed by the outputs inherited along the failure chain.
    /// Recomputed from `own` on every build.
    outputs: Vec<(usize, usize)>,
}

impl Node {
    const fn new() -> Self {
        Self {
            children: [None; ALPHABET_SIZE],
            fail: NodeId::ROOT,
            own: Vec::new(),
            outputs: Vec::new(),
        }
    }
}

/// Multi-pattern matcher reporting every occurrence of every pattern in one
/// pass, including patterns that are suffixes of other patterns.
#[derive(Debug, Clone)]
pub struct Automaton {
    nodes: Vec<Node>,
    pattern_count: usize,
    built: bool,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
            pattern_count: 0,
            built: false,
        }
    }

    /// Insert a pattern into the trie. Empty patterns are ignored.
    ///
    /// Invalidates any previous `build`.
    pub fn add_pattern(&mut self, pattern: impl AsRef<[u8]>, id: usize) {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return;
        }

        let mut node = NodeId::ROOT;
        for &byte in pattern {
            let slot = usize::from(byte);
            node = if let Some(child) = self.nodes[node.index()].children[slot] {
                child
            } else {
                let child = self.push_node();
                self.nodes[node.index()].children[slot] = Some(child);
                child
            };
        }

        self.nodes[node.index()].own.push((id, pattern.len()));
        self.pattern_count += 1;
        self.built = false;
    }

    /// Compute failure links breadth-first. A no-op when already built.
    ///
    /// Links and inherited outputs are recomputed from scratch, so a rebuild
    /// after further `add_pattern` calls equals a single fresh build.
    pub fn build(&mut self) {
        if self.built {
            return;
        }

        for node in &mut self.nodes {
            node.fail = NodeId::ROOT;
            node.outputs.clone_from(&node.own);
        }

        let mut queue = VecDeque::new();
        for slot in 0..ALPHABET_SIZE {
            if let Some(child) = self.nodes[NodeId::ROOT.index()].children[slot] {
                self.nodes[child.index()].fail = NodeId::ROOT;
                queue.push_back(child);
            }
        }

        while let Some(current) = queue.pop_front() {
            for slot in 0..ALPHABET_SIZE {
                let Some(child) = self.nodes[current.index()].children[slot] else {
                    continue;
                };

                let mut fail = self.nodes[current.index()].fail;
                while fail != NodeId::ROOT && self.nodes[fail.index()].children[slot].is_none() {
                    fail = self.nodes[fail.index()].fail;
                }

                let target = match self.nodes[fail.index()].children[slot] {
                    Some(next) if next != child => next,
                    _ => NodeId::ROOT,
                };
                self.nodes[child.index()].fail = target;

                // The target is shallower, so its outputs are already complete.
                let inherited = self.nodes[target.index()].outputs.clone();
                self.nodes[child.index()].outputs.extend(inherited);

                queue.push_back(child);
            }
        }

        self.built = true;
        debug!(
            nodes = self.nodes.len(),
            patterns = self.pattern_count,
            "aho-corasick automaton built"
        );
    }

    #[must_use]
    pub const fn is_built(&self) -> bool {
        self.built
    }

    #[must_use]
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Trie size including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All pattern occurrences, in order of their end offset.
    ///
    /// Returns an empty list when the automaton is not built or `text` is
    /// empty.
    #[must_use]
    pub fn search(&self, text: impl AsRef<[u8]>) -> Vec<Match> {
        let text = text.as_ref();
        let mut matches = Vec::new();

        if !self.built || text.is_empty() {
            return matches;
        }

        let mut state = NodeId::ROOT;
        for (i, &byte) in text.iter().enumerate() {
            let slot = usize::from(byte);

            while state != NodeId::ROOT && self.nodes[state.index()].children[slot].is_none() {
                state = self.nodes[state.index()].fail;
            }
            if let Some(next) = self.nodes[state.index()].children[slot] {
                state = next;
            }

            let end = i + 1;
            matches.extend(
                self.nodes[state.index()]
                    .outputs
                    .iter()
                    .map(|&(pattern_id, len)| Match {
                        start: end - len,
                        end,
                        pattern_id,
                        confidence: MATCH_CONFIDENCE,
                    }),
            );
        }

        matches
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> Automaton {
        let mut ac = Automaton::new();
        ac.add_pattern("he", 1);
        ac.add_pattern("she", 2);
        ac.add_pattern("his", 3);
        ac.add_pattern("hers", 4);
        ac.build();
        ac
    }

    fn triples(matches: &[Match]) -> Vec<(usize, usize, usize)> {
        matches
            .iter()
            .map(|m| (m.start, m.end, m.pattern_id))
            .collect()
    }

    #[test]
    fn suffix_patterns_fire_with_their_superstring() {
        let matches = classic().search("ushers");
        assert_eq!(triples(&matches), vec![(1, 4, 2), (2, 4, 1), (2, 6, 4)]);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "confidence is a fixed constant")]
    fn every_match_carries_the_fixed_confidence() {
        let matches = classic().search("ushers his");
        assert!(!matches.is_empty());
        assert!(matches.iter().all(|m| m.confidence == MATCH_CONFIDENCE));
    }

    #[test]
    fn unbuilt_automaton_reports_nothing() {
        let mut ac = Automaton::new();
        ac.add_pattern("abc", 0);
        assert!(!ac.is_built());
        assert!(ac.search("abc").is_empty());

        ac.build();
        assert_eq!(ac.search("abc").len(), 1);

        ac.add_pattern("bc", 1);
        assert!(!ac.is_built());
        assert!(ac.search("abc").is_empty());
    }

    #[test]
    fn empty_text_and_empty_patterns() {
        let mut ac = Automaton::new();
        ac.add_pattern("", 0);
        assert_eq!(ac.pattern_count(), 0);
        assert_eq!(ac.node_count(), 1);

        ac.build();
        assert!(ac.search("").is_empty());
        assert!(ac.search("abc").is_empty());
    }

    #[test]
    fn build_is_idempotent() {
        let mut ac = classic();
        let first = ac.search("ushers and his hershey");
        ac.build();
        let second = ac.search("ushers and his hershey");
        assert_eq!(first, second);
    }

    #[test]
    fn rebuild_after_more_patterns_matches_a_fresh_build() {
        let mut incremental = Automaton::new();
        incremental.add_pattern("he", 1);
        incremental.add_pattern("she", 2);
        incremental.build();
        assert_eq!(triples(&incremental.search("she")), vec![(0, 3, 2), (1, 3, 1)]);

        incremental.add_pattern("x", 3);
        incremental.build();
        incremental.add_pattern("hers", 4);
        incremental.build();

        let mut fresh = Automaton::new();
        fresh.add_pattern("he", 1);
        fresh.add_pattern("she", 2);
        fresh.add_pattern("x", 3);
        fresh.add_pattern("hers", 4);
        fresh.build();

        let text = "she ushers x hershey";
        assert_eq!(incremental.search(text), fresh.search(text));
        assert_eq!(triples(&incremental.search("she")), vec![(0, 3, 2), (1, 3, 1)]);
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let mut ac = Automaton::new();
        ac.add_pattern("abcd", 0);
        ac.add_pattern("abce", 1);
        // root + a, b, c + d, e
        assert_eq!(ac.node_count(), 6);
    }

    #[test]
    fn repeated_pattern_overlaps() {
        let mut ac = Automaton::new();
        ac.add_pattern("aa", 0);
        ac.build();
        assert_eq!(triples(&ac.search("aaaa")), vec![(0, 2, 0), (1, 3, 0), (2, 4, 0)]);
    }

    #[test]
    fn duplicate_patterns_report_both_ids() {
        let mut ac = Automaton::new();
        ac.add_pattern("key", 10);
        ac.add_pattern("key", 11);
        ac.build();
        assert_eq!(triples(&ac.search("key")), vec![(0, 3, 10), (0, 3, 11)]);
    }

    #[test]
    fn matching_is_byte_exact() {
        let mut ac = Automaton::new();
        ac.add_pattern("Acme", 0);
        ac.add_pattern("€", 1);
        ac.build();

        assert!(ac.search("acme").is_empty());
        assert_eq!(triples(&ac.search("Acme €")), vec![(0, 4, 0), (5, 8, 1)]);
    }

    #[test]
    fn failure_links_recover_after_mismatch() {
        let mut ac = Automaton::new();
        ac.add_pattern("abcx", 0);
        ac.add_pattern("bcd", 1);
        ac.build();
        assert_eq!(triples(&ac.search("abcd")), vec![(1, 4, 1)]);
    }
}
