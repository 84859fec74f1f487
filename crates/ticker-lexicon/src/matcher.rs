use std::collections::{HashMap, HashSet};

use aho_corasick::AhoCorasick;
use bitvec::prelude::*;
use ticker_types::{EntityKind, EntitySpan};
use tracing::debug;

use crate::{Lexicon, LexiconError};

/// Short or ambiguous tokens that are never treated as entities.
pub const DEFAULT_STOP_WORDS: &[&str] = &["A", "RBC", "two", "UK"];

type BitSet = BitVec<usize, Lsb0>;

/// Case-sensitive exact matcher over every lexicon symbol and company name.
#[derive(Debug, Clone)]
pub struct EntityMatcher {
    automaton: AhoCorasick,
    kinds: Vec<EntityKind>,
}

impl EntityMatcher {
    /// Compile the lexicon into a single automaton, skipping `stop_words`.
    ///
    /// Symbols are registered before company names, so a string that is both
    /// is reported as [`EntityKind::Stock`].
    pub fn new<S: AsRef<str>>(lexicon: &Lexicon, stop_words: &[S]) -> Result<Self, LexiconError> {
        let stops: HashSet<&str> = stop_words.iter().map(AsRef::as_ref).collect();

        let mut seen: HashMap<&str, EntityKind> = HashMap::new();
        let mut patterns: Vec<&str> = Vec::new();
        let mut kinds: Vec<EntityKind> = Vec::new();
        let symbols = lexicon
            .entries()
            .iter()
            .map(|e| (e.symbol.as_str(), EntityKind::Stock));
        let companies = lexicon
            .entries()
            .iter()
            .map(|e| (e.company_name.as_str(), EntityKind::Company));
        for (pattern, kind) in symbols.chain(companies) {
            if stops.contains(pattern) || seen.contains_key(pattern) {
                continue;
            }
            seen.insert(pattern, kind);
            patterns.push(pattern);
            kinds.push(kind);
        }

        let automaton = AhoCorasick::new(&patterns)?;
        debug!(
            "entity matcher compiled {} patterns ({} stop words)",
            patterns.len(),
            stops.len()
        );
        Ok(Self { automaton, kinds })
    }

    pub fn pattern_count(&self) -> usize {
        self.kinds.len()
    }

    /// Find entity spans in order of occurrence.
    ///
    /// Matches must sit on token boundaries. Overlapping candidates are
    /// resolved longest first, then earliest, so `Apple Inc.` is not
    /// shadowed by a shorter `Apple`.
    pub fn find<'t>(&self, text: &'t str) -> Vec<EntitySpan<'t>> {
        let mut candidates: Vec<EntitySpan<'t>> = self
            .automaton
            .find_overlapping_iter(text)
            .filter(|m| on_token_boundary(text, m.start(), m.end()))
            .map(|m| EntitySpan {
                text: &text[m.range()],
                start: m.start(),
                kind: self.kinds[m.pattern().as_usize()],
            })
            .collect();
        if candidates.is_empty() {
            return candidates;
        }

        candidates.sort_by(|a, b| {
            b.text
                .len()
                .cmp(&a.text.len())
                .then(a.start.cmp(&b.start))
        });

        let mut claimed: BitSet = bitvec![usize, Lsb0; 0; text.len()];
        let mut spans = Vec::with_capacity(candidates.len());
        for span in candidates {
            let range = span.start..span.end();
            if claimed[range.clone()].not_any() {
                claimed[range].fill(true);
                spans.push(span);
            }
        }
        spans.sort_by_key(|span| span.start);
        spans
    }
}

fn on_token_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
