//! Parse raw provider output into deduplicated term pairs.

use indexmap::IndexSet;

use crate::normalize::normalize_term;
use crate::term::TermPair;

/// Parse one `source<TAB>target` line.
///
/// Splits on the first tab only, so extra tabs stay in the target. Returns
/// `None` for lines without a tab or whose source normalizes to nothing.
pub fn parse_line(line: &str) -> Option<TermPair> {
    let (raw_source, raw_target) = line.split_once('\t')?;
    let source = normalize_term(raw_source);
    if source.is_empty() {
        return None;
    }
    Some(TermPair {
        source,
        target: raw_target.trim().to_string(),
    })
}

/// Accumulates term pairs across blocks and files of a single request.
///
/// Insertion order is preserved and the first occurrence of a pair wins.
#[derive(Debug, Default)]
pub struct TermAggregator {
    terms: IndexSet<TermPair>,
}

impl TermAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a provider response and add its pairs. Returns how many new
    /// pairs were added.
    pub fn push_raw(&mut self, raw: &str) -> usize {
        raw.lines()
            .filter_map(parse_line)
            .map(|pair| self.push(pair))
            .filter(|added| *added)
            .count()
    }

    /// Add a single pair. Returns `false` if it was already present.
    pub fn push(&mut self, pair: TermPair) -> bool {
        self.terms.insert(pair)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn into_terms(self) -> Vec<TermPair> {
        self.terms.into_iter().collect()
    }
}

/// Aggregate a sequence of raw provider outputs in order.
pub fn aggregate<I, S>(raw_outputs: I) -> Vec<TermPair>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut agg = TermAggregator::new();
    for raw in raw_outputs {
        agg.push_raw(raw.as_ref());
    }
    agg.into_terms()
}
