//! Contains [`FrequencyMap`], the per-symbol occurrence counts that
//! drive tree construction and get persisted verbatim in the container header.

use std::collections::btree_map::{self, BTreeMap};

/// Counts of how often every distinct symbol occurs in a text.
///
/// Iteration is ascending by symbol, which makes tree construction
/// independent of how the map was filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<char, u64>,
    total: u64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrequencyMapError {
    #[error("Symbol {symbol:?} has a count of zero")]
    ZeroCount { symbol: char },
    #[error("Symbol {symbol:?} appears more than once in the table")]
    DuplicateSymbol { symbol: char },
    #[error("Sum of all counts does not fit into 64 bits")]
    TotalOverflow,
}

impl FrequencyMap {
    /// Count every symbol of `text`. An empty text gives an empty map.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        let mut total = 0;
        for symbol in text.chars() {
            *counts.entry(symbol).or_insert(0) += 1;
            total += 1;
        }
        FrequencyMap { counts, total }
    }

    /// Build a map from counts that come from an untrusted source, like a
    /// decoded header.
    pub fn from_counts<I>(counts: I) -> Result<Self, FrequencyMapError>
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        let mut map = BTreeMap::new();
        let mut total: u64 = 0;
        for (symbol, count) in counts {
            if count == 0 {
                return Err(FrequencyMapError::ZeroCount { symbol });
            }
            if map.insert(symbol, count).is_some() {
                return Err(FrequencyMapError::DuplicateSymbol { symbol });
            }
            total = total
                .checked_add(count)
                .ok_or(FrequencyMapError::TotalOverflow)?;
        }
        Ok(FrequencyMap { counts: map, total })
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of symbols in the text this map was computed from
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.counts.iter(),
        }
    }
}

/// Iterator over `(symbol, count)` pairs in ascending symbol order.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, char, u64>,
}

impl Iterator for Iter<'_> {
    type Item = (char, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(symbol, count)| (*symbol, *count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a FrequencyMap {
    type Item = (char, u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{FrequencyMap, FrequencyMapError};

    #[test]
    fn counts_every_symbol() {
        let map = FrequencyMap::from_text("aaabbc");
        assert_eq!(map.get('a'), Some(3));
        assert_eq!(map.get('b'), Some(2));
        assert_eq!(map.get('c'), Some(1));
        assert_eq!(map.get('d'), None);
        assert_eq!(map.len(), 3);
        assert_eq!(map.total(), 6);
    }

    #[test]
    fn multibyte_symbols_count_once() {
        let map = FrequencyMap::from_text("ñüñ€");
        assert_eq!(map.get('ñ'), Some(2));
        assert_eq!(map.get('ü'), Some(1));
        assert_eq!(map.get('€'), Some(1));
        assert_eq!(map.total(), 4);
    }

    #[test]
    fn empty_text() {
        let map = FrequencyMap::from_text("");
        assert!(map.is_empty());
        assert_eq!(map.total(), 0);
    }

    #[test]
    fn iterates_in_symbol_order() {
        let map = FrequencyMap::from_text("cabbca");
        let symbols: Vec<char> = map.iter().map(|(symbol, _)| symbol).collect();
        assert_eq!(symbols, vec!['a', 'b', 'c']);
    }

    #[test]
    fn from_counts_matches_from_text() {
        let counted = FrequencyMap::from_text("aaabbc");
        let rebuilt = FrequencyMap::from_counts(vec![('c', 1), ('a', 3), ('b', 2)]).unwrap();
        assert_eq!(counted, rebuilt);
    }

    #[test]
    fn from_counts_rejects_bad_tables() {
        assert_eq!(
            FrequencyMap::from_counts(vec![('a', 0)]),
            Err(FrequencyMapError::ZeroCount { symbol: 'a' })
        );
        assert_eq!(
            FrequencyMap::from_counts(vec![('a', 1), ('a', 2)]),
            Err(FrequencyMapError::DuplicateSymbol { symbol: 'a' })
        );
        assert_eq!(
            FrequencyMap::from_counts(vec![('a', u64::MAX), ('b', 1)]),
            Err(FrequencyMapError::TotalOverflow)
        );
    }
}
