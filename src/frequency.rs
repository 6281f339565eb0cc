//! Contains [`FrequencyTable`], the mapping from symbol to
//! occurrence count that every Huffman tree is built from.

use alloc::collections::btree_map::{self, BTreeMap};
use core::iter::FromIterator;

use crate::common::{Frequency, Symbol};

/// Occurrence counts of the symbols of an input.
///
/// Symbols are kept in ascending order, so iterating a table is stable
/// no matter in which order the counts were recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S> {
    counts: BTreeMap<S, Frequency>,
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> FrequencyTable<S> {
    pub fn new() -> Self {
        FrequencyTable {
            counts: BTreeMap::new(),
        }
    }

    /// Count how often every symbol occurs in `symbols`
    pub fn from_symbols<I: IntoIterator<Item = S>>(symbols: I) -> Self {
        let mut table = Self::new();
        table.extend(symbols);
        table
    }

    /// Count one more occurrence of `symbol`
    pub fn record(&mut self, symbol: S) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    /// Set the count of `symbol`, returning the count it had before
    pub fn insert(&mut self, symbol: S, count: Frequency) -> Option<Frequency> {
        self.counts.insert(symbol, count)
    }

    pub fn get(&self, symbol: &S) -> Option<Frequency> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate the (symbol, count) pairs in ascending symbol order
    pub fn iter(&self) -> Iter<'_, S> {
        Iter {
            inner: self.counts.iter(),
        }
    }

    /// Sum of all counts, `None` if it does not fit a [`Frequency`]
    pub fn total(&self) -> Option<Frequency> {
        self.counts
            .values()
            .try_fold(0, |sum: Frequency, count| sum.checked_add(*count))
    }
}

pub struct Iter<'t, S> {
    inner: btree_map::Iter<'t, S, Frequency>,
}

impl<S: Symbol> Iterator for Iter<'_, S> {
    type Item = (S, Frequency);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(symbol, count)| (*symbol, *count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S: Symbol> ExactSizeIterator for Iter<'_, S> {}

impl<'t, S: Symbol> IntoIterator for &'t FrequencyTable<S> {
    type Item = (S, Frequency);
    type IntoIter = Iter<'t, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Symbol> Extend<S> for FrequencyTable<S> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, symbols: I) {
        for symbol in symbols {
            self.record(symbol);
        }
    }
}

/// Later pairs overwrite earlier pairs for the same symbol
impl<S: Symbol> FromIterator<(S, Frequency)> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, Frequency)>>(pairs: I) -> Self {
        FrequencyTable {
            counts: pairs.into_iter().collect(),
        }
    }
}
