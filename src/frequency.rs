//! Symbol frequency counting.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// Per-symbol occurrence counts of one input.
///
/// Every symbol present in the input appears exactly once and counts sum
/// to the input length. Iteration is in ascending symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Symbol> {
    counts: BTreeMap<S, u64>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Count symbols in a single pass.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `symbols` is empty.
    pub fn count(symbols: &[S]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut counts = BTreeMap::new();
        for &s in symbols {
            *counts.entry(s).or_insert(0u64) += 1;
        }

        debug!(symbols = symbols.len(), alphabet = counts.len(), "counted frequencies");
        Ok(Self { counts })
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Repeated symbols accumulate.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` for no pairs and `Error::ZeroFrequency`
    /// for a zero count.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut counts = BTreeMap::new();
        for (s, n) in pairs {
            if n == 0 {
                return Err(Error::ZeroFrequency(s.label()));
            }
            *counts.entry(s).or_insert(0u64) += n;
        }
        if counts.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self { counts })
    }

    /// Count for `symbol`, if present.
    pub fn get(&self, symbol: S) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false: tables are never empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the input length.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.counts.iter().map(|(&s, &n)| (s, n))
    }
}
