//! Code table construction.
//!
//! Codes are leaf paths: descending left appends `0`, right appends `1`.
//! A single-leaf tree has an empty path, so its symbol gets the fixed
//! 1-bit code `0` instead.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};
use crate::symbol::Symbol;

/// A non-empty codeword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false for codes stored in a table.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, first to last.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn bit(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Add one to the code as a binary number. Returns false on overflow.
    fn increment(&mut self) -> bool {
        for bit in self.bits.iter_mut().rev() {
            if *bit {
                *bit = false;
            } else {
                *bit = true;
                return true;
            }
        }
        false
    }

    fn is_all_ones(&self) -> bool {
        self.bits.iter().all(|&b| b)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to codeword. Prefix-free by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    codes: BTreeMap<S, Code>,
}

impl<S: Symbol> CodeTable<S> {
    /// Derive codes from a tree by depth-first traversal.
    ///
    /// Uses an explicit stack, so very skewed trees do not grow the call stack.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack: Vec<(&Node<S>, Vec<bool>)> = vec![(tree.root(), Vec::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    let bits = if path.is_empty() { vec![false] } else { path };
                    codes.insert(*symbol, Code { bits });
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right.as_ref(), right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left.as_ref(), left_path));
                }
            }
        }

        Self { codes }
    }

    /// Assign canonical codes to per-symbol lengths.
    ///
    /// Symbols are ordered by `(length, symbol)`. The first code is all
    /// zeros; each following code is the previous one plus one, padded
    /// with zeros to its own length.
    ///
    /// # Errors
    /// Returns `Error::InvalidCodeLengths` for an empty alphabet, a zero
    /// length, a repeated symbol, a single symbol whose length is not 1, or
    /// lengths that over- or under-fill the code space.
    pub fn canonical<I>(lengths: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u8)>,
    {
        let mut entries: Vec<(S, u8)> = lengths.into_iter().collect();
        if entries.is_empty() {
            return Err(Error::InvalidCodeLengths("empty alphabet"));
        }
        if entries.iter().any(|&(_, len)| len == 0) {
            return Err(Error::InvalidCodeLengths("zero code length"));
        }
        let distinct: BTreeSet<S> = entries.iter().map(|&(s, _)| s).collect();
        if distinct.len() != entries.len() {
            return Err(Error::InvalidCodeLengths("repeated symbol"));
        }
        entries.sort_by_key(|&(s, len)| (len, s));
        if let [(symbol, len)] = entries.as_slice() {
            if *len != 1 {
                return Err(Error::InvalidCodeLengths("single symbol needs a 1-bit code"));
            }
            let codes = BTreeMap::from([(*symbol, Code { bits: vec![false] })]);
            return Ok(Self { codes });
        }

        let mut codes = BTreeMap::new();
        let mut next = Code { bits: Vec::new() };
        for (i, &(symbol, len)) in entries.iter().enumerate() {
            if i > 0 && !next.increment() {
                return Err(Error::InvalidCodeLengths("over-subscribed code"));
            }
            next.bits.resize(len as usize, false);
            codes.insert(symbol, next.clone());
        }
        if !next.is_all_ones() {
            return Err(Error::InvalidCodeLengths("incomplete code"));
        }

        Ok(Self { codes })
    }

    /// Code for `symbol`, if present.
    pub fn get(&self, symbol: S) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &Code)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// `(symbol, length)` pairs in ascending symbol order.
    ///
    /// Lengths above 255 saturate; such codes need weights beyond `u64`.
    pub fn code_lengths(&self) -> Vec<(S, u8)> {
        self.codes
            .iter()
            .map(|(&s, c)| (s, u8::try_from(c.len()).unwrap_or(u8::MAX)))
            .collect()
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // In lexicographic order a prefix sorts directly before some
        // extension of it, so adjacent pairs suffice.
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort();
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }

    /// Mean code length in bits per symbol, weighted by `freq`.
    ///
    /// Symbols absent from the table count as zero bits.
    pub fn average_length(&self, freq: &FrequencyTable<S>) -> f64 {
        let total = freq.total();
        if total == 0 {
            return 0.0;
        }
        let bits: u64 = freq
            .iter()
            .filter_map(|(s, n)| self.get(s).map(|c| c.len() as u64 * n))
            .sum();
        bits as f64 / total as f64
    }
}
