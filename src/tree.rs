//! Huffman tree construction.
//!
//! The tree is built bottom-up by repeatedly merging the two lightest
//! nodes. Every internal node exclusively owns its two children, so the
//! structure is a proper binary tree with no sharing and no back pointers.
//!
//! # Tie-breaking
//!
//! The queue is keyed on `(weight, sequence)`. Leaves are sequenced in
//! ascending symbol order and each merged node takes the next sequence
//! number, so among equal weights the oldest node leaves the queue first.
//! The first node removed becomes the left (`0`) child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Write as _;

use tracing::{debug, trace};

use crate::code::{Code, CodeTable};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    /// A symbol and its weight.
    Leaf {
        /// The coded symbol.
        symbol: S,
        /// Occurrence count (zero for trees rebuilt from code lengths).
        weight: u64,
    },
    /// Two owned children and the sum of their weights.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached by bit `0`.
        left: Box<Node<S>>,
        /// Subtree reached by bit `1`.
        right: Box<Node<S>>,
    },
}

impl<S> Node<S> {
    /// Aggregate weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// True for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn merge(left: Self, right: Self) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Queue entry: a node plus its creation order.
struct Pending<S> {
    weight: u64,
    seq: usize,
    node: Node<S>,
}

impl<S> PartialEq for Pending<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<S> Eq for Pending<S> {}

impl<S> Ord for Pending<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue: lightest first, then oldest.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for Pending<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An immutable Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the tree for a frequency table by greedy minimum-weight merging.
    ///
    /// A table with one symbol yields a single leaf as root.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if the table has no entries.
    pub fn build(freq: &FrequencyTable<S>) -> Result<Self> {
        let mut pq = BinaryHeap::with_capacity(freq.len());
        let mut seq = 0;
        for (symbol, weight) in freq.iter() {
            pq.push(Pending {
                weight,
                seq,
                node: Node::Leaf { symbol, weight },
            });
            seq += 1;
        }

        let root = loop {
            let left = pq.pop().ok_or(Error::EmptyInput)?;
            let Some(right) = pq.pop() else {
                break left.node;
            };
            trace!(left = left.weight, right = right.weight, "merge");
            let node = Node::merge(left.node, right.node);
            pq.push(Pending {
                weight: node.weight(),
                seq,
                node,
            });
            seq += 1;
        };

        let tree = Self { root };
        debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            weight = tree.weight(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// Rebuild the tree of the canonical code with the given lengths.
    ///
    /// Leaves carry weight zero since frequencies are not recoverable.
    ///
    /// # Errors
    /// Returns `Error::InvalidCodeLengths` if the lengths do not describe a
    /// complete prefix code.
    pub fn from_code_lengths<I>(lengths: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u8)>,
    {
        let table = CodeTable::canonical(lengths)?;
        Self::from_code_table(&table)
    }

    /// Rebuild a decoding tree from a complete prefix-free code table.
    ///
    /// A one-entry table must use a 1-bit code and yields a single leaf.
    ///
    /// # Errors
    /// Returns `Error::InvalidCodeLengths` if the table is not prefix-free
    /// or leaves part of the code space unused.
    pub fn from_code_table(table: &CodeTable<S>) -> Result<Self> {
        let entries: Vec<(S, &Code)> = table.iter().collect();
        let root = match entries.as_slice() {
            [] => return Err(Error::InvalidCodeLengths("empty alphabet")),
            [(symbol, code)] => {
                if code.len() != 1 {
                    return Err(Error::InvalidCodeLengths("single symbol needs a 1-bit code"));
                }
                Node::Leaf {
                    symbol: *symbol,
                    weight: 0,
                }
            }
            _ => grow(&entries, 0)?,
        };
        Ok(Self { root })
    }

    /// The root node.
    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Total weight, equal to the input length for built trees.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// True when the tree is one leaf (single-symbol alphabet).
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    /// Number of leaves, i.e. alphabet size.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        count
    }

    /// Longest code length. A single-leaf tree reports 1.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, d)) = stack.pop() {
            match node {
                Node::Leaf { .. } => max = max.max(d),
                Node::Internal { left, right, .. } => {
                    stack.push((left.as_ref(), d + 1));
                    stack.push((right.as_ref(), d + 1));
                }
            }
        }
        max.max(1)
    }

    /// Indented dump of the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, 0, "root", &mut out);
        out
    }
}

fn render_node<S: Symbol>(node: &Node<S>, depth: usize, label: &str, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Leaf { symbol, weight } => {
            let _ = writeln!(out, "{indent}{label} -> leaf {} [weight: {weight}]", symbol.label());
        }
        Node::Internal {
            weight,
            left,
            right,
        } => {
            let _ = writeln!(out, "{indent}{label} -> internal [weight: {weight}]");
            render_node(left, depth + 1, "0", out);
            render_node(right, depth + 1, "1", out);
        }
    }
}

/// Build the subtree for `entries`, all of which share their first `depth` bits.
fn grow<S: Symbol>(entries: &[(S, &Code)], depth: usize) -> Result<Node<S>> {
    if let [(symbol, code)] = entries {
        if code.len() == depth {
            return Ok(Node::Leaf {
                symbol: *symbol,
                weight: 0,
            });
        }
    }
    if entries.iter().any(|(_, code)| code.len() <= depth) {
        return Err(Error::InvalidCodeLengths("code is a prefix of another"));
    }

    let (zeros, ones): (Vec<_>, Vec<_>) = entries.iter().copied().partition(|(_, code)| !code.bit(depth));
    if zeros.is_empty() || ones.is_empty() {
        return Err(Error::InvalidCodeLengths("incomplete code"));
    }

    Ok(Node::Internal {
        weight: 0,
        left: Box::new(grow(&zeros, depth + 1)?),
        right: Box::new(grow(&ones, depth + 1)?),
    })
}
