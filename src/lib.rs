//! # Huffman Coding
//!
//! *Optimal prefix codes from symbol frequencies.*
//!
//! ## Intuition First
//!
//! Morse code gives `e` a single dot and `q` four symbols: frequent letters
//! get short codes. Huffman coding does the same thing optimally. Count how
//! often every symbol occurs, then keep joining the two rarest groups into
//! one until a single tree remains. Each symbol's code is its path from the
//! root: `0` for left, `1` for right. Rare symbols sit deep, common ones
//! sit near the top.
//!
//! Because codes are leaf paths, no code is a prefix of another, and a
//! decoder can split the bit stream without delimiters.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Top-down splitting (Shannon-Fano), not always optimal
//! 1952  Huffman     Bottom-up merging: optimal prefix codes
//! 1964  Schwartz    Canonical codes: lengths alone define the code
//! 1993  Katz        DEFLATE ships canonical Huffman in every zip file
//! ```
//!
//! ## Mathematical Formulation
//!
//! For symbol weights $w_s$ and code lengths $l_s$ the tree minimises
//!
//! ```text
//! L = sum_s w_s * l_s
//! ```
//!
//! subject to the Kraft equality $\sum_s 2^{-l_s} = 1$. The average code
//! length lies within one bit of the entropy $H$.
//!
//! ## Complexity Analysis
//!
//! - **Tree**: $O(n \log n)$ for an alphabet of $n$ symbols (binary heap).
//! - **Encode / decode**: $O(1)$ per bit.
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: there is nothing to build a tree from.
//! 2. **Table mismatch**: encoding a symbol the table never saw.
//! 3. **Truncation**: a stream that stops inside a code.
//!
//! ## Implementation Notes
//!
//! The pipeline is [`FrequencyTable`] -> [`HuffmanTree`] -> [`CodeTable`]
//! -> [`Encoder`] -> [`BitStream`] -> [`Decoder`]. Every stage returns a new
//! immutable value. [`compress`] runs it end to end and [`Archive`] stores a
//! stream with the canonical code lengths needed to decode it.
//!
//! A single-symbol alphabet yields a one-leaf tree; that symbol is coded as
//! the single bit `0`.
//!
//! ```
//! let c = huffcode::compress_str("abacabad")?;
//! assert_eq!(c.encoded.len(), 14);
//! assert_eq!(huffcode::decode_str(&c.encoded, &c.tree)?, "abacabad");
//! # Ok::<(), huffcode::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Schwartz, E. S., & Kallick, B. (1964). "Generating a canonical prefix encoding."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod bits;
pub mod code;
pub mod codec;
pub mod compress;
pub mod error;
pub mod frequency;
pub mod stats;
pub mod symbol;
pub mod tree;

pub use archive::Archive;
pub use bits::BitStream;
pub use code::{Code, CodeTable};
pub use codec::{Decoder, Encoder};
pub use compress::{
    compress, compress_str, compress_with, decode, decode_str, CompressOptions, Compressed,
};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use stats::CompressionStats;
pub use symbol::Symbol;
pub use tree::{HuffmanTree, Node};
