//! One-call compression and decoding.
//!
//! `compress` runs the whole pipeline (count, build tree, derive codes,
//! encode, measure) and returns every intermediate product. The result is
//! an ordinary value: keep it and hand its `encoded` stream and `tree` to
//! [`decode`] later.

use tracing::info_span;

use crate::bits::BitStream;
use crate::code::CodeTable;
use crate::codec;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::stats::CompressionStats;
use crate::symbol::Symbol;
use crate::tree::HuffmanTree;

/// Default width of an uncompressed symbol, in bits.
pub const DEFAULT_BITS_PER_SYMBOL: u32 = 8;

/// Compression settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Width of one uncompressed symbol, used for size statistics.
    pub bits_per_symbol: u32,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            bits_per_symbol: DEFAULT_BITS_PER_SYMBOL,
        }
    }
}

/// Everything produced by one compression.
#[derive(Debug, Clone)]
pub struct Compressed<S: Symbol> {
    /// Symbol counts of the input.
    pub frequency_table: FrequencyTable<S>,
    /// Codes derived from `tree`.
    pub code_table: CodeTable<S>,
    /// The encoded bits.
    pub encoded: BitStream,
    /// The tree needed to decode `encoded`.
    pub tree: HuffmanTree<S>,
    /// Size statistics.
    pub stats: CompressionStats,
}

impl<S: Symbol> Compressed<S> {
    /// Number of input symbols.
    pub fn symbol_count(&self) -> u64 {
        self.frequency_table.total()
    }

    /// Mean code length in bits per symbol.
    pub fn average_code_length(&self) -> f64 {
        self.code_table.average_length(&self.frequency_table)
    }

    /// Decode `encoded` with `tree`.
    pub fn decode(&self) -> Result<Vec<S>> {
        decode(&self.encoded, &self.tree)
    }
}

/// Compress with default options.
///
/// # Errors
/// Returns `Error::EmptyInput` if `symbols` is empty.
pub fn compress<S: Symbol>(symbols: &[S]) -> Result<Compressed<S>> {
    compress_with(symbols, &CompressOptions::default())
}

/// Compress with explicit options.
///
/// # Errors
/// Returns `Error::EmptyInput` if `symbols` is empty and
/// `Error::InvalidBitsPerSymbol` if `options.bits_per_symbol` is zero.
pub fn compress_with<S: Symbol>(symbols: &[S], options: &CompressOptions) -> Result<Compressed<S>> {
    let span = info_span!("compress", symbols = symbols.len());
    let _enter = span.enter();

    if options.bits_per_symbol == 0 {
        return Err(Error::InvalidBitsPerSymbol(options.bits_per_symbol));
    }

    let frequency_table = FrequencyTable::count(symbols)?;
    let tree = HuffmanTree::build(&frequency_table)?;
    let code_table = CodeTable::from_tree(&tree);
    let encoded = codec::encode(symbols, &code_table)?;
    let stats = CompressionStats::new(
        symbols.len() as u64,
        options.bits_per_symbol,
        encoded.len() as u64,
    );

    Ok(Compressed {
        frequency_table,
        code_table,
        encoded,
        tree,
        stats,
    })
}

/// Compress the characters of `text`.
pub fn compress_str(text: &str) -> Result<Compressed<char>> {
    let symbols: Vec<char> = text.chars().collect();
    compress(&symbols)
}

/// Decode `encoded` with the tree it was produced from.
///
/// # Errors
/// Returns `Error::TruncatedStream` if the bits end mid-code.
pub fn decode<S: Symbol>(encoded: &BitStream, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    let span = info_span!("decode", bits = encoded.len());
    let _enter = span.enter();
    codec::decode(encoded, tree)
}

/// Decode into a `String`.
pub fn decode_str(encoded: &BitStream, tree: &HuffmanTree<char>) -> Result<String> {
    Ok(decode(encoded, tree)?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abacabad() {
        let c = compress_str("abacabad").unwrap();
        assert_eq!(c.frequency_table.get('a'), Some(4));
        assert_eq!(c.frequency_table.get('b'), Some(2));
        assert_eq!(c.frequency_table.get('c'), Some(1));
        assert_eq!(c.frequency_table.get('d'), Some(1));

        assert_eq!(c.code_table.get('a').unwrap().len(), 1);
        assert_eq!(c.code_table.get('c').unwrap().len(), 3);
        assert_eq!(c.code_table.get('d').unwrap().len(), 3);

        assert_eq!(c.stats.original_bits, 64);
        assert_eq!(c.stats.compressed_bits, 14);
        assert_eq!(decode_str(&c.encoded, &c.tree).unwrap(), "abacabad");
    }

    #[test]
    fn test_single_symbol() {
        let c = compress_str("aaaa").unwrap();
        assert_eq!(c.code_table.get('a').unwrap().to_string(), "0");
        assert_eq!(c.encoded.len(), 4);
        assert_eq!(decode_str(&c.encoded, &c.tree).unwrap(), "aaaa");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(compress_str(""), Err(Error::EmptyInput)));
        let empty: [u8; 0] = [];
        assert!(matches!(compress(&empty), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_bits_per_symbol_option() {
        let symbols = [1u8, 2, 2, 3];
        let c = compress_with(&symbols, &CompressOptions { bits_per_symbol: 2 }).unwrap();
        assert_eq!(c.stats.original_bits, 8);
        assert_eq!(c.decode().unwrap(), symbols);
    }

    #[test]
    fn test_zero_bits_per_symbol() {
        let err = compress_with(b"abacabad", &CompressOptions { bits_per_symbol: 0 }).unwrap_err();
        assert!(matches!(err, Error::InvalidBitsPerSymbol(0)));
    }

    #[test]
    fn test_unicode_text() {
        let text = "naïve café, ünïcödé ✓";
        let c = compress_str(text).unwrap();
        assert_eq!(c.symbol_count(), text.chars().count() as u64);
        assert_eq!(decode_str(&c.encoded, &c.tree).unwrap(), text);
    }

    #[test]
    fn test_skewed_input_shrinks() {
        let text = "aaaaaaaaaaaaaaaaaaaabbbbbbbbccccdde";
        let c = compress_str(text).unwrap();
        assert!(c.stats.ratio < 0.5);
        assert!(c.stats.savings_percent > 50.0);
        assert!(c.average_code_length() < 3.0);
    }
}
