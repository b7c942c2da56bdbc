//! Encoding symbols to bits and walking the tree back.

use tracing::debug;

use crate::bits::BitStream;
use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::tree::{HuffmanTree, Node};
use crate::symbol::Symbol;

/// Huffman encoder.
#[derive(Debug, Clone)]
pub struct Encoder<S: Symbol> {
    table: CodeTable<S>,
}

impl<S: Symbol> Encoder<S> {
    /// Create an encoder from a code table.
    pub fn new(table: CodeTable<S>) -> Self {
        Self { table }
    }

    /// The code table in use.
    pub fn table(&self) -> &CodeTable<S> {
        &self.table
    }

    /// Encode a symbol sequence into a bit stream.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if a symbol has no code.
    pub fn encode(&self, data: &[S]) -> Result<BitStream> {
        encode(data, &self.table)
    }
}

/// Huffman decoder.
#[derive(Debug, Clone)]
pub struct Decoder<S> {
    tree: HuffmanTree<S>,
}

impl<S: Symbol> Decoder<S> {
    /// Create a decoder from the tree used to encode.
    pub fn new(tree: HuffmanTree<S>) -> Self {
        Self { tree }
    }

    /// The tree in use.
    pub fn tree(&self) -> &HuffmanTree<S> {
        &self.tree
    }

    /// Decode a bit stream into a symbol sequence.
    ///
    /// # Errors
    /// Returns `Error::TruncatedStream` if the bits end mid-code.
    pub fn decode(&self, bits: &BitStream) -> Result<Vec<S>> {
        decode(bits, &self.tree)
    }
}

/// Concatenate each symbol's code in input order.
///
/// # Errors
/// Returns `Error::UnknownSymbol` if a symbol has no code in `table`.
pub fn encode<S: Symbol>(data: &[S], table: &CodeTable<S>) -> Result<BitStream> {
    let mut bits = BitStream::new();
    for (position, &s) in data.iter().enumerate() {
        let code = table.get(s).ok_or_else(|| Error::UnknownSymbol {
            symbol: s.label(),
            position,
        })?;
        bits.push_code(code);
    }
    debug!(symbols = data.len(), bits = bits.len(), "encoded");
    Ok(bits)
}

/// Walk `tree` bit by bit, emitting a symbol at every leaf.
///
/// With a single-leaf tree every bit decodes to the sole symbol.
///
/// # Errors
/// Returns `Error::TruncatedStream` if the bits end away from the root.
pub fn decode<S: Symbol>(bits: &BitStream, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    let root = tree.root();
    let mut out = Vec::new();

    if let Node::Leaf { symbol, .. } = root {
        out.resize(bits.len(), *symbol);
        return Ok(out);
    }

    let mut curr = root;
    let mut dangling = 0;
    for bit in bits.iter() {
        match curr {
            Node::Internal { left, right, .. } => {
                curr = if bit { right } else { left };
            }
            Node::Leaf { .. } => unreachable!("walk resets to the internal root after every leaf"),
        }
        dangling += 1;

        if let Node::Leaf { symbol, .. } = curr {
            out.push(*symbol);
            curr = root;
            dangling = 0;
        }
    }

    if dangling != 0 {
        return Err(Error::TruncatedStream {
            bits: bits.len(),
            dangling,
        });
    }
    debug!(bits = bits.len(), symbols = out.len(), "decoded");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn setup(text: &str) -> (Vec<char>, CodeTable<char>, HuffmanTree<char>) {
        let input: Vec<char> = text.chars().collect();
        let freq = FrequencyTable::count(&input).unwrap();
        let tree = HuffmanTree::build(&freq).unwrap();
        let table = CodeTable::from_tree(&tree);
        (input, table, tree)
    }

    #[test]
    fn test_huffman_roundtrip() {
        let (input, table, tree) = setup("abracadabra");
        let encoder = Encoder::new(table);
        let bits = encoder.encode(&input).unwrap();

        let decoder = Decoder::new(tree);
        let decoded = decoder.decode(&bits).unwrap();

        assert_eq!(input, decoded);
    }

    #[test]
    fn test_abacabad_bits() {
        let (input, table, tree) = setup("abacabad");
        let bits = encode(&input, &table).unwrap();
        assert_eq!(bits.to_string(), "01001100100111");
        assert_eq!(decode(&bits, &tree).unwrap(), input);
    }

    #[test]
    fn test_unknown_symbol() {
        let (_, table, _) = setup("abc");
        let err = encode(&['a', 'b', 'z'], &table).unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol { ref symbol, position: 2 } if symbol == "z"));
    }

    #[test]
    fn test_truncated_stream() {
        let (input, table, tree) = setup("abacabad");
        let mut bits = encode(&input, &table).unwrap();
        bits.truncate(bits.len() - 1);
        let err = decode(&bits, &tree).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream { bits: 13, dangling: 2 }));
    }

    #[test]
    fn test_single_leaf() {
        let (input, table, tree) = setup("aaaa");
        let bits = encode(&input, &table).unwrap();
        assert_eq!(bits.to_string(), "0000");
        assert_eq!(decode(&bits, &tree).unwrap(), input);
    }

    #[test]
    fn test_empty_stream_decodes_to_nothing() {
        let (_, _, tree) = setup("ab");
        assert!(decode(&BitStream::new(), &tree).unwrap().is_empty());
    }
}
