//! Self-contained archive format.
//!
//! An encoded stream is useless without its code. The archive stores the
//! alphabet with one code length per symbol, which is enough to rebuild
//! the canonical code, plus the exact payload bit count so the padding in
//! the final byte is never decoded.
//!
//! ```text
//! magic        4 bytes  "HUF1"
//! kind         u8       symbol type tag (1 = byte, 2 = char)
//! symbol_count u64      number of encoded symbols
//! entries      u32      alphabet size
//! entry*       u32 symbol, u8 code length
//! bit_count    u64      payload length in bits
//! payload      ceil(bit_count / 8) bytes, MSB-first, zero padded
//! ```
//!
//! All integers are little-endian.

use std::io::{self, Cursor, Read, Write};

use tracing::debug;

use crate::bits::BitStream;
use crate::code::CodeTable;
use crate::codec;
use crate::compress::{compress, Compressed};
use crate::error::{Error, Result};
use crate::symbol::{kind_name, Symbol};
use crate::tree::HuffmanTree;

/// Leading bytes of every archive.
pub const MAGIC: [u8; 4] = *b"HUF1";

/// A canonical-code payload together with everything needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive<S: Symbol> {
    symbol_count: u64,
    lengths: Vec<(S, u8)>,
    tree: HuffmanTree<S>,
    payload: BitStream,
}

impl<S: Symbol> Archive<S> {
    /// Compress `symbols` straight into an archive.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `symbols` is empty.
    pub fn compress(symbols: &[S]) -> Result<Self> {
        Self::from_compressed(&compress(symbols)?)
    }

    /// Re-encode a compression result onto the canonical code with the
    /// same code lengths.
    ///
    /// Sizes are unchanged: every symbol keeps its code length.
    pub fn from_compressed(compressed: &Compressed<S>) -> Result<Self> {
        let lengths = compressed.code_table.code_lengths();
        let canonical = CodeTable::canonical(lengths.iter().copied())?;
        let tree = HuffmanTree::from_code_table(&canonical)?;

        let symbols = codec::decode(&compressed.encoded, &compressed.tree)?;
        let payload = codec::encode(&symbols, &canonical)?;

        Ok(Self {
            symbol_count: symbols.len() as u64,
            lengths,
            tree,
            payload,
        })
    }

    /// Number of encoded symbols.
    pub fn symbol_count(&self) -> u64 {
        self.symbol_count
    }

    /// `(symbol, code length)` pairs in ascending symbol order.
    pub fn code_lengths(&self) -> &[(S, u8)] {
        &self.lengths
    }

    /// The canonical code table.
    pub fn code_table(&self) -> CodeTable<S> {
        CodeTable::from_tree(&self.tree)
    }

    /// The encoded payload.
    pub fn payload(&self) -> &BitStream {
        &self.payload
    }

    /// Decode the payload.
    ///
    /// # Errors
    /// Returns `Error::TruncatedStream` for a payload ending mid-code and
    /// `Error::SymbolCountMismatch` if the count disagrees with the header.
    pub fn decode(&self) -> Result<Vec<S>> {
        let symbols = codec::decode(&self.payload, &self.tree)?;
        if symbols.len() as u64 != self.symbol_count {
            return Err(Error::SymbolCountMismatch {
                expected: self.symbol_count,
                actual: symbols.len() as u64,
            });
        }
        Ok(symbols)
    }

    /// Serialize into `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&MAGIC)?;
        writer.write_all(&[S::KIND])?;
        writer.write_all(&self.symbol_count.to_le_bytes())?;

        let entries = self.lengths.len() as u32;
        writer.write_all(&entries.to_le_bytes())?;
        for &(symbol, len) in &self.lengths {
            writer.write_all(&symbol.to_u32().to_le_bytes())?;
            writer.write_all(&[len])?;
        }

        let bit_count = self.payload.len() as u64;
        writer.write_all(&bit_count.to_le_bytes())?;
        writer.write_all(self.payload.as_bytes())?;
        Ok(())
    }

    /// Serialize into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Parse an archive from `reader`.
    ///
    /// # Errors
    /// Returns `Error::InvalidMagic`, `Error::SymbolKindMismatch`,
    /// `Error::InvalidSymbol`, `Error::InvalidCodeLengths`, or `Error::Io`
    /// on short input.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic);
        }

        let mut kind = [0u8; 1];
        reader.read_exact(&mut kind)?;
        if kind[0] != S::KIND {
            return Err(Error::SymbolKindMismatch {
                expected: S::NAME,
                found: kind_name(kind[0]),
            });
        }

        let symbol_count = read_u64(reader)?;

        let entries = read_u32(reader)?;
        let mut lengths = Vec::new();
        for _ in 0..entries {
            let value = read_u32(reader)?;
            let symbol = S::from_u32(value).ok_or(Error::InvalidSymbol(value))?;
            let mut len = [0u8; 1];
            reader.read_exact(&mut len)?;
            lengths.push((symbol, len[0]));
        }
        lengths.sort_by_key(|&(s, _)| s);
        let tree = HuffmanTree::from_code_lengths(lengths.iter().copied())?;

        let bit_count = read_u64(reader)?;
        let byte_len = bit_count.div_ceil(8);
        // Read through `take` so a forged length cannot force a huge allocation.
        let mut bytes = Vec::new();
        reader.by_ref().take(byte_len).read_to_end(&mut bytes)?;
        if (bytes.len() as u64) < byte_len {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "archive payload is short").into());
        }
        let bit_count = usize::try_from(bit_count).map_err(|_| Error::BitCountOverflow {
            bits: usize::MAX,
            available: bytes.len().saturating_mul(8),
        })?;
        let payload = BitStream::from_bytes(bytes, bit_count)?;

        debug!(
            symbols = symbol_count,
            alphabet = lengths.len(),
            bits = payload.len(),
            "read archive"
        );
        Ok(Self {
            symbol_count,
            lengths,
            tree,
            payload,
        })
    }

    /// Parse an archive from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(&mut Cursor::new(bytes))
    }
}

fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::compress_str;

    #[test]
    fn test_archive_roundtrip() {
        let text = "it was the best of times, it was the worst of times";
        let compressed = compress_str(text).unwrap();
        let archive = Archive::from_compressed(&compressed).unwrap();
        assert_eq!(archive.payload().len(), compressed.encoded.len());

        let bytes = archive.to_bytes().unwrap();
        let restored = Archive::<char>::from_bytes(&bytes).unwrap();
        assert_eq!(restored, archive);

        let decoded: String = restored.decode().unwrap().into_iter().collect();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_layout() {
        let archive = Archive::compress(b"aab").unwrap();
        let bytes = archive.to_bytes().unwrap();
        // a=1 bit, b=1 bit; canonical a=0, b=1 -> "001".
        let mut expected = Vec::new();
        expected.extend_from_slice(b"HUF1");
        expected.push(1);
        expected.extend_from_slice(&3u64.to_le_bytes());
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.extend_from_slice(&(b'a' as u32).to_le_bytes());
        expected.push(1);
        expected.extend_from_slice(&(b'b' as u32).to_le_bytes());
        expected.push(1);
        expected.extend_from_slice(&3u64.to_le_bytes());
        expected.push(0b0010_0000);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_single_symbol_archive() {
        let archive = Archive::compress(b"zzzzz").unwrap();
        assert_eq!(archive.code_lengths(), &[(b'z', 1)]);
        let restored = Archive::<u8>::from_bytes(&archive.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.decode().unwrap(), b"zzzzz");
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = Archive::compress(b"hello").unwrap().to_bytes().unwrap();
        bytes[0] = b'X';
        assert!(matches!(Archive::<u8>::from_bytes(&bytes), Err(Error::InvalidMagic)));
    }

    #[test]
    fn test_rejects_short_payload() {
        let mut bytes = Archive::compress(b"hello world").unwrap().to_bytes().unwrap();
        bytes.pop();
        assert!(matches!(Archive::<u8>::from_bytes(&bytes), Err(Error::Io(_))));
    }

    #[test]
    fn test_rejects_other_symbol_kind() {
        let bytes = Archive::<u8>::compress("café".as_bytes()).unwrap().to_bytes().unwrap();
        assert!(matches!(
            Archive::<char>::from_bytes(&bytes),
            Err(Error::SymbolKindMismatch { expected: "char", found: "byte" })
        ));

        let bytes = Archive::compress(&['λ', 'x']).unwrap().to_bytes().unwrap();
        assert!(matches!(
            Archive::<u8>::from_bytes(&bytes),
            Err(Error::SymbolKindMismatch { expected: "byte", found: "char" })
        ));
    }

    #[test]
    fn test_rejects_invalid_symbol() {
        let mut bytes = Archive::compress(&['λ', 'x']).unwrap().to_bytes().unwrap();
        // Header: magic, kind, symbol count, entry count; entries sort 'x' first.
        let second = 4 + 1 + 8 + 4 + 5;
        bytes[second..second + 4].copy_from_slice(&0xD800u32.to_le_bytes());
        assert!(matches!(
            Archive::<char>::from_bytes(&bytes),
            Err(Error::InvalidSymbol(0xD800))
        ));
    }

    #[test]
    fn test_symbol_count_mismatch() {
        let mut bytes = Archive::compress(b"abcabc").unwrap().to_bytes().unwrap();
        bytes[5..13].copy_from_slice(&7u64.to_le_bytes());
        let archive = Archive::<u8>::from_bytes(&bytes).unwrap();
        assert!(matches!(
            archive.decode(),
            Err(Error::SymbolCountMismatch { expected: 7, actual: 6 })
        ));
    }
}
