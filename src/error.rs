//! Error types for Huffman coding.

use thiserror::Error;

/// Error variants for Huffman operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Compression was requested on an empty symbol sequence.
    #[error("empty input: nothing to compress")]
    EmptyInput,

    /// Uncompressed symbols were given a width of zero bits.
    #[error("invalid symbol width: {0} bits per symbol")]
    InvalidBitsPerSymbol(u32),

    /// A frequency table entry carried a zero count.
    #[error("zero frequency for symbol {0}")]
    ZeroFrequency(String),

    /// The encoder met a symbol that has no code in the table.
    #[error("unknown symbol {symbol} at position {position}")]
    UnknownSymbol {
        /// Printable form of the offending symbol.
        symbol: String,
        /// Index of the symbol in the input.
        position: usize,
    },

    /// The bit sequence ended in the middle of a code.
    #[error("truncated stream: {dangling} trailing bit(s) of {bits} do not complete a code")]
    TruncatedStream {
        /// Total number of bits in the stream.
        bits: usize,
        /// Bits consumed after the last complete code.
        dangling: usize,
    },

    /// Code lengths do not describe a complete prefix code.
    #[error("invalid code lengths: {0}")]
    InvalidCodeLengths(&'static str),

    /// A textual bit string contained something other than `0` or `1`.
    #[error("invalid bit character {0:?}")]
    InvalidBitChar(char),

    /// A bit count does not fit in the supplied bytes.
    #[error("bit count {bits} exceeds {available} available bits")]
    BitCountOverflow {
        /// Requested number of bits.
        bits: usize,
        /// Bits actually backed by bytes.
        available: usize,
    },

    /// The archive does not start with the expected magic bytes.
    #[error("invalid archive magic")]
    InvalidMagic,

    /// The archive holds a different symbol type than requested.
    #[error("archive holds {found} symbols, expected {expected}")]
    SymbolKindMismatch {
        /// Kind the caller asked for.
        expected: &'static str,
        /// Kind recorded in the archive.
        found: &'static str,
    },

    /// The archive names a value that is not a valid symbol.
    #[error("invalid symbol value {0:#x}")]
    InvalidSymbol(u32),

    /// The archive payload decoded to a different number of symbols.
    #[error("expected {expected} symbols, decoded {actual}")]
    SymbolCountMismatch {
        /// Count recorded in the archive header.
        expected: u64,
        /// Count produced by the decoder.
        actual: u64,
    },

    /// An I/O error occurred while reading or writing an archive.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
