//! The input alphabet.
//!
//! Anything that is `Copy + Ord` and maps losslessly onto a `u32` can be
//! Huffman coded. Bytes and Unicode scalar values are provided.

use std::fmt::Debug;
use std::hash::Hash;

/// An atomic unit of input.
pub trait Symbol: Copy + Ord + Hash + Debug {
    /// Tag stored in archives so a stream is read back as the same type.
    const KIND: u8;

    /// Name of the symbol type, for error messages.
    const NAME: &'static str;

    /// Numeric value used by the archive format.
    fn to_u32(self) -> u32;

    /// Inverse of [`Symbol::to_u32`]; `None` when `value` names no symbol.
    fn from_u32(value: u32) -> Option<Self>;

    /// Printable form for tables and error messages.
    fn label(self) -> String;
}

impl Symbol for u8 {
    const KIND: u8 = 1;
    const NAME: &'static str = "byte";

    fn to_u32(self) -> u32 {
        self as u32
    }

    fn from_u32(value: u32) -> Option<Self> {
        u8::try_from(value).ok()
    }

    fn label(self) -> String {
        match self {
            b' ' => "(space)".to_string(),
            b'\n' => "\\n".to_string(),
            b'\t' => "\\t".to_string(),
            b'\r' => "\\r".to_string(),
            b if b.is_ascii_graphic() => (b as char).to_string(),
            b => format!("0x{:02x}", b),
        }
    }
}

impl Symbol for char {
    const KIND: u8 = 2;
    const NAME: &'static str = "char";

    fn to_u32(self) -> u32 {
        self as u32
    }

    fn from_u32(value: u32) -> Option<Self> {
        char::from_u32(value)
    }

    fn label(self) -> String {
        match self {
            ' ' => "(space)".to_string(),
            '\n' => "\\n".to_string(),
            '\t' => "\\t".to_string(),
            '\r' => "\\r".to_string(),
            c if c.is_control() || c.is_whitespace() => format!("U+{:04X}", c as u32),
            c => c.to_string(),
        }
    }
}

/// Name of the symbol type tagged `kind`.
pub(crate) fn kind_name(kind: u8) -> &'static str {
    match kind {
        <u8 as Symbol>::KIND => <u8 as Symbol>::NAME,
        <char as Symbol>::KIND => <char as Symbol>::NAME,
        _ => "unknown",
    }
}
