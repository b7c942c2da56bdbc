//! Packed bit sequences.

use std::fmt;
use std::str::FromStr;

use crate::code::Code;
use crate::error::{Error, Result};

/// An ordered sequence of bits, packed MSB-first into bytes.
///
/// The final byte is zero padded; `len()` is the exact bit count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap packed bytes holding `bit_count` bits.
    ///
    /// Padding bits past `bit_count` are cleared.
    ///
    /// # Errors
    /// Returns `Error::BitCountOverflow` if the bytes hold fewer bits.
    pub fn from_bytes(mut bytes: Vec<u8>, bit_count: usize) -> Result<Self> {
        let available = bytes.len().saturating_mul(8);
        if bit_count > available {
            return Err(Error::BitCountOverflow {
                bits: bit_count,
                available,
            });
        }
        bytes.truncate(bit_count.div_ceil(8));
        if bit_count % 8 != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFFu8 << (8 - bit_count % 8);
            }
        }
        Ok(Self { bytes, bit_count })
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }
        self.bit_count += 1;
    }

    /// Append every bit of `code`.
    pub fn push_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.push(bit);
        }
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bit_count
    }

    /// True if the stream holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    /// Shorten to `len` bits. No effect if already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.bit_count {
            return;
        }
        self.bit_count = len;
        self.bytes.truncate(len.div_ceil(8));
        if len % 8 != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xFFu8 << (8 - len % 8);
            }
        }
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |i| self.bytes[i / 8] & (1 << (7 - i % 8)) != 0)
    }

    /// The packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl FromIterator<bool> for BitStream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut stream = BitStream::new();
        for bit in iter {
            stream.push(bit);
        }
        stream
    }
}

impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitStream {
    type Err = Error;

    /// Parse the textual `"0101"` form.
    fn from_str(s: &str) -> Result<Self> {
        let mut stream = BitStream::new();
        for c in s.chars() {
            match c {
                '0' => stream.push(false),
                '1' => stream.push(true),
                other => return Err(Error::InvalidBitChar(other)),
            }
        }
        Ok(stream)
    }
}
