//! Size statistics.

use serde::Serialize;

/// Original versus compressed size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompressionStats {
    /// `symbol_count * bits_per_symbol`.
    pub original_bits: u64,
    /// Length of the encoded stream.
    pub compressed_bits: u64,
    /// `compressed_bits / original_bits`.
    pub ratio: f64,
    /// `100 * (1 - ratio)`.
    pub savings_percent: f64,
}

impl CompressionStats {
    /// Compute statistics for `symbol_count` symbols of `bits_per_symbol`
    /// bits each, encoded in `compressed_bits` bits.
    ///
    /// A zero original size reports a ratio of 0 and no savings. The
    /// original size saturates at `u64::MAX`.
    pub fn new(symbol_count: u64, bits_per_symbol: u32, compressed_bits: u64) -> Self {
        let original_bits = symbol_count.saturating_mul(bits_per_symbol as u64);
        let ratio = if original_bits == 0 {
            0.0
        } else {
            compressed_bits as f64 / original_bits as f64
        };
        let savings_percent = if original_bits == 0 {
            0.0
        } else {
            100.0 * (1.0 - ratio)
        };
        Self {
            original_bits,
            compressed_bits,
            ratio,
            savings_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abacabad_stats() {
        let stats = CompressionStats::new(8, 8, 14);
        assert_eq!(stats.original_bits, 64);
        assert_eq!(stats.compressed_bits, 14);
        assert!((stats.ratio - 0.21875).abs() < 1e-12);
        assert!((stats.savings_percent - 78.125).abs() < 1e-9);
    }

    #[test]
    fn test_zero_original() {
        let stats = CompressionStats::new(0, 8, 0);
        assert_eq!(stats.ratio, 0.0);
        assert_eq!(stats.savings_percent, 0.0);

        // Zero-width symbols must not claim full savings.
        let stats = CompressionStats::new(8, 0, 14);
        assert_eq!(stats.original_bits, 0);
        assert_eq!(stats.savings_percent, 0.0);
    }

    #[test]
    fn test_original_size_saturates() {
        let stats = CompressionStats::new(u64::MAX / 2, 8, 1);
        assert_eq!(stats.original_bits, u64::MAX);
        assert!(stats.ratio < 1e-12);
    }
}
