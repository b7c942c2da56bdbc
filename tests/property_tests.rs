use huffcode::{compress, decode, Archive, CodeTable, Error, FrequencyTable, HuffmanTree};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_huffman_roundtrip(input in prop::collection::vec(any::<u8>(), 1..500)) {
        let c = compress(&input).unwrap();
        let decoded = decode(&c.encoded, &c.tree).unwrap();
        prop_assert_eq!(input, decoded);
    }

    #[test]
    fn test_text_roundtrip(text in "\\PC{1,200}") {
        let c = huffcode::compress_str(&text).unwrap();
        prop_assert_eq!(huffcode::decode_str(&c.encoded, &c.tree).unwrap(), text);
    }

    #[test]
    fn test_prefix_free(input in prop::collection::vec(0u8..40, 1..300)) {
        let c = compress(&input).unwrap();
        prop_assert!(c.code_table.is_prefix_free());

        let codes: Vec<_> = c.code_table.iter().map(|(_, code)| code.clone()).collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!a.is_prefix_of(b));
                }
            }
        }
    }

    #[test]
    fn test_frequency_conservation(input in prop::collection::vec(any::<u8>(), 1..500)) {
        let freq = FrequencyTable::count(&input).unwrap();
        prop_assert_eq!(freq.total(), input.len() as u64);
        for &s in &input {
            prop_assert!(freq.get(s).unwrap() > 0);
        }
        let tree = HuffmanTree::build(&freq).unwrap();
        prop_assert_eq!(tree.weight(), input.len() as u64);
        prop_assert_eq!(tree.leaf_count(), freq.len());
    }

    #[test]
    fn test_size_bound(input in prop::collection::vec(any::<u8>(), 1..500)) {
        // Never worse than a fixed-length code for the same alphabet.
        let c = compress(&input).unwrap();
        let alphabet = c.frequency_table.len();
        let fixed = (usize::BITS - (alphabet - 1).leading_zeros()).max(1) as u64;
        prop_assert!(c.stats.compressed_bits <= fixed * input.len() as u64);
        prop_assert!(c.stats.ratio <= 1.0);
    }

    #[test]
    fn test_truncation_detected(input in prop::collection::vec(0u8..6, 2..200)) {
        let c = compress(&input).unwrap();
        prop_assume!(!c.tree.is_single_leaf());
        let mut bits = c.encoded.clone();
        // Cut inside the final code; the shortest code may be a single bit.
        let last = c.code_table.get(*input.last().unwrap()).unwrap().len();
        prop_assume!(last > 1);
        bits.truncate(bits.len() - 1);
        let truncated = matches!(decode(&bits, &c.tree), Err(Error::TruncatedStream { .. }));
        prop_assert!(truncated);
    }

    #[test]
    fn test_archive_roundtrip(input in prop::collection::vec(any::<u8>(), 1..400)) {
        let archive = Archive::compress(&input).unwrap();
        let bytes = archive.to_bytes().unwrap();
        let restored = Archive::<u8>::from_bytes(&bytes).unwrap();
        prop_assert_eq!(restored.decode().unwrap(), input);
    }

    #[test]
    fn test_canonical_matches_lengths(input in prop::collection::vec(any::<u8>(), 1..400)) {
        let c = compress(&input).unwrap();
        let canon = CodeTable::canonical(c.code_table.code_lengths()).unwrap();
        prop_assert_eq!(canon.code_lengths(), c.code_table.code_lengths());
        prop_assert!(canon.is_prefix_free());
    }
}

#[test]
fn test_single_symbol() {
    let c = huffcode::compress_str("aaaa").unwrap();
    assert_eq!(c.code_table.get('a').unwrap().len(), 1);
    assert_eq!(c.encoded.len(), 4);
    assert_eq!(huffcode::decode_str(&c.encoded, &c.tree).unwrap(), "aaaa");
}

#[test]
fn test_abacabad_roundtrip() {
    let c = huffcode::compress_str("abacabad").unwrap();
    let lengths: Vec<_> = c.code_table.code_lengths();
    assert_eq!(lengths, vec![('a', 1), ('b', 2), ('c', 3), ('d', 3)]);
    assert_eq!(huffcode::decode_str(&c.encoded, &c.tree).unwrap(), "abacabad");

    let mut bits = c.encoded.clone();
    bits.truncate(bits.len() - 1);
    assert!(matches!(
        decode(&bits, &c.tree),
        Err(Error::TruncatedStream { .. })
    ));
}
