#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use chunkpress_core::{
        compression::{
            codecs::huffman::{decode_block, encode_block, FrequencyTable, HuffmanTree},
            codecs::HuffmanCodec, ChunkCodec, CompressionError,
        },
        constants::CHUNK_SIZE,
    };

    fn skewed_all_bytes() -> Vec<u8> {
        // Byte v appears v + 1 times, so every value is present and no two counts tie.
        let mut data = Vec::new();
        for v in 0..=255u8 {
            data.extend(std::iter::repeat(v).take(v as usize + 1));
        }
        data
    }

    #[test]
    fn aaab_wire_layout() {
        let payload = encode_block(b"AAAB").unwrap();
        assert_eq!(
            payload,
            vec![
                0, 0, 0, 2,           // entry count
                b'A', 0, 0, 0, 3,     // A: 3
                b'B', 0, 0, 0, 1,     // B: 1
                0, 0, 0, 4,           // pad bits
                0x10,                 // 0001 + 0000
            ]
        );
        assert_eq!(decode_block(&payload).unwrap(), b"AAAB");
    }

    #[test]
    fn aaab_codes() {
        let tree = HuffmanTree::build(&FrequencyTable::from_block(b"AAAB")).unwrap();
        let codes = tree.codes();
        assert_eq!(codes.get(b'A').unwrap().to_bit_string(), "0");
        assert_eq!(codes.get(b'B').unwrap().to_bit_string(), "1");
        assert!(codes.get(b'C').is_none());
    }

    #[test]
    fn empty_block_is_header_only() {
        let payload = encode_block(&[]).unwrap();
        assert_eq!(payload, vec![0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(decode_block(&payload).unwrap().is_empty());
    }

    #[test]
    fn single_symbol_full_chunk_uses_one_bit_codes() {
        let data = vec![0x5Au8; CHUNK_SIZE];
        let payload = encode_block(&data).unwrap();
        // 4 (count) + 5 (entry) + 4 (pad) + 1 bit per symbol
        assert_eq!(payload.len(), 4 + 5 + 4 + CHUNK_SIZE / 8);
        assert_eq!(decode_block(&payload).unwrap(), data);
    }

    #[test]
    fn all_byte_values_roundtrip() {
        let data = skewed_all_bytes();
        let codec = HuffmanCodec::new();
        let payload = codec.encode(&data).unwrap();
        assert_eq!(codec.decode(&payload).unwrap(), data);
    }

    #[test]
    fn decode_tree_matches_encode_tree() {
        let data = skewed_all_bytes();
        let table = FrequencyTable::from_block(&data);
        let payload = encode_block(&data).unwrap();

        let (parsed, _) = FrequencyTable::parse(&payload).unwrap();
        assert_eq!(parsed, table);

        let encode_tree = HuffmanTree::build(&table).unwrap();
        let decode_tree = HuffmanTree::build(&parsed).unwrap();
        assert_eq!(encode_tree, decode_tree);
        assert_eq!(encode_tree.codes().lengths(), decode_tree.codes().lengths());
    }

    #[test]
    fn corrupt_payloads_are_rejected() {
        let good = encode_block(b"hello huffman").unwrap();

        let mut bad_pad = good.clone();
        let pad_at = 4 + 5 * FrequencyTable::from_block(b"hello huffman").distinct();
        bad_pad[pad_at + 3] = 9;

        let mut dropped_tail = good.clone();
        dropped_tail.pop();

        let mut extra_tail = good.clone();
        extra_tail.push(0xFF);

        for payload in [&b""[..], &[0, 0, 0][..], &bad_pad[..], &dropped_tail[..], &extra_tail[..]] {
            let err = decode_block(payload).unwrap_err();
            assert!(matches!(err, CompressionError::CorruptChunk { .. }), "{err:?}");
        }
    }

    #[test]
    fn duplicate_and_zero_entries_are_rejected() {
        let dup = [0, 0, 0, 2, b'A', 0, 0, 0, 1, b'A', 0, 0, 0, 1, 0, 0, 0, 6, 0x00];
        assert!(matches!(decode_block(&dup), Err(CompressionError::CorruptChunk { .. })));

        let zero = [0, 0, 0, 1, b'A', 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(decode_block(&zero), Err(CompressionError::CorruptChunk { .. })));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let payload = encode_block(&data).unwrap();
            prop_assert_eq!(decode_block(&payload).unwrap(), data);
        }

        #[test]
        fn prop_deterministic(data in proptest::collection::vec(0u8..4, 1..2048)) {
            prop_assert_eq!(encode_block(&data).unwrap(), encode_block(&data).unwrap());
        }

        // Small counts force many weight ties; wide counts give deep trees.
        #[test]
        fn prop_serialized_table_rebuilds_same_tree(
            entries in prop_oneof![
                proptest::collection::vec((any::<u8>(), 1u32..4), 1..64),
                proptest::collection::vec((any::<u8>(), 1u32..1_000_000), 1..256),
            ]
        ) {
            let table: FrequencyTable = entries.into_iter().collect();
            let mut wire = Vec::new();
            table.write_to(&mut wire).unwrap();
            prop_assert_eq!(wire.len(), table.encoded_len());

            let (parsed, used) = FrequencyTable::parse(&wire).unwrap();
            prop_assert_eq!(used, wire.len());
            prop_assert_eq!(&parsed, &table);

            let original = HuffmanTree::build(&table).unwrap();
            let rebuilt = HuffmanTree::build(&parsed).unwrap();
            prop_assert_eq!(original.codes().lengths(), rebuilt.codes().lengths());
            prop_assert_eq!(original, rebuilt);
        }

        #[test]
        fn prop_codes_are_prefix_free(data in proptest::collection::vec(any::<u8>(), 1..2048)) {
            let tree = HuffmanTree::build(&FrequencyTable::from_block(&data)).unwrap();
            let codes: Vec<String> = tree
                .codes()
                .lengths()
                .iter()
                .map(|(v, _)| tree.codes().get(*v).unwrap().to_bit_string())
                .collect();
            for (i, a) in codes.iter().enumerate() {
                for (j, b) in codes.iter().enumerate() {
                    if i != j {
                        prop_assert!(!b.starts_with(a.as_str()));
                    }
                }
            }
        }
    }
}
