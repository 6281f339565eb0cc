
use alloc::string::ToString;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::codec::{round_trip, HuffmanCodec};
use crate::common::Frequency;
use crate::decoding::{decode, decode_with_tree, DecodeError, MalformedStreamError};
use crate::encoding::{encode, pack};
use crate::frequency::FrequencyTable;
use crate::table::CodeTable;
use crate::tree::{HuffmanTree, Node};

/// Random bytes where low values are much more common than high ones,
/// so the codes end up with very different lengths
fn skewed_bytes(rng: &mut SmallRng, len: usize, alphabet: u8) -> Vec<u8> {
    (0..len)
        .map(|_| {
            let a = rng.gen_range(0..alphabet);
            let b = rng.gen_range(0..alphabet);
            a.min(b)
        })
        .collect()
}

fn random_frequencies(rng: &mut SmallRng) -> FrequencyTable<u16> {
    let symbols = rng.gen_range(1..300);
    (0..symbols)
        .map(|symbol| (symbol, rng.gen_range(1..10_000)))
        .collect()
}

fn textbook() -> FrequencyTable<char> {
    [('a', 5), ('b', 9), ('c', 12), ('d', 13), ('e', 16), ('f', 45)]
        .iter()
        .copied()
        .collect()
}

#[test]
fn test_round_trip_random_inputs() {
    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..200 {
        let len = rng.gen_range(1..2000);
        let alphabet = rng.gen_range(1..=255);
        round_trip(&skewed_bytes(&mut rng, len, alphabet));
    }
}

#[test]
fn test_round_trip_text() {
    let text: Vec<char> = "Huffman coding assigns short codes to frequent symbols.\n\
        Every code ends at a leaf, so no code is the prefix of another. Ünïcödé ✓\n"
        .chars()
        .collect();
    let codec = HuffmanCodec::from_symbols(&text).unwrap();
    let packed = codec.encode(text.iter().copied()).unwrap();
    assert_eq!(codec.decode(&packed).unwrap(), text);
    assert_eq!(
        decode_with_tree(&packed, codec.tree().unwrap()).unwrap(),
        text
    );
    // fewer bits than a plain byte per char
    assert!(packed.len() < text.len());
}

#[test]
fn test_generated_codes_are_prefix_free() {
    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..50 {
        let table = HuffmanTree::build(&random_frequencies(&mut rng))
            .unwrap()
            .code_table();
        assert!(table.is_prefix_free());
        for (a, code_a) in &table {
            for (b, code_b) in &table {
                if a != b {
                    assert!(
                        !code_b.starts_with(code_a),
                        "{:?} is a prefix of {:?}",
                        code_a,
                        code_b
                    );
                }
            }
        }
        // the loaded form of a generated table passes validation
        let reloaded =
            CodeTable::from_codes(table.iter().map(|(symbol, code)| (*symbol, code.clone())))
                .unwrap();
        assert_eq!(reloaded, table);
    }
}

#[test]
fn test_frequent_symbols_get_short_codes() {
    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..50 {
        let frequencies = random_frequencies(&mut rng);
        let table = HuffmanTree::build(&frequencies).unwrap().code_table();
        for (a, frequency_a) in &frequencies {
            for (b, frequency_b) in &frequencies {
                if frequency_a > frequency_b {
                    let len_a = table.get(&a).unwrap().len();
                    let len_b = table.get(&b).unwrap().len();
                    assert!(len_a <= len_b, "{} > {} but {} > {}", frequency_a, frequency_b, len_a, len_b);
                }
            }
        }
    }
}

/// The weighted code length of a Huffman tree is the sum of the
/// frequencies of its internal nodes
#[test]
fn test_weighted_code_length() {
    fn internal_sum(node: &Node<u16>) -> Frequency {
        match node {
            Node::Leaf { .. } => 0,
            Node::Internal {
                frequency,
                left,
                right,
            } => frequency + internal_sum(left) + internal_sum(right),
        }
    }

    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..50 {
        let frequencies = random_frequencies(&mut rng);
        if frequencies.len() < 2 {
            continue;
        }
        let tree = HuffmanTree::build(&frequencies).unwrap();
        let table = tree.code_table();
        let weighted: Frequency = frequencies
            .iter()
            .map(|(symbol, frequency)| frequency * table.get(&symbol).unwrap().len() as Frequency)
            .sum();
        assert_eq!(weighted, internal_sum(tree.root()));
    }
}

#[test]
fn test_padding() {
    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for bit_len in 0..200 {
        let bits: Vec<bool> = (0..bit_len).map(|_| rng.gen_bool(0.5)).collect();
        let packed = pack(bits.iter().copied()).unwrap();
        let pad_len = usize::from(packed[0]);
        assert!((1..=8).contains(&pad_len));
        assert_eq!(packed.len() * 8 - 8 - pad_len, bit_len);
        assert_eq!(packed.len(), 2 + bit_len / 8);

        let payload = crate::decoding::unpack(&packed).unwrap();
        assert_eq!(payload.reader().collect::<Vec<bool>>(), bits);
    }
}

#[test]
fn test_single_symbol_alphabet() {
    let mut frequencies = FrequencyTable::new();
    frequencies.insert('a', 5);
    let codec = HuffmanCodec::from_frequencies(&frequencies).unwrap();
    assert_eq!(codec.table().get(&'a').unwrap().to_string(), "0");

    let text = ['a'; 5];
    let packed = codec.encode(text.iter().copied()).unwrap();
    assert_eq!(packed, [3, 0]);
    assert_eq!(codec.decode(&packed).unwrap(), text);
}

#[test]
fn test_textbook_scenario() {
    let codec = HuffmanCodec::from_frequencies(&textbook()).unwrap();
    let table = codec.table();
    let len = |symbol: char| table.get(&symbol).unwrap().len();

    for symbol in "abcde".chars() {
        assert!(len('f') < len(symbol));
    }
    for symbol in "cdef".chars() {
        assert!(len('a') > len(symbol));
        assert!(len('b') > len(symbol));
    }
    assert_eq!(len('a'), table.max_code_len());

    let text: Vec<char> = "aabf".chars().collect();
    let packed = codec.encode(text.iter().copied()).unwrap();
    assert_eq!(codec.decode(&packed).unwrap(), text);
}

#[test]
fn test_corrupted_header() {
    let tree = HuffmanTree::build(&textbook()).unwrap();
    let table = tree.code_table();
    let mut packed = encode("fade".chars(), &table).unwrap();

    for pad_len in [0u8, 9, 16, 255].iter().copied() {
        packed[0] = pad_len;
        assert_eq!(
            decode(&packed, &table),
            Err(DecodeError::MalformedStream(
                MalformedStreamError::InvalidPadLen { got: pad_len }
            ))
        );
        assert!(decode_with_tree(&packed, &tree).is_err());
    }
}

#[test]
fn test_truncated_streams_never_decode_to_the_input() {
    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..200 {
        let len = rng.gen_range(1..100);
        let data = skewed_bytes(&mut rng, len, 16);
        let codec = HuffmanCodec::from_symbols(&data).unwrap();
        let packed = codec.encode(data.iter().copied()).unwrap();

        let truncated = &packed[..packed.len() - 1];
        match codec.decode(truncated) {
            Err(DecodeError::MalformedStream(_)) | Err(DecodeError::UnresolvedBits { .. }) => {}
            Err(other) => panic!("Unexpected error {:?}", other),
            // the dropped byte can't have been padding only, so something is missing
            Ok(decoded) => assert!(decoded.len() < data.len()),
        }
    }
}
