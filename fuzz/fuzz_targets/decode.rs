#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate ruhuff;
use ruhuff::{decoding, FrequencyTable, HuffmanTree};

// Arbitrary streams must be rejected or decoded, never panic. Both decoders have to agree.
fuzz_target!(|data: &[u8]| {
    let frequencies: FrequencyTable<u8> = (0..=255u8).map(|byte| (byte, u64::from(byte) + 1)).collect();
    let tree = HuffmanTree::build(&frequencies).unwrap();
    let by_table = decoding::decode(data, &tree.code_table());
    let by_tree = decoding::decode_with_tree(data, &tree);
    assert_eq!(by_table.ok(), by_tree.ok());
});
