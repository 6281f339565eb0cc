//! [`HuffmanCodec`] bundles a tree and its code table so a symbol sequence
//! can be packed and unpacked without wiring up the stages by hand.

use alloc::vec::Vec;

use crate::common::Symbol;
use crate::decoding::{self, DecodeError};
use crate::encoding::{self, EncodeError};
use crate::frequency::FrequencyTable;
use crate::table::CodeTable;
use crate::tree::{HuffmanTree, TreeBuildError};

/// A code table together with the tree it was generated from, if known.
///
/// Codecs built from a table alone (e.g. one loaded from a file) have no tree.
#[derive(Debug, Clone)]
pub struct HuffmanCodec<S> {
    tree: Option<HuffmanTree<S>>,
    table: CodeTable<S>,
}

impl<S: Symbol> HuffmanCodec<S> {
    /// Count the symbols of `input` and build the optimal code for exactly that input
    pub fn from_symbols(input: &[S]) -> Result<Self, TreeBuildError> {
        Self::from_frequencies(&FrequencyTable::from_symbols(input.iter().copied()))
    }

    pub fn from_frequencies(frequencies: &FrequencyTable<S>) -> Result<Self, TreeBuildError> {
        let tree = HuffmanTree::build(frequencies)?;
        let table = tree.code_table();
        Ok(HuffmanCodec {
            tree: Some(tree),
            table,
        })
    }

    pub fn from_table(table: CodeTable<S>) -> Self {
        HuffmanCodec { tree: None, table }
    }

    pub fn encode<I: IntoIterator<Item = S>>(&self, symbols: I) -> Result<Vec<u8>, EncodeError> {
        encoding::encode(symbols, &self.table)
    }

    pub fn decode(&self, source: &[u8]) -> Result<Vec<S>, DecodeError> {
        decoding::decode(source, &self.table)
    }

    pub fn table(&self) -> &CodeTable<S> {
        &self.table
    }

    pub fn tree(&self) -> Option<&HuffmanTree<S>> {
        self.tree.as_ref()
    }
}

/// Encode `data` with a code built from it and check everything that must
/// hold for the result. Panics on any mismatch.
#[cfg(any(test, feature = "fuzz_exports"))]
pub fn round_trip(data: &[u8]) {
    use crate::common::HEADER_BITS;

    if data.is_empty() {
        return;
    }

    let codec = HuffmanCodec::from_symbols(data).unwrap();
    let table = codec.table();
    assert!(table.is_prefix_free(), "Generated codes are not prefix free");

    let encoded = codec.encode(data.iter().copied()).unwrap();
    let payload_bits = table.encoded_bit_len(data.iter().copied()).unwrap();
    let pad_len = usize::from(encoded[0]);
    assert!((1..=8).contains(&pad_len), "Padding of {} bits", pad_len);
    assert_eq!(encoded.len() * 8, HEADER_BITS + payload_bits + pad_len);

    let decoded = codec.decode(&encoded).unwrap();
    assert!(decoded == data, "Decoded data did not match the original input");

    let tree = codec.tree().unwrap();
    let decoded = decoding::decode_with_tree(&encoded, tree).unwrap();
    assert!(decoded == data, "Tree decoding did not match the original input");
}

#[cfg(test)]
mod tests {
    use super::{round_trip, HuffmanCodec};
    use crate::decoding::DecodeError;
    use crate::encoding::EncodeError;
    use crate::tree::TreeBuildError;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn roundtrip() {
        round_trip(b"a");
        round_trip(b"aaaaaaaa");
        round_trip(b"abracadabra");
        round_trip(&(0..=255).collect::<Vec<u8>>());

        let mut data = vec![];
        data.extend(0..32);
        data.extend(0..32);
        data.extend(20..32);
        data.extend(100..255);
        data.extend(20..32);
        round_trip(&data);

        #[cfg(feature = "std")]
        if std::fs::exists("fuzz/artifacts/roundtrip").unwrap_or(false) {
            for file in std::fs::read_dir("fuzz/artifacts/roundtrip").unwrap() {
                if file.as_ref().unwrap().file_type().unwrap().is_file() {
                    let data = std::fs::read(file.unwrap().path()).unwrap();
                    round_trip(&data);
                }
            }
        }
    }

    #[test]
    fn empty_input_has_no_code() {
        assert!(matches!(
            HuffmanCodec::<u8>::from_symbols(&[]),
            Err(TreeBuildError::EmptyInput)
        ));
    }

    #[test]
    fn codec_from_table_only() {
        let text: Vec<char> = "mississippi".chars().collect();
        let built = HuffmanCodec::from_symbols(&text).unwrap();
        let loaded = HuffmanCodec::from_table(built.table().clone());
        assert!(loaded.tree().is_none());

        let packed = built.encode(text.iter().copied()).unwrap();
        assert_eq!(loaded.encode(text.iter().copied()).unwrap(), packed);
        assert_eq!(loaded.decode(&packed).unwrap(), text);
    }

    #[test]
    fn symbols_outside_the_input() {
        let codec = HuffmanCodec::from_symbols(b"abc").unwrap();
        assert!(matches!(
            codec.encode(b"abz".iter().copied()),
            Err(EncodeError::UnknownSymbol { position: 2, .. })
        ));
        assert!(matches!(
            codec.decode(&[0, 0]),
            Err(DecodeError::MalformedStream(_))
        ));
    }
}
