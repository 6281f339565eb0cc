use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::bit_writer::{BitWriter, BitWriterError};
use crate::common::{Symbol, HEADER_BITS};
use crate::table::CodeTable;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("Symbol {symbol} at position {position} has no code in the code table")]
    UnknownSymbol { symbol: String, position: usize },
    #[error(transparent)]
    BitWriterError(#[from] BitWriterError),
}

/// Number of zero bits appended to a payload of `bit_count` bits.
///
/// Always in `1..=8`: a payload that is already byte aligned gets a whole byte of padding.
pub fn pad_len(bit_count: usize) -> u8 {
    (8 - bit_count % 8) as u8
}

/// Encode `symbols` with the codes from `table` into a padded byte stream.
///
/// Either the whole input is encoded or an error is returned, there is no partial output.
///
/// ```
/// use ruhuff::{encoding, FrequencyTable, HuffmanTree};
///
/// let frequencies = FrequencyTable::from_symbols("aab".chars());
/// let table = HuffmanTree::build(&frequencies).unwrap().code_table();
/// let packed = encoding::encode("aab".chars(), &table).unwrap();
/// // one header byte telling that 5 of the 8 payload bits are padding
/// assert_eq!(packed[0], 5);
/// assert_eq!(packed.len(), 2);
/// ```
pub fn encode<S, I>(symbols: I, table: &CodeTable<S>) -> Result<Vec<u8>, EncodeError>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    let symbols = symbols.into_iter();
    // reserve for one byte per symbol, a reasonable guess for text
    let mut writer = BitWriter::with_capacity(symbols.size_hint().0 + 2);
    writer.write_bits(0, HEADER_BITS)?;

    for (position, symbol) in symbols.enumerate() {
        let code = table.get(&symbol).ok_or_else(|| EncodeError::UnknownSymbol {
            symbol: format!("{:?}", symbol),
            position,
        })?;
        writer.write_code(code);
    }

    finish(writer)
}

/// Frame an arbitrary bit sequence the same way [`encode`] frames codes
pub fn pack<I: IntoIterator<Item = bool>>(bits: I) -> Result<Vec<u8>, EncodeError> {
    let mut writer = BitWriter::new();
    writer.write_bits(0, HEADER_BITS)?;
    for bit in bits {
        writer.write_bit(bit);
    }
    finish(writer)
}

/// Append the padding and fill in the header
fn finish(mut writer: BitWriter) -> Result<Vec<u8>, EncodeError> {
    let payload_bits = writer.bits_written() - HEADER_BITS;
    let pad = pad_len(payload_bits);
    writer.write_bits(0, usize::from(pad))?;
    writer.change_bits(0, u64::from(pad), HEADER_BITS)?;
    vtrace!(
        "Encoded {} payload bits with {} bits of padding",
        payload_bits,
        pad
    );
    Ok(writer.dump()?)
}
