use alloc::vec::Vec;

use super::bit_reader::{BitReader, GetBitsError};
use crate::common::{Symbol, MAX_PAD_LEN, MIN_PAD_LEN};
use crate::table::{Code, CodeTable};
use crate::tree::{HuffmanTree, Node};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedStreamError {
    #[error("Source needs to have at least one byte")]
    SourceIsEmpty,
    #[error("Stream has a header but no payload byte. Every stream carries at least one padding bit")]
    MissingPayload,
    #[error("Invalid padding length; Is: {got}, Should be in {MIN_PAD_LEN}..={MAX_PAD_LEN}")]
    InvalidPadLen { got: u8 },
    #[error("The {pad_len} padding bits at the end of the stream are not all zero. Probably caused by data corruption or truncation")]
    NonZeroPadding { pad_len: u8 },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("Malformed stream: {0}")]
    MalformedStream(#[from] MalformedStreamError),
    #[error("{leftover} bits at bit {position} of the payload do not match any code. The stream is corrupted or was encoded with a different code table")]
    UnresolvedBits { leftover: usize, position: usize },
    #[error(transparent)]
    GetBitsError(#[from] GetBitsError),
}

/// The payload of a packed stream, header and padding stripped
pub struct Payload<'s> {
    pub pad_len: u8,
    bytes: &'s [u8],
    bit_len: usize,
}

impl<'s> Payload<'s> {
    /// Number of code bits in the stream
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// A reader over exactly the code bits
    pub fn reader(&self) -> BitReader<'s> {
        BitReader::with_bit_len(self.bytes, self.bit_len)
    }
}

/// Validate the framing of a packed stream and locate its code bits
pub fn unpack(source: &[u8]) -> Result<Payload<'_>, DecodeError> {
    use MalformedStreamError as err;

    let (&pad_len, bytes) = source.split_first().ok_or(err::SourceIsEmpty)?;
    if !(MIN_PAD_LEN..=MAX_PAD_LEN).contains(&pad_len) {
        return Err(err::InvalidPadLen { got: pad_len }.into());
    }
    // the padding never spans more than the last byte
    let last = *bytes.last().ok_or(err::MissingPayload)?;
    let pad_mask = ((1u16 << pad_len) - 1) as u8;
    if last & pad_mask != 0 {
        return Err(err::NonZeroPadding { pad_len }.into());
    }

    let bit_len = bytes.len() * 8 - usize::from(pad_len);
    vtrace!(
        "Unpacked stream of {} bytes: {} code bits, {} pad bits",
        source.len(),
        bit_len,
        pad_len
    );
    Ok(Payload {
        pad_len,
        bytes,
        bit_len,
    })
}

/// Decode a packed stream with the code table it was encoded with.
///
/// Bits are collected until they form a code of the table. Because the
/// codes are prefix free the first match is the only possible one.
pub fn decode<S: Symbol>(source: &[u8], table: &CodeTable<S>) -> Result<Vec<S>, DecodeError> {
    let payload = unpack(source)?;
    let mut br = payload.reader();
    let mut decoded = Vec::with_capacity(estimate_len(&payload, table.min_code_len()));

    let mut candidate = Code::new();
    let mut candidate_start = 0;
    while !br.is_empty() {
        candidate.push(br.get_bit()?);
        if candidate.len() < table.min_code_len() {
            continue;
        }
        if let Some(symbol) = table.symbol(&candidate) {
            decoded.push(symbol);
            candidate.clear();
            candidate_start = br.bits_read();
        } else if candidate.len() >= table.max_code_len() {
            // no code is this long, more bits can't help
            return Err(DecodeError::UnresolvedBits {
                leftover: candidate.len(),
                position: candidate_start,
            });
        }
    }

    if !candidate.is_empty() {
        return Err(DecodeError::UnresolvedBits {
            leftover: candidate.len(),
            position: candidate_start,
        });
    }
    Ok(decoded)
}

/// Decode a packed stream by walking the tree it was encoded with, 0 going left and 1 right.
///
/// A tree that is a single leaf decodes every `0` bit to its symbol,
/// matching the one bit code [`CodeTable::generate`] assigns it.
pub fn decode_with_tree<S: Symbol>(
    source: &[u8],
    tree: &HuffmanTree<S>,
) -> Result<Vec<S>, DecodeError> {
    let payload = unpack(source)?;
    let mut br = payload.reader();
    let mut decoded = Vec::with_capacity(estimate_len(&payload, 1));

    let root = tree.root();
    if let Node::Leaf { symbol, .. } = root {
        while !br.is_empty() {
            let position = br.bits_read();
            if br.get_bit()? {
                return Err(DecodeError::UnresolvedBits {
                    leftover: 1,
                    position,
                });
            }
            decoded.push(*symbol);
        }
        return Ok(decoded);
    }

    let mut node = root;
    let mut walked = 0;
    while !br.is_empty() {
        if let Node::Internal { left, right, .. } = node {
            node = if br.get_bit()? { &**right } else { &**left };
            walked += 1;
        }
        if let Node::Leaf { symbol, .. } = node {
            decoded.push(*symbol);
            node = root;
            walked = 0;
        }
    }

    if walked > 0 {
        return Err(DecodeError::UnresolvedBits {
            leftover: walked,
            position: br.bits_read() - walked,
        });
    }
    Ok(decoded)
}

fn estimate_len(payload: &Payload<'_>, min_code_len: usize) -> usize {
    payload.bit_len() / min_code_len.max(1)
}
