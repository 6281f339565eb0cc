//! Values and interfaces shared between the encoding side
//! and the decoding side.

use core::fmt::Debug;

/// An atomic unit of the input alphabet, e.g. a `char` or a `u8`.
///
/// Symbols need a total order so frequency and code tables iterate in a
/// stable order, which keeps the generated codes reproducible when
/// frequencies tie.
pub trait Symbol: Copy + Ord + Debug {}

impl<T: Copy + Ord + Debug> Symbol for T {}

/// Occurrence count of a symbol
pub type Frequency = u64;

// --- STREAM FRAMING ---
/// The packed stream starts with one byte holding the number of pad bits
pub const HEADER_BITS: usize = 8;
/// At least one pad bit is always appended, even to byte aligned payloads
pub const MIN_PAD_LEN: u8 = 1;
/// A byte aligned payload gets a full byte of padding
pub const MAX_PAD_LEN: u8 = 8;
