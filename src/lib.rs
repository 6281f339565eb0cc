//! # ruhuff
//!
//! Huffman entropy coding: build an optimal prefix-free code from symbol
//! frequencies and use it to pack a symbol sequence into a self-describing
//! byte stream (and back).
//!
//! ```
//! use ruhuff::HuffmanCodec;
//!
//! let text: Vec<char> = "abracadabra".chars().collect();
//! let codec = HuffmanCodec::from_symbols(&text).unwrap();
//!
//! let packed = codec.encode(text.iter().copied()).unwrap();
//! let unpacked = codec.decode(&packed).unwrap();
//! assert_eq!(unpacked, text);
//! ```
//!
//! The pipeline is split into the pieces it is made of, so each can be used on its own:
//! [`frequency::FrequencyTable`] → [`tree::HuffmanTree`] → [`table::CodeTable`] →
//! [`encoding::encode`] / [`decoding::decode`].
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(any(feature = "std", test))]
extern crate std;

extern crate alloc;

macro_rules! vtrace {
    ($($x:expr),*) => {
        #[cfg(feature = "log")]
        tracing::trace!($($x),*);
    }
}

pub mod codec;
pub mod common;
pub mod decoding;
pub mod encoding;
pub mod frequency;
pub mod table;
pub mod tree;
pub mod visualize;

#[cfg(test)]
mod tests;

#[cfg(feature = "std")]
pub mod io;

#[cfg(feature = "std")]
pub mod persist;

pub use codec::HuffmanCodec;
pub use common::{Frequency, Symbol};
pub use frequency::FrequencyTable;
pub use table::{Code, CodeTable};
pub use tree::{HuffmanTree, Node};
