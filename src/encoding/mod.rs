//! Packing a symbol sequence into the padded, self-describing byte stream.
//!
//! The stream layout is:
//!
//! | bits        | content                                         |
//! |-------------|-------------------------------------------------|
//! | 8           | `pad_len`, the number of trailing pad bits (1-8) |
//! | n           | the codes of all symbols, in order              |
//! | `pad_len`   | zero bits up to (and possibly a whole) byte     |
//!
//! Bits are packed most significant bit first.
mod bit_writer;
mod stream_encoder;

pub use bit_writer::*;
pub use stream_encoder::*;
