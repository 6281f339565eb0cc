//! Unpacking the padded byte stream and resolving its bits back to symbols

mod bit_reader;
mod stream_decoder;

pub use bit_reader::*;
pub use stream_decoder::*;
