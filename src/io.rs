//! Re-exports of the std I/O items the persisted formats and the CLI are written against.
pub use std::io::{BufRead, BufReader, BufWriter, Error, ErrorKind, Read, Write};
