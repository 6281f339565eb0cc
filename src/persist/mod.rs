//! Plain text files for frequency tables and code tables of `char` symbols,
//! plus the human readable tree listing.
//!
//! Both file kinds hold one `<symbol> <value>` record per line:
//!
//! ```text
//! a 5
//! b 9
//!
//!  3
//! ```
//!
//! The newline symbol is stored as an empty line followed by its value.
mod records;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::num::ParseIntError;

use crate::common::Frequency;
use crate::frequency::FrequencyTable;
use crate::io::{self, BufRead, Write};
use crate::table::{CodeTable, CodeTableError, ParseCodeError};
use crate::tree::HuffmanTree;
use records::{read_records, write_record};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RecordError {
    #[error("Line {line}: expected `<symbol> <value>`, found {content:?}")]
    MalformedRecord { line: usize, content: String },
    #[error("Line {line}: record has no value")]
    MissingValue { line: usize },
    #[error("Line {line}: symbol {symbol:?} was already listed")]
    DuplicateSymbol { symbol: char, line: usize },
    #[error("Line {line}: {value:?} is not a valid frequency: {source}")]
    InvalidFrequency {
        line: usize,
        value: String,
        source: ParseIntError,
    },
    #[error("Line {line}: {source}")]
    InvalidCode { line: usize, source: ParseCodeError },
    #[error(transparent)]
    CodeTable(#[from] CodeTableError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub fn read_frequencies<R: BufRead>(reader: R) -> Result<FrequencyTable<char>, RecordError> {
    let mut frequencies = FrequencyTable::new();
    for record in read_records(reader)? {
        let count = record
            .value
            .parse::<Frequency>()
            .map_err(|source| RecordError::InvalidFrequency {
                line: record.line,
                value: record.value.clone(),
                source,
            })?;
        frequencies.insert(record.symbol, count);
    }
    vtrace!("Read frequencies of {} symbols", frequencies.len());
    Ok(frequencies)
}

pub fn write_frequencies<W: Write>(
    mut writer: W,
    frequencies: &FrequencyTable<char>,
) -> Result<(), io::Error> {
    for (symbol, count) in frequencies {
        write_record(&mut writer, symbol, count)?;
    }
    writer.flush()
}

/// Read a code table and check that it can be decoded unambiguously
pub fn read_code_table<R: BufRead>(reader: R) -> Result<CodeTable<char>, RecordError> {
    let mut pairs = Vec::new();
    for record in read_records(reader)? {
        let code = record
            .value
            .parse()
            .map_err(|source| RecordError::InvalidCode {
                line: record.line,
                source,
            })?;
        pairs.push((record.symbol, code));
    }
    Ok(CodeTable::from_codes(pairs)?)
}

pub fn write_code_table<W: Write>(mut writer: W, table: &CodeTable<char>) -> Result<(), io::Error> {
    for (symbol, code) in table {
        write_record(&mut writer, *symbol, code)?;
    }
    writer.flush()
}

/// Write a table of every leaf with its frequency and code.
///
/// Symbols are quoted and escaped, so whitespace symbols stay readable.
pub fn write_tree_listing<W: Write>(mut writer: W, tree: &HuffmanTree<char>) -> Result<(), io::Error> {
    let table = tree.code_table();
    let mut leaves = tree.leaves();
    leaves.sort_unstable();

    writeln!(writer, "Character  Frequency  Bit code values")?;
    for (symbol, frequency) in leaves {
        let shown = format!("{:?}", symbol);
        match table.get(&symbol) {
            Some(code) => writeln!(writer, "{:<11}{:<11}{}", shown, frequency, code)?,
            None => writeln!(writer, "{:<11}{}", shown, frequency)?,
        }
    }
    writer.flush()
}
