use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Display;

use super::RecordError;
use crate::io::{BufRead, Error, Write};

/// One `<symbol> <value>` line of a persisted file
#[derive(Debug, PartialEq, Eq)]
pub(super) struct Record {
    /// 1-based line the record starts on
    pub line: usize,
    pub symbol: char,
    pub value: String,
}

/// Split `reader` into records.
///
/// The newline symbol can't be written in front of its value, so it is
/// stored as an empty line with the value on the line after it.
pub(super) fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>, RecordError> {
    let mut records = Vec::new();
    let mut seen = BTreeSet::new();
    let mut lines = reader.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        let line = line?;
        let number = idx + 1;

        let (symbol, value) = if line.is_empty() {
            let (_, value) = lines
                .next()
                .ok_or(RecordError::MissingValue { line: number })?;
            ('\n', value?)
        } else {
            let mut chars = line.chars();
            let symbol = chars.next().ok_or(RecordError::MissingValue { line: number })?;
            match chars.as_str().strip_prefix(' ').map(String::from) {
                Some(value) => (symbol, value),
                None => {
                    return Err(RecordError::MalformedRecord {
                        line: number,
                        content: line,
                    })
                }
            }
        };

        let value = value.trim();
        if value.is_empty() {
            return Err(RecordError::MissingValue { line: number });
        }
        if !seen.insert(symbol) {
            return Err(RecordError::DuplicateSymbol {
                symbol,
                line: number,
            });
        }
        records.push(Record {
            line: number,
            symbol,
            value: String::from(value),
        });
    }

    Ok(records)
}

/// Write one record, using the empty line form for the newline symbol
pub(super) fn write_record<W: Write, V: Display>(
    writer: &mut W,
    symbol: char,
    value: V,
) -> Result<(), Error> {
    if symbol == '\n' {
        writeln!(writer)?;
        writeln!(writer, " {}", value)
    } else {
        writeln!(writer, "{} {}", symbol, value)
    }
}
