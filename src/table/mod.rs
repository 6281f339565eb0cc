//! Code tables map every symbol to its bitstring and back.
//!
//! A [`CodeTable`] is either derived from a [`HuffmanTree`](crate::tree::HuffmanTree)
//! or loaded from a list of codes, in which case it is validated to be prefix free.
mod code;

pub use code::*;

use alloc::collections::btree_map::{self, BTreeMap};
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec;

use crate::common::Symbol;
use crate::tree::Node;

/// Bidirectional mapping between symbols and their codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S> {
    codes: BTreeMap<S, Code>,
    symbols: BTreeMap<Code, S>,
    min_code_len: usize,
    max_code_len: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodeTableError {
    #[error("A code table needs at least one symbol")]
    Empty,
    #[error("Symbol {symbol} has an empty code")]
    EmptyCode { symbol: String },
    #[error("Symbol {symbol} is listed more than once")]
    DuplicateSymbol { symbol: String },
    #[error("Code {code} is assigned to more than one symbol")]
    DuplicateCode { code: Code },
    #[error("Code {prefix} is a prefix of code {code}, the table can't be decoded unambiguously")]
    NotPrefixFree { prefix: Code, code: Code },
}

impl<S: Symbol> CodeTable<S> {
    /// Assign every leaf below `root` its root-to-leaf path, 0 for left and 1 for right.
    ///
    /// A lone leaf has no path, it gets the one bit code `0` instead so
    /// every symbol still takes up space in the stream.
    pub fn generate(root: &Node<S>) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(root, Code::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    let code = if path.is_empty() {
                        path.with_bit(false)
                    } else {
                        path
                    };
                    codes.insert(*symbol, code);
                }
                Node::Internal { left, right, .. } => {
                    stack.push((&**right, path.with_bit(true)));
                    stack.push((&**left, path.with_bit(false)));
                }
            }
        }
        let table = Self::from_map(codes);
        vtrace!(
            "Generated {} codes with lengths {}..={}",
            table.len(),
            table.min_code_len,
            table.max_code_len
        );
        table
    }

    /// Build a table from (symbol, code) pairs, e.g. a table read back from storage.
    ///
    /// Fails if a symbol or a code is listed twice, a code is empty or the
    /// codes are not prefix free.
    pub fn from_codes<I: IntoIterator<Item = (S, Code)>>(pairs: I) -> Result<Self, CodeTableError> {
        use CodeTableError as err;

        let mut codes = BTreeMap::new();
        for (symbol, code) in pairs {
            if code.is_empty() {
                return Err(err::EmptyCode {
                    symbol: format!("{:?}", symbol),
                });
            }
            if codes.insert(symbol, code).is_some() {
                return Err(err::DuplicateSymbol {
                    symbol: format!("{:?}", symbol),
                });
            }
        }
        if codes.is_empty() {
            return Err(err::Empty);
        }

        let table = Self::from_map(codes);
        if table.symbols.len() != table.codes.len() {
            let mut seen = BTreeSet::new();
            for code in table.codes.values() {
                if !seen.insert(code) {
                    return Err(err::DuplicateCode { code: code.clone() });
                }
            }
        }
        if let Some((prefix, code)) = table.find_prefix_pair() {
            return Err(err::NotPrefixFree {
                prefix: prefix.clone(),
                code: code.clone(),
            });
        }
        Ok(table)
    }

    fn from_map(codes: BTreeMap<S, Code>) -> Self {
        let symbols: BTreeMap<Code, S> = codes
            .iter()
            .map(|(symbol, code)| (code.clone(), *symbol))
            .collect();
        let min_code_len = codes.values().map(Code::len).min().unwrap_or(0);
        let max_code_len = codes.values().map(Code::len).max().unwrap_or(0);
        CodeTable {
            codes,
            symbols,
            min_code_len,
            max_code_len,
        }
    }

    /// The code assigned to `symbol`
    pub fn get(&self, symbol: &S) -> Option<&Code> {
        self.codes.get(symbol)
    }

    /// The symbol whose code is exactly `code`
    pub fn symbol(&self, code: &Code) -> Option<S> {
        self.symbols.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn min_code_len(&self) -> usize {
        self.min_code_len
    }

    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Iterate (symbol, code) pairs in ascending symbol order
    pub fn iter(&self) -> btree_map::Iter<'_, S, Code> {
        self.codes.iter()
    }

    /// Number of bits `symbols` occupy once encoded, `None` if one of them has no code
    pub fn encoded_bit_len<I: IntoIterator<Item = S>>(&self, symbols: I) -> Option<usize> {
        symbols
            .into_iter()
            .try_fold(0, |sum, symbol| Some(sum + self.get(&symbol)?.len()))
    }

    pub fn is_prefix_free(&self) -> bool {
        self.symbols.len() == self.codes.len() && self.find_prefix_pair().is_none()
    }

    /// In lexicographic order a code is directly followed by the codes it
    /// is a prefix of, so checking neighbours is enough.
    fn find_prefix_pair(&self) -> Option<(&Code, &Code)> {
        let mut sorted = self.symbols.keys();
        let mut previous = sorted.next()?;
        for code in sorted {
            if code.starts_with(previous) {
                return Some((previous, code));
            }
            previous = code;
        }
        None
    }
}

impl<'t, S: Symbol> IntoIterator for &'t CodeTable<S> {
    type Item = (&'t S, &'t Code);
    type IntoIter = btree_map::Iter<'t, S, Code>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
