use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// A bitstring, the path from the root of a Huffman tree to one of its leaves.
///
/// Displayed and parsed as a string of `0` and `1` digits.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseCodeError {
    #[error("Invalid digit {found:?} at position {position} in code. Only 0 and 1 are allowed")]
    InvalidDigit { found: char, position: usize },
}

impl Code {
    pub fn new() -> Self {
        Code { bits: Vec::new() }
    }

    /// Append a bit, `true` being a 1
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// A copy of this code with `bit` appended
    pub fn with_bit(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn starts_with(&self, prefix: &Code) -> bool {
        self.bits.starts_with(&prefix.bits)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Code { bits }
    }
}

impl From<&[bool]> for Code {
    fn from(bits: &[bool]) -> Self {
        Code {
            bits: bits.to_vec(),
        }
    }
}

impl FromStr for Code {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, digit)| match digit {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(ParseCodeError::InvalidDigit { found, position }),
            })
            .collect::<Result<Vec<bool>, ParseCodeError>>()?;
        Ok(Code { bits })
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}
