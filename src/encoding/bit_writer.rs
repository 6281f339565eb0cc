use alloc::vec::Vec;

use crate::table::Code;

/// An interface for writing an arbitrary number of bits into a buffer.
///
/// Bits are packed starting from the *most significant* bit of every byte.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// The buffer that's filled with bits
    output: Vec<u8>,
    /// The index pointing to the next unoccupied bit. Effectively just
    /// the number of bits that have been written into the buffer so far.
    bit_idx: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BitWriterError {
    #[error("Buffer holds {bits} bits which is not a whole number of bytes")]
    NotByteAligned { bits: usize },
    #[error("Can't write {num_bits} bits at once, the writer is limited to 64 bits")]
    TooManyBits { num_bits: usize },
    #[error("Can't change bits {start}..{end}, only {written} bits were written so far")]
    ChangeOutOfBounds {
        start: usize,
        end: usize,
        written: usize,
    },
}

impl BitWriter {
    /// Initialize a new writer. Write new bits into the buffer with `write_bits`, and
    /// obtain the output using `dump`
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            bit_idx: 0,
        }
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            bit_idx: 0,
        }
    }

    /// Number of bits written so far
    pub fn bits_written(&self) -> usize {
        self.bit_idx
    }

    pub fn write_bit(&mut self, bit: bool) {
        let byte_idx = self.bit_idx / 8;
        let bit_offset = self.bit_idx % 8;
        if byte_idx == self.output.len() {
            self.output.push(0);
        }
        if bit {
            self.output[byte_idx] |= 0x80 >> bit_offset;
        }
        self.bit_idx += 1;
    }

    /// Write the lowest `num_bits` of `value`, most significant of those first
    pub fn write_bits(&mut self, value: u64, num_bits: usize) -> Result<(), BitWriterError> {
        if num_bits > 64 {
            return Err(BitWriterError::TooManyBits { num_bits });
        }

        // Fast path for whole bytes onto a byte boundary
        if self.bit_idx % 8 == 0 && num_bits % 8 == 0 {
            for shift in (0..num_bits / 8).rev() {
                self.output.push((value >> (shift * 8)) as u8);
            }
            self.bit_idx += num_bits;
            return Ok(());
        }

        for shift in (0..num_bits).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
        Ok(())
    }

    /// Write all bits of `code` in order
    pub fn write_code(&mut self, code: &Code) {
        for bit in code.bits() {
            self.write_bit(*bit);
        }
    }

    /// Overwrite `num_bits` already written bits starting at bit `idx` with the lowest
    /// `num_bits` of `value`. Used to fill in headers once the payload is known.
    pub fn change_bits(
        &mut self,
        idx: usize,
        value: u64,
        num_bits: usize,
    ) -> Result<(), BitWriterError> {
        if num_bits > 64 {
            return Err(BitWriterError::TooManyBits { num_bits });
        }
        if idx + num_bits > self.bit_idx {
            return Err(BitWriterError::ChangeOutOfBounds {
                start: idx,
                end: idx + num_bits,
                written: self.bit_idx,
            });
        }
        for (offset, shift) in (0..num_bits).rev().enumerate() {
            let pos = idx + offset;
            let mask = 0x80 >> (pos % 8);
            if (value >> shift) & 1 == 1 {
                self.output[pos / 8] |= mask;
            } else {
                self.output[pos / 8] &= !mask;
            }
        }
        Ok(())
    }

    /// Returns the populated buffer that you've been writing bits into.
    ///
    /// This function consumes the writer, so it cannot be used after
    /// dumping
    pub fn dump(self) -> Result<Vec<u8>, BitWriterError> {
        if self.bit_idx % 8 != 0 {
            return Err(BitWriterError::NotByteAligned {
                bits: self.bit_idx,
            });
        }
        Ok(self.output)
    }
}
