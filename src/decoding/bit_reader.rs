/// Reads bits front to back, starting at the most significant bit of every byte.
///
/// The reader can be limited to fewer bits than the source holds, so
/// trailing padding is never handed out.
pub struct BitReader<'s> {
    idx: usize, //index counts bits already read
    end: usize,
    source: &'s [u8],
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GetBitsError {
    #[error("Can't read {requested} bits, only have {remaining} bits left")]
    NotEnoughRemainingBits { requested: usize, remaining: usize },
}

impl<'s> BitReader<'s> {
    /// A reader that stops after the first `bit_len` bits of `source`
    pub fn with_bit_len(source: &'s [u8], bit_len: usize) -> BitReader<'s> {
        BitReader {
            idx: 0,
            end: bit_len.min(source.len() * 8),
            source,
        }
    }

    pub fn bits_left(&self) -> usize {
        self.end - self.idx
    }

    pub fn bits_read(&self) -> usize {
        self.idx
    }

    pub fn is_empty(&self) -> bool {
        self.idx == self.end
    }

    pub fn get_bit(&mut self) -> Result<bool, GetBitsError> {
        if self.idx >= self.end {
            return Err(GetBitsError::NotEnoughRemainingBits {
                requested: 1,
                remaining: 0,
            });
        }
        let byte = self.source[self.idx / 8];
        let bit = (byte >> (7 - self.idx % 8)) & 1 == 1;
        self.idx += 1;
        Ok(bit)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.get_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.bits_left(), Some(self.bits_left()))
    }
}

impl ExactSizeIterator for BitReader<'_> {}
