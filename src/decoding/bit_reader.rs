/// Reads the bits of a padded byte buffer one at a time, most significant
/// bit of each byte first. The padding at the end is never handed out.
pub struct BitReader<'s> {
    idx: usize, //index counts bits already read
    len: usize, //bits that belong to the data, padding excluded
    source: &'s [u8],
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BitReaderError {
    #[error("Padding must be between 0 and 7 bits, is: {got}")]
    PaddingOutOfRange { got: u8 },
    #[error("Padding of {padding_bits} bits is more than the {available_bits} bits in the source")]
    PaddingExceedsSource {
        padding_bits: u8,
        available_bits: usize,
    },
    #[error("Cant read another bit, all {bits_read} bits have been read")]
    NotEnoughRemainingBits { bits_read: usize },
}

impl<'s> BitReader<'s> {
    pub fn new(source: &'s [u8], padding_bits: u8) -> Result<BitReader<'s>, BitReaderError> {
        if padding_bits > 7 {
            return Err(BitReaderError::PaddingOutOfRange { got: padding_bits });
        }
        let available_bits = source.len() * 8;
        let len = available_bits
            .checked_sub(usize::from(padding_bits))
            .ok_or(BitReaderError::PaddingExceedsSource {
                padding_bits,
                available_bits,
            })?;
        Ok(BitReader {
            idx: 0,
            len,
            source,
        })
    }

    pub fn bits_left(&self) -> usize {
        self.len - self.idx
    }

    pub fn bits_read(&self) -> usize {
        self.idx
    }

    pub fn get_bit(&mut self) -> Result<bool, BitReaderError> {
        if self.idx >= self.len {
            return Err(BitReaderError::NotEnoughRemainingBits {
                bits_read: self.idx,
            });
        }
        let bit = bit_at(self.source, self.idx);
        self.idx += 1;
        Ok(bit)
    }

    /// True if all the filler bits after the data are zero
    pub fn padding_is_zero(&self) -> bool {
        (self.len..self.source.len() * 8).all(|idx| !bit_at(self.source, idx))
    }

    pub fn reset(&mut self) {
        self.idx = 0;
    }
}

fn bit_at(source: &[u8], idx: usize) -> bool {
    (source[idx / 8] >> (7 - idx % 8)) & 1 == 1
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

/// Expand `source` into single bits and drop the last `padding_bits` of them.
pub fn unpack(source: &[u8], padding_bits: u8) -> Result<Vec<bool>, BitReaderError> {
    Ok(BitReader::new(source, padding_bits)?.collect())
}
