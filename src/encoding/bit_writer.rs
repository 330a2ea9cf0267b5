use crate::huffman::Code;

/// An interface for writing an arbitrary number of bits into a buffer.
///
/// Bits fill each byte starting at the *most significant position*. The
/// final partial byte is padded with zeros by [`BitWriter::finish`].
#[derive(Debug, Default)]
pub struct BitWriter {
    /// The buffer that's filled with bits
    output: Vec<u8>,
    /// The index pointing to the next unoccupied bit. Effectively just
    /// the number of bits that have been written into the buffer so far.
    bit_idx: usize,
}

/// Bytes holding a bit sequence plus the number of zero bits appended
/// at the end of the last byte to fill it up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaddedBitBuffer {
    pub bytes: Vec<u8>,
    /// Always in `0..=7`
    pub padding_bits: u8,
}

impl PaddedBitBuffer {
    /// Number of real bits, not counting the padding
    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(usize::from(self.padding_bits))
    }
}

impl BitWriter {
    /// Initialize a new writer. Write new bits into the buffer with `write_bit` or
    /// `write_code`, and obtain the output using `finish`
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`BitWriter::new`] but with room for `num_bits` bits
    pub fn with_capacity(num_bits: usize) -> Self {
        Self {
            output: Vec::with_capacity((num_bits + 7) / 8),
            bit_idx: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        let bit_offset = self.bit_idx % 8;
        if bit_offset == 0 {
            self.output.push(0);
        }
        if bit {
            // the byte for this bit was pushed above at the latest
            if let Some(byte) = self.output.last_mut() {
                *byte |= 1 << (7 - bit_offset);
            }
        }
        self.bit_idx += 1;
    }

    pub fn write_bits(&mut self, bits: &[bool]) {
        for bit in bits {
            self.write_bit(*bit);
        }
    }

    pub fn write_code(&mut self, code: &Code) {
        self.write_bits(code.bits());
    }

    pub fn bits_written(&self) -> usize {
        self.bit_idx
    }

    /// Returns the populated buffer that you've been writing bits into.
    ///
    /// The unused low bits of the last byte are already zero, they are only
    /// accounted for here.
    pub fn finish(self) -> PaddedBitBuffer {
        let padding_bits = ((8 - self.bit_idx % 8) % 8) as u8;
        PaddedBitBuffer {
            bytes: self.output,
            padding_bits,
        }
    }
}

/// Pack `bits` into bytes, most significant bit first, padding the last
/// byte with zeros.
pub fn pack(bits: &[bool]) -> PaddedBitBuffer {
    let mut writer = BitWriter::with_capacity(bits.len());
    writer.write_bits(bits);
    writer.finish()
}
