use super::bit_reader::{BitReader, BitReaderError};
use crate::container::{self, Container, ContainerError, Header};
use crate::errors::CodecError;
use crate::huffman::{FrequencyMap, HuffmanTree};

/// Reasons a payload does not decode into exactly the text its header describes
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CorruptPayloadError {
    #[error(transparent)]
    BitReaderError(#[from] BitReaderError),
    #[error("Bits ran out {bits_into_symbol} bits into a symbol, the payload is probably truncated")]
    EndedMidSymbol { bits_into_symbol: usize },
    #[error("Found a 1 bit at position {position} but the only code is 0")]
    InvalidBitForSingleSymbol { position: usize },
    #[error("Padding bits at the end of the payload are not zero")]
    NonZeroPadding,
    #[error("Decoded all {expected} symbols but {bits_left} bits are left over")]
    TrailingBits { expected: u64, bits_left: usize },
    #[error("Header describes {expected} symbols, the payload only holds {got}")]
    MissingSymbols { expected: u64, got: u64 },
    #[error("Decoded symbol {symbol:?} {got} times, the header says {expected}")]
    FrequencyMismatch {
        symbol: char,
        expected: u64,
        got: u64,
    },
}

/// Turns a container back into the text it was made from.
///
/// The tree is rebuilt from the header's frequencies with the same rules the
/// encoder used, then the payload bits are walked through it: `0` goes left,
/// `1` goes right, and every leaf reached emits its symbol.
pub struct TextDecoder<'a> {
    container: Container<'a>,
    tree: HuffmanTree,
}

impl<'a> TextDecoder<'a> {
    /// Parse the container and rebuild the tree.
    ///
    /// A container with neither symbols nor payload fails with
    /// [`CodecError::EmptyInput`]. Symbols without a payload can only come
    /// from a truncated container and fail as [`CodecError::CorruptPayload`].
    pub fn new(source: &'a [u8]) -> Result<Self, CodecError> {
        let container = container::deserialize(source)?;
        let expected = container.header.frequencies.total();
        if container.payload.is_empty() {
            if expected == 0 {
                return Err(CodecError::EmptyInput);
            }
            return Err(CorruptPayloadError::MissingSymbols { expected, got: 0 }.into());
        }
        let tree = HuffmanTree::build(&container.header.frequencies)
            .ok_or(ContainerError::EmptyFrequencyTable)?;
        Ok(TextDecoder { container, tree })
    }

    pub fn header(&self) -> &Header {
        &self.container.header
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn payload(&self) -> &'a [u8] {
        self.container.payload
    }

    pub fn decode(&self) -> Result<String, CorruptPayloadError> {
        let expected = self.header().frequencies.total();
        let mut br = BitReader::new(self.container.payload, self.header().padding_bits)?;
        if !br.padding_is_zero() {
            return Err(CorruptPayloadError::NonZeroPadding);
        }

        // every symbol takes at least one bit
        let capacity = (expected as usize).min(br.bits_left());
        let mut text = String::with_capacity(capacity);
        let decoded = if self.tree.is_single_leaf() {
            self.decode_single_symbol(&mut br, expected, &mut text)?
        } else {
            self.walk(&mut br, expected, &mut text)?
        };

        if decoded != expected {
            return Err(CorruptPayloadError::MissingSymbols {
                expected,
                got: decoded,
            });
        }
        self.check_frequencies(&text)?;
        tracing::debug!(
            symbols = decoded,
            bits = br.bits_read(),
            "decoded payload"
        );
        Ok(text)
    }

    /// Symbol counts must match the header exactly. Together with the code
    /// lengths this pins down the payload length, so a payload that lost
    /// bits can not pass as a different text with the same symbol count.
    fn check_frequencies(&self, text: &str) -> Result<(), CorruptPayloadError> {
        let expected = &self.header().frequencies;
        let decoded = FrequencyMap::from_text(text);
        if &decoded == expected {
            return Ok(());
        }
        for (symbol, count) in expected {
            let got = decoded.get(symbol).unwrap_or(0);
            if got != count {
                return Err(CorruptPayloadError::FrequencyMismatch {
                    symbol,
                    expected: count,
                    got,
                });
            }
        }
        // same totals and every expected count matched, so nothing else can differ
        Ok(())
    }

    fn walk(
        &self,
        br: &mut BitReader<'_>,
        expected: u64,
        text: &mut String,
    ) -> Result<u64, CorruptPayloadError> {
        let root = self.tree.root();
        let mut current = root;
        let mut bits_into_symbol = 0;
        let mut decoded = 0;

        while br.bits_left() > 0 {
            if decoded == expected {
                return Err(CorruptPayloadError::TrailingBits {
                    expected,
                    bits_left: br.bits_left(),
                });
            }
            let bit = br.get_bit()?;
            // internal nodes always have both children
            current = match self.tree.child(current, bit) {
                Some(child) => child,
                None => root,
            };
            bits_into_symbol += 1;
            if let Some(symbol) = self.tree.symbol(current) {
                text.push(symbol);
                decoded += 1;
                current = root;
                bits_into_symbol = 0;
            }
        }

        if bits_into_symbol != 0 {
            return Err(CorruptPayloadError::EndedMidSymbol { bits_into_symbol });
        }
        Ok(decoded)
    }

    fn decode_single_symbol(
        &self,
        br: &mut BitReader<'_>,
        expected: u64,
        text: &mut String,
    ) -> Result<u64, CorruptPayloadError> {
        let symbol = match self.tree.symbol(self.tree.root()) {
            Some(symbol) => symbol,
            None => return Ok(0),
        };
        let mut decoded = 0;
        while br.bits_left() > 0 {
            if decoded == expected {
                return Err(CorruptPayloadError::TrailingBits {
                    expected,
                    bits_left: br.bits_left(),
                });
            }
            let position = br.bits_read();
            if br.get_bit()? {
                return Err(CorruptPayloadError::InvalidBitForSingleSymbol { position });
            }
            text.push(symbol);
            decoded += 1;
        }
        Ok(decoded)
    }
}
