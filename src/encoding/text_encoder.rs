//! Utilities and interfaces for turning text into a container.

use super::bit_writer::{BitWriter, PaddedBitBuffer};
use crate::container;
use crate::errors::CodecError;
use crate::huffman::{CodeTable, FrequencyMap, HuffmanTree};

/// Compresses one text into one container.
///
/// `TextEncoder` will generally be used by:
/// 1. Analysing the text with `TextEncoder::new()`
/// 2. Writing the container with `TextEncoder::encode`
///
/// The intermediate results stay available for reporting.
///
/// # Examples
/// ```
/// use huffpack::encoding::TextEncoder;
/// let encoder = TextEncoder::new("aaabbc")?;
/// assert_eq!(encoder.frequencies().get('a'), Some(3));
/// assert_eq!(encoder.code_table().get('a').unwrap().to_string(), "0");
///
/// let packed = encoder.encode()?;
/// assert_eq!(huffpack::decompress(&packed)?, "aaabbc");
/// # Ok::<(), huffpack::CodecError>(())
/// ```
pub struct TextEncoder<'t> {
    text: &'t str,
    frequencies: FrequencyMap,
    code_table: CodeTable,
}

impl<'t> TextEncoder<'t> {
    /// Count the symbols of `text` and derive their codes.
    ///
    /// Fails with [`CodecError::EmptyInput`] if there is nothing to compress.
    pub fn new(text: &'t str) -> Result<Self, CodecError> {
        if text.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        let frequencies = FrequencyMap::from_text(text);
        let tree = HuffmanTree::build(&frequencies);
        let code_table = CodeTable::from_tree(tree.as_ref());
        tracing::debug!(
            symbols = frequencies.total(),
            distinct = frequencies.len(),
            "analysed input text"
        );
        Ok(TextEncoder {
            text,
            frequencies,
            code_table,
        })
    }

    pub fn frequencies(&self) -> &FrequencyMap {
        &self.frequencies
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.code_table
    }

    /// Number of code bits the text turns into, padding excluded
    pub fn encoded_bits(&self) -> u64 {
        self.frequencies
            .iter()
            .filter_map(|(symbol, count)| {
                self.code_table
                    .get(symbol)
                    .map(|code| code.len() as u64 * count)
            })
            .sum()
    }

    /// Concatenate the codes of all symbols in text order and pack them into bytes
    pub fn encode_payload(&self) -> Result<PaddedBitBuffer, CodecError> {
        let mut writer = BitWriter::with_capacity(self.encoded_bits() as usize);
        for symbol in self.text.chars() {
            let code = self
                .code_table
                .get(symbol)
                .ok_or(CodecError::MissingCode { symbol })?;
            writer.write_code(code);
        }
        let payload = writer.finish();
        tracing::debug!(
            bits = payload.bit_len(),
            padding = payload.padding_bits,
            bytes = payload.bytes.len(),
            "packed payload"
        );
        Ok(payload)
    }

    /// Produce the complete container: header length, header and payload
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let payload = self.encode_payload()?;
        let container =
            container::serialize(&self.frequencies, payload.padding_bits, &payload.bytes)?;
        Ok(container)
    }
}
