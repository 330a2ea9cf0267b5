//! Structures and utilities used for turning containers back into text.
pub mod bit_reader;
mod text_decoder;
pub use bit_reader::{unpack, BitReader, BitReaderError};
pub use text_decoder::*;

use crate::errors::CodecError;

/// Recover the text stored in a container produced by [`crate::compress`].
///
/// A container without symbols or payload fails with [`CodecError::EmptyInput`]; a
/// payload that doesn't decode into exactly the symbols listed in the header
/// fails with [`CodecError::CorruptPayload`].
pub fn decompress(source: &[u8]) -> Result<String, CodecError> {
    let decoder = TextDecoder::new(source)?;
    Ok(decoder.decode()?)
}
