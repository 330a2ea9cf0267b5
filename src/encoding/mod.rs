//! Modules used for compressing text into the container format.
pub mod bit_writer;
mod text_encoder;
pub use bit_writer::{pack, BitWriter, PaddedBitBuffer};
pub use text_encoder::*;

use crate::errors::CodecError;

/// Compress `text` into a self-describing container.
///
/// Empty text fails with [`CodecError::EmptyInput`].
pub fn compress(text: &str) -> Result<Vec<u8>, CodecError> {
    TextEncoder::new(text)?.encode()
}
