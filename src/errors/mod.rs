//! The error returned by the top level compress and decompress operations.

use crate::container::ContainerError;
use crate::decoding::CorruptPayloadError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    /// There is no text to compress, or the container has no payload
    #[error("Nothing to process, the input is empty")]
    EmptyInput,
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    UnlocatedIo(#[from] std::io::Error),
    /// The input bytes are not UTF-8 and no fallback encoding was allowed
    #[error("Input is not valid UTF-8: {0}")]
    DecodeEncoding(#[source] std::str::Utf8Error),
    #[error("Malformed container: {0}")]
    MalformedContainer(#[from] ContainerError),
    #[error("Corrupt payload: {0}")]
    CorruptPayload(#[from] CorruptPayloadError),
    #[error("Internal error: no code was generated for symbol {symbol:?}")]
    MissingCode { symbol: char },
}

impl CodecError {
    /// Empty input is a warning for the caller rather than a failure
    pub fn is_empty_input(&self) -> bool {
        matches!(self, CodecError::EmptyInput)
    }
}
