//! The self-describing container that wraps a compressed payload.
//!
//! ```text
//! +----------------+---------------------------+-----------------+
//! | header_length  | header                    | payload         |
//! | u32, LE        | header_length bytes, JSON | remaining bytes |
//! +----------------+---------------------------+-----------------+
//! ```
//!
//! The header is a JSON object `{"freq": {"<symbol>": <count>, ...}, "padding": <n>}`
//! where `padding` is the number of filler bits at the end of the payload.

use crate::huffman::{FrequencyMap, FrequencyMapError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::{TryFrom, TryInto};

/// Size of the header length field
pub const HEADER_LENGTH_BYTES: usize = 4;
pub const MAX_PADDING_BITS: u8 = 7;

/// The decoded header of a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub frequencies: FrequencyMap,
    pub padding_bits: u8,
}

/// A parsed container. The payload borrows from the input.
#[derive(Debug)]
pub struct Container<'a> {
    /// Size of the serialized header in bytes
    pub header_length: u32,
    pub header: Header,
    pub payload: &'a [u8],
}

/// The header as it appears on the wire
#[derive(Serialize, Deserialize)]
struct RawHeader {
    freq: BTreeMap<String, u64>,
    padding: u64,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ContainerError {
    #[error("Container needs at least 4 bytes for the header length, got: {got}")]
    NotEnoughBytesForHeaderLength { got: usize },
    #[error("Header length says there should be {declared} header bytes but only {available} bytes follow")]
    HeaderLengthExceedsInput { declared: u32, available: usize },
    #[error("Header is not valid JSON with `freq` and `padding` fields: {0}")]
    InvalidHeader(#[source] serde_json::Error),
    #[error("Frequency table key {key:?} is not exactly one symbol")]
    InvalidSymbol { key: String },
    #[error(transparent)]
    InvalidFrequencies(#[from] FrequencyMapError),
    #[error("Frequency table is empty but the payload is not")]
    EmptyFrequencyTable,
    #[error("Padding must be between 0 and 7 bits, is: {got}")]
    PaddingOutOfRange { got: u64 },
    #[error("Serialized header is {len} bytes, more than the length field can hold")]
    HeaderTooLarge { len: usize },
    #[error("Failed to serialize the header: {0}")]
    SerializeHeader(#[source] serde_json::Error),
}

/// Write the header for `frequencies` and `padding_bits`, prefixed with its
/// length, followed by `payload`.
pub fn serialize(
    frequencies: &FrequencyMap,
    padding_bits: u8,
    payload: &[u8],
) -> Result<Vec<u8>, ContainerError> {
    if padding_bits > MAX_PADDING_BITS {
        return Err(ContainerError::PaddingOutOfRange {
            got: u64::from(padding_bits),
        });
    }
    let raw = RawHeader {
        freq: frequencies
            .iter()
            .map(|(symbol, count)| (symbol.to_string(), count))
            .collect(),
        padding: u64::from(padding_bits),
    };
    let header = serde_json::to_vec(&raw).map_err(ContainerError::SerializeHeader)?;
    let header_length =
        u32::try_from(header.len()).map_err(|_| ContainerError::HeaderTooLarge { len: header.len() })?;

    let mut output = Vec::with_capacity(HEADER_LENGTH_BYTES + header.len() + payload.len());
    output.extend_from_slice(&header_length.to_le_bytes());
    output.extend_from_slice(&header);
    output.extend_from_slice(payload);

    tracing::trace!(header_length, payload = payload.len(), "serialized container");
    Ok(output)
}

/// Split `source` into header and payload and parse the header.
pub fn deserialize(source: &[u8]) -> Result<Container<'_>, ContainerError> {
    if source.len() < HEADER_LENGTH_BYTES {
        return Err(ContainerError::NotEnoughBytesForHeaderLength { got: source.len() });
    }
    let (length_bytes, rest) = source.split_at(HEADER_LENGTH_BYTES);
    let header_length = u32::from_le_bytes(length_bytes.try_into().map_err(|_| {
        ContainerError::NotEnoughBytesForHeaderLength { got: source.len() }
    })?);
    let header_end = usize::try_from(header_length)
        .ok()
        .filter(|len| *len <= rest.len())
        .ok_or(ContainerError::HeaderLengthExceedsInput {
            declared: header_length,
            available: rest.len(),
        })?;
    let (header_bytes, payload) = rest.split_at(header_end);

    let header = parse_header(header_bytes)?;
    tracing::trace!(
        header_length,
        distinct = header.frequencies.len(),
        padding = header.padding_bits,
        payload = payload.len(),
        "parsed container"
    );
    Ok(Container {
        header_length,
        header,
        payload,
    })
}

fn parse_header(header_bytes: &[u8]) -> Result<Header, ContainerError> {
    let raw: RawHeader =
        serde_json::from_slice(header_bytes).map_err(ContainerError::InvalidHeader)?;

    let padding_bits = u8::try_from(raw.padding)
        .ok()
        .filter(|padding| *padding <= MAX_PADDING_BITS)
        .ok_or(ContainerError::PaddingOutOfRange { got: raw.padding })?;

    let mut counts = Vec::with_capacity(raw.freq.len());
    for (key, count) in raw.freq {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => counts.push((symbol, count)),
            _ => return Err(ContainerError::InvalidSymbol { key }),
        }
    }
    let frequencies = FrequencyMap::from_counts(counts)?;

    Ok(Header {
        frequencies,
        padding_bits,
    })
}
