//! A lossless text compressor built on a character-frequency Huffman code.
//!
//! The compressed artefact is self-describing: a little-endian `u32` header
//! length, a JSON header holding the symbol frequencies and the number of
//! padding bits, then the packed code bits.
//!
//! ```
//! let packed = huffpack::compress("aaabbc")?;
//! assert_eq!(huffpack::decompress(&packed)?, "aaabbc");
//! # Ok::<(), huffpack::CodecError>(())
//! ```
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

pub mod container;
pub mod decoding;
pub mod encoding;
pub mod errors;
pub mod huffman;
pub mod io;
mod tests;

pub use decoding::decompress;
pub use encoding::compress;
pub use errors::CodecError;
pub use huffman::{CodeTable, FrequencyMap, HuffmanTree};
