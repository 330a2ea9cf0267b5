//! Huffman coding is a method of encoding where symbols are assigned a code,
//! and more commonly used symbols get shorter codes, and less commonly
//! used symbols get longer codes. Codes are prefix free, meaning no code
//! is the start of another code.
//!
//! The three stages live in their own modules: counting symbols
//! ([`FrequencyMap`]), building the tree ([`HuffmanTree`]) and reading the
//! codes off the tree ([`CodeTable`]).
mod code_table;
mod frequency;
mod tree;

pub use code_table::*;
pub use frequency::*;
pub use tree::*;
