//! compression/codecs/mod.rs
//! Concrete chunk codecs.
//!
//! - Every codec compresses one chunk into one self-contained payload.
//! - No state crosses chunk boundaries, so chunks can be coded in any order.

pub mod deflate;
pub mod huffman;

pub use deflate::DeflateCodec;
pub use huffman::HuffmanCodec;
