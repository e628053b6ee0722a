//! compression/types.rs
//! Codec tag, codec errors and the per-chunk codec trait.
use std::fmt;
use std::io;
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

use crate::utils::enum_name_or_hex;

/// Algorithm tag written at the head of every container (int32, big-endian).
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum CompressionCodec {
    Deflate = 0,
    Huffman = 1,
}

impl CompressionCodec {
    /// Resolve a raw wire tag.
    pub fn from_tag(raw: i32) -> Result<Self, CompressionError> {
        Self::try_from_primitive(raw)
            .map_err(|_| CompressionError::InvalidAlgorithm(enum_name_or_hex::<Self>(raw)))
    }

    #[inline]
    pub fn tag(self) -> i32 {
        self.into()
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionCodec::Deflate => "deflate",
            CompressionCodec::Huffman => "huffman",
        }
    }
}

impl fmt::Display for CompressionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionCodec {
    type Err = CompressionError;

    /// Case-insensitive; `gzip` is accepted as an alias of `deflate`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deflate" | "gzip" => Ok(CompressionCodec::Deflate),
            "huffman" => Ok(CompressionCodec::Huffman),
            _ => Err(CompressionError::InvalidAlgorithm(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("invalid compression algorithm: {0}")]
    InvalidAlgorithm(String),

    #[error("corrupt {codec} chunk: {msg}")]
    CorruptChunk { codec: &'static str, msg: String },

    #[error("chunk too large: {have} > {max}")]
    ChunkTooLarge { have: usize, max: usize },

    #[error("codec I/O failure: {0}")]
    Io(#[from] io::Error),
}

impl CompressionError {
    pub(crate) fn corrupt(codec: &'static str, msg: impl Into<String>) -> Self {
        CompressionError::CorruptChunk { codec, msg: msg.into() }
    }
}

/// Uniform per-chunk contract satisfied by every codec.
///
/// Implementations are stateless between calls: the same input always yields
/// the same output, and no state crosses chunk boundaries.
pub trait ChunkCodec: Send + Sync {
    fn codec(&self) -> CompressionCodec;

    /// Compress a single block.
    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Restore a single block from its encoded payload.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tags_are_stable() {
        assert_eq!(CompressionCodec::Deflate.tag(), 0);
        assert_eq!(CompressionCodec::Huffman.tag(), 1);
        assert_eq!(CompressionCodec::from_tag(1).unwrap(), CompressionCodec::Huffman);
        assert!(matches!(CompressionCodec::from_tag(2), Err(CompressionError::InvalidAlgorithm(s)) if s == "0x2"));
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Huffman".parse::<CompressionCodec>().unwrap(), CompressionCodec::Huffman);
        assert_eq!(" GZIP ".parse::<CompressionCodec>().unwrap(), CompressionCodec::Deflate);
        assert!("zip".parse::<CompressionCodec>().is_err());
        assert_eq!(CompressionCodec::Deflate.to_string(), "deflate");
    }
}
