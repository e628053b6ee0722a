use bytes::Bytes;
use thiserror::Error;

use crate::compression::CompressionCodec;

/// Upper bound for any length field (wire type is a signed int32).
pub const MAX_FIELD_LEN: usize = i32::MAX as usize;

/// Fixed part of the container header.
///
/// All integers are big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub algorithm: CompressionCodec,
    pub filename: String,
}

impl ContainerHeader {
    pub const TAG_LEN: usize = 4;
    pub const NAME_LEN_LEN: usize = 4;

    pub fn encoded_len(&self) -> usize {
        Self::TAG_LEN + Self::NAME_LEN_LEN + self.filename.len()
    }
}

/// One `(length, payload)` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedChunk {
    pub payload: Bytes,
}

impl CompressedChunk {
    pub const LEN_PREFIX: usize = 4;

    /// Declared length, equal to the payload byte count.
    #[inline]
    pub fn length(&self) -> usize {
        self.payload.len()
    }

    pub fn encoded_len(&self) -> usize {
        Self::LEN_PREFIX + self.payload.len()
    }
}

/// A complete, immutable container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub header: ContainerHeader,
    pub chunks: Vec<CompressedChunk>,
}

impl Container {
    #[inline]
    pub fn algorithm(&self) -> CompressionCodec {
        self.header.algorithm
    }

    #[inline]
    pub fn filename(&self) -> &str {
        &self.header.filename
    }

    pub fn payload_len(&self) -> usize {
        self.chunks.iter().map(CompressedChunk::length).sum()
    }

    pub fn encoded_len(&self) -> usize {
        self.header.encoded_len() + self.chunks.iter().map(CompressedChunk::encoded_len).sum::<usize>()
    }
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("invalid algorithm tag: {0}")]
    InvalidAlgorithm(String),

    #[error("truncated container: {field} needs {needed} bytes, {available} available")]
    Truncated {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("negative {field} length: {value}")]
    NegativeLength { field: &'static str, value: i32 },

    #[error("{field} length {len} exceeds {max}")]
    FieldTooLarge { field: &'static str, len: usize, max: usize },

    #[error("filename is not valid UTF-8: {0}")]
    InvalidFilename(#[from] std::string::FromUtf8Error),

    #[error("container I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
