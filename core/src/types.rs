use std::fmt;
use std::io;

use thiserror::Error;

use crate::compression::CompressionError;
use crate::container::ContainerError;

/// Coarse failure classes every error maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognized codec tag or name.
    InvalidAlgorithm,
    /// Stream ended before a declared field or record was complete.
    TruncatedContainer,
    /// A chunk payload could not be decoded (or encoded).
    CorruptChunk,
    /// Container filename bytes are not UTF-8.
    InvalidFilename,
    /// Underlying read/write failure unrelated to the format.
    IoFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidAlgorithm => "invalid algorithm",
            ErrorKind::TruncatedContainer => "truncated container",
            ErrorKind::CorruptChunk => "corrupt chunk",
            ErrorKind::InvalidFilename => "invalid filename",
            ErrorKind::IoFailure => "I/O failure",
        };
        f.write_str(name)
    }
}

/// Unified engine error covering I/O, container framing, codecs and the
/// chunk pipeline.
/// - `From<T>` impls enable `?` across layers.
/// - `kind()` gives callers a stable classification.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    /// One or more chunk tasks failed; `index` is the first in submission order.
    #[error("chunk {index} failed ({failed} of {total} chunks failed): {source}")]
    ChunkFailed {
        index: usize,
        failed: usize,
        total: usize,
        #[source]
        source: CompressionError,
    },

    /// Worker pool could not accept or answer a job.
    #[error("pipeline error: {0}")]
    Pipeline(&'static str),
}

impl StreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::Io(_) | StreamError::Pipeline(_) => ErrorKind::IoFailure,
            StreamError::Container(e) => container_kind(e),
            StreamError::Compression(e) | StreamError::ChunkFailed { source: e, .. } => compression_kind(e),
        }
    }
}

fn container_kind(e: &ContainerError) -> ErrorKind {
    match e {
        ContainerError::InvalidAlgorithm(_) => ErrorKind::InvalidAlgorithm,
        ContainerError::Truncated { .. }
        | ContainerError::NegativeLength { .. }
        | ContainerError::FieldTooLarge { .. } => ErrorKind::TruncatedContainer,
        ContainerError::InvalidFilename(_) => ErrorKind::InvalidFilename,
        ContainerError::Io(_) => ErrorKind::IoFailure,
    }
}

fn compression_kind(e: &CompressionError) -> ErrorKind {
    match e {
        CompressionError::InvalidAlgorithm(_) => ErrorKind::InvalidAlgorithm,
        CompressionError::CorruptChunk { .. } | CompressionError::ChunkTooLarge { .. } => ErrorKind::CorruptChunk,
        CompressionError::Io(_) => ErrorKind::IoFailure,
    }
}
