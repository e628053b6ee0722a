//! chunkpress-core
//!
//! Chunked, parallel file compression into a self-describing container.
//! Two codecs: library deflate and a per-chunk canonical Huffman coder.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod compression;
pub mod container;
pub mod telemetry;

// Chunk engine + public API
pub mod engine;

pub use engine::{compress, compress_sync, decompress, decompress_sync};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::CompressionCodec;
    pub use crate::engine::{
        compress, compress_stream, compress_sync, decompress, decompress_stream, decompress_sync, ApiConfig,
        CompressParams, InputSource, OutputSink, ParallelismProfile, StreamReport,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{ErrorKind, StreamError};
}
