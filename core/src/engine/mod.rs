//! Chunked compression engine.
//!
//! Responsibilities:
//! - Split input into fixed-size blocks
//! - Fan blocks out to a worker pool and fan results back in, in order
//! - Assemble and parse containers around the codec outputs
//!
//! Non-responsibilities:
//! - Codec internals
//! - Wire layout of the container

pub mod core;
pub mod io;
pub mod parallelism;
pub mod pipeline;
pub mod pool;
pub mod segmenting;

pub use self::core::{
    compress, compress_stream, compress_sync, compress_with, decompress, decompress_stream, decompress_sync,
    decompress_with, ApiConfig, CompressOutput, CompressParams, DecompressOutput, StreamReport,
};
pub use io::{deliver, open_input, read_all, Delivery, InputSource, OutputSink};
pub use parallelism::ParallelismProfile;
pub use pipeline::{ChunkEngine, ChunkOp, ChunkOutcome, ProcessedChunks};
pub use pool::{PendingChunk, WorkerPool};
pub use segmenting::{split_chunks, ChunkSplitter};
