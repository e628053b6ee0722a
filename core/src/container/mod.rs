//! Container wire format.
//!
//! Responsibilities:
//! - Define the container header and chunk records
//! - Encode containers into the canonical big-endian layout
//! - Decode containers with strict truncation checks
//!
//! Non-responsibilities:
//! - Compression
//! - IO
//! - Parallelism

pub mod decode;
pub mod encode;
pub mod types;

pub use decode::{decode_container, parse_container_header, ChunkRecords};
pub use encode::{encode_container, write_container};
pub use types::{CompressedChunk, Container, ContainerError, ContainerHeader};
