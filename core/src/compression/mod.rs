//! compression/mod.rs
//! Chunk codecs behind one encode/decode contract.
//!
//! Notes:
//! - Deterministic per-chunk coding keeps parallel and serial runs byte-identical.
//! - The registry builds a codec instance for a tag.

pub mod codecs;
pub mod constants;
pub mod registry;
pub mod types;

pub use constants::*;
pub use registry::*;
pub use types::*;
