//! compression/registry.rs
//! Codec factory.

use std::sync::Arc;

use crate::compression::codecs::{DeflateCodec, HuffmanCodec};
use crate::compression::constants::DEFAULT_LEVEL_DEFLATE;
use crate::compression::types::{ChunkCodec, CompressionCodec};

/// Build a shareable codec instance. `level` only applies to deflate.
pub fn create_codec(codec: CompressionCodec, level: Option<u32>) -> Arc<dyn ChunkCodec> {
    match codec {
        CompressionCodec::Deflate => Arc::new(DeflateCodec::new(level.unwrap_or(DEFAULT_LEVEL_DEFLATE))),
        CompressionCodec::Huffman => Arc::new(HuffmanCodec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_returns_matching_codec() {
        assert_eq!(create_codec(CompressionCodec::Huffman, None).codec(), CompressionCodec::Huffman);
        assert_eq!(create_codec(CompressionCodec::Deflate, Some(9)).codec(), CompressionCodec::Deflate);
    }

    #[test]
    fn factory_codecs_interoperate() {
        let data = b"registry".repeat(32);
        for codec in [CompressionCodec::Deflate, CompressionCodec::Huffman] {
            let wire = create_codec(codec, Some(1)).encode(&data).unwrap();
            assert_eq!(create_codec(codec, None).decode(&wire).unwrap(), data);
        }
    }
}
