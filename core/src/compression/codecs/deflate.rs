//! Deflate (gzip member) via flate2, one independent stream per chunk.

use std::io::{Read, Write};

use flate2::{bufread::GzDecoder, write::GzEncoder, Compression};

use crate::compression::constants::MAX_LEVEL_DEFLATE;
use crate::compression::types::{ChunkCodec, CompressionCodec, CompressionError};

#[derive(Debug, Clone, Copy)]
pub struct DeflateCodec {
    level: Compression,
}

impl DeflateCodec {
    pub fn new(level: u32) -> Self {
        let level = match level {
            0..=MAX_LEVEL_DEFLATE => Compression::new(level),
            _ => Compression::default(),
        };
        Self { level }
    }

    pub fn level(&self) -> u32 {
        self.level.level()
    }
}

impl Default for DeflateCodec {
    fn default() -> Self {
        Self { level: Compression::default() }
    }
}

impl ChunkCodec for DeflateCodec {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::Deflate
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        // GzBuilder defaults leave mtime at zero, so output is reproducible.
        let mut enc = GzEncoder::new(Vec::with_capacity(input.len() / 2 + 64), self.level);
        enc.write_all(input)?;
        Ok(enc.finish()?)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut dec = GzDecoder::new(input);
        let mut out = Vec::with_capacity(input.len() * 2);
        dec.read_to_end(&mut out)
            .map_err(|e| CompressionError::corrupt("deflate", e.to_string()))?;
        // A chunk holds exactly one gzip member.
        let rest = dec.into_inner();
        if !rest.is_empty() {
            return Err(CompressionError::corrupt(
                "deflate",
                format!("{} trailing bytes after gzip member", rest.len()),
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_text() {
        let codec = DeflateCodec::new(6);
        let input = b"the quick brown fox jumps over the lazy dog ".repeat(64);
        let wire = codec.encode(&input).unwrap();
        assert!(wire.len() < input.len());
        assert_eq!(codec.decode(&wire).unwrap(), input);
    }

    #[test]
    fn output_is_deterministic() {
        let codec = DeflateCodec::default();
        let input = vec![7u8; 4096];
        assert_eq!(codec.encode(&input).unwrap(), codec.encode(&input).unwrap());
    }

    #[test]
    fn out_of_range_level_falls_back_to_default() {
        assert_eq!(DeflateCodec::new(42).level(), Compression::default().level());
        assert_eq!(DeflateCodec::new(0).level(), 0);
    }

    #[test]
    fn garbage_is_corrupt_chunk() {
        let codec = DeflateCodec::default();
        let err = codec.decode(b"definitely not gzip").unwrap_err();
        assert!(matches!(err, CompressionError::CorruptChunk { codec: "deflate", .. }));
    }

    #[test]
    fn trailing_bytes_are_corrupt_chunk() {
        let codec = DeflateCodec::default();
        let mut wire = codec.encode(b"hello hello hello").unwrap();
        wire.extend_from_slice(b"JUNKJUNKJUNK");
        let err = codec.decode(&wire).unwrap_err();
        assert!(matches!(err, CompressionError::CorruptChunk { codec: "deflate", .. }));
    }

    #[test]
    fn two_concatenated_members_are_corrupt_chunk() {
        let codec = DeflateCodec::default();
        let mut wire = codec.encode(b"first").unwrap();
        wire.extend(codec.encode(b"second").unwrap());
        assert!(codec.decode(&wire).is_err());
    }

    #[test]
    fn empty_block_still_produces_payload() {
        let codec = DeflateCodec::default();
        let wire = codec.encode(&[]).unwrap();
        assert!(!wire.is_empty());
        assert!(codec.decode(&wire).unwrap().is_empty());
    }
}
