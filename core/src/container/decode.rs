use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::compression::CompressionCodec;
use crate::container::types::{CompressedChunk, Container, ContainerError, ContainerHeader};

#[inline]
fn read_len(wire: &[u8], off: usize, field: &'static str) -> Result<usize, ContainerError> {
    let available = wire.len().saturating_sub(off);
    if available < 4 {
        return Err(ContainerError::Truncated { field, needed: 4, available });
    }
    let value = BigEndian::read_i32(&wire[off..off + 4]);
    if value < 0 {
        return Err(ContainerError::NegativeLength { field, value });
    }
    Ok(value as usize)
}

/// Parse tag and filename, returning the header and the offset of the first
/// chunk record.
pub fn parse_container_header(wire: &[u8]) -> Result<(ContainerHeader, usize), ContainerError> {
    if wire.len() < ContainerHeader::TAG_LEN {
        return Err(ContainerError::Truncated {
            field: "algorithm tag",
            needed: ContainerHeader::TAG_LEN,
            available: wire.len(),
        });
    }
    let tag = BigEndian::read_i32(&wire[..ContainerHeader::TAG_LEN]);
    let algorithm = CompressionCodec::from_tag(tag)
        .map_err(|_| ContainerError::InvalidAlgorithm(crate::utils::enum_name_or_hex::<CompressionCodec>(tag)))?;
    let mut off = ContainerHeader::TAG_LEN;

    let name_len = read_len(wire, off, "filename length")?;
    off += ContainerHeader::NAME_LEN_LEN;

    let available = wire.len() - off;
    if available < name_len {
        return Err(ContainerError::Truncated { field: "filename", needed: name_len, available });
    }
    let filename = String::from_utf8(wire[off..off + name_len].to_vec())?;
    off += name_len;

    Ok((ContainerHeader { algorithm, filename }, off))
}

/// Iterator over the chunk records that follow the header.
///
/// Yields zero-copy slices of the backing buffer. Ends cleanly only when the
/// buffer is exhausted exactly at a record boundary; after the first error it
/// yields nothing more.
#[derive(Debug, Clone)]
pub struct ChunkRecords {
    wire: Bytes,
    off: usize,
    failed: bool,
}

impl ChunkRecords {
    pub fn new(wire: Bytes, off: usize) -> Self {
        Self { wire, off, failed: false }
    }
}

impl Iterator for ChunkRecords {
    type Item = Result<Bytes, ContainerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.off >= self.wire.len() {
            return None;
        }

        let len = match read_len(&self.wire, self.off, "chunk length") {
            Ok(len) => len,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };
        let start = self.off + CompressedChunk::LEN_PREFIX;
        let available = self.wire.len() - start;
        if available < len {
            self.failed = true;
            return Some(Err(ContainerError::Truncated { field: "chunk payload", needed: len, available }));
        }

        self.off = start + len;
        Some(Ok(self.wire.slice(start..start + len)))
    }
}

/// Decode a whole container. Any truncation fails the call; no partial chunk
/// list is returned.
pub fn decode_container(wire: impl Into<Bytes>) -> Result<Container, ContainerError> {
    let wire = wire.into();
    let (header, off) = parse_container_header(&wire)?;
    let chunks = ChunkRecords::new(wire, off)
        .map(|r| r.map(|payload| CompressedChunk { payload }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Container { header, chunks })
}
