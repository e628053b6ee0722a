use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::compression::CompressionCodec;
use crate::container::types::{CompressedChunk, Container, ContainerError, ContainerHeader, MAX_FIELD_LEN};

/// Encode a container into canonical wire format.
///
/// Layout:
///
/// ```text
/// [ algorithm_tag (4) ]
/// [ filename_len (4) ]
/// [ filename (N) ]
/// [ chunk_len (4) | chunk_payload (M) ] * until end of stream
/// ```
pub fn encode_container(
    algorithm: CompressionCodec,
    filename: &str,
    chunks: &[impl AsRef<[u8]>],
) -> Result<Vec<u8>, ContainerError> {
    let expected = ContainerHeader::TAG_LEN
        + ContainerHeader::NAME_LEN_LEN
        + filename.len()
        + chunks
            .iter()
            .map(|c| CompressedChunk::LEN_PREFIX + c.as_ref().len())
            .sum::<usize>();

    let mut out = Vec::with_capacity(expected);
    write_container(&mut out, algorithm, filename, chunks)?;
    Ok(out)
}

/// Stream the same layout into any writer.
pub fn write_container<W: Write>(
    w: &mut W,
    algorithm: CompressionCodec,
    filename: &str,
    chunks: &[impl AsRef<[u8]>],
) -> Result<(), ContainerError> {
    write_header(w, algorithm, filename)?;
    for chunk in chunks {
        write_chunk(w, chunk.as_ref())?;
    }
    Ok(())
}

pub fn write_header<W: Write>(w: &mut W, algorithm: CompressionCodec, filename: &str) -> Result<(), ContainerError> {
    w.write_i32::<BigEndian>(algorithm.tag())?;
    w.write_i32::<BigEndian>(checked_len("filename", filename.len())?)?;
    w.write_all(filename.as_bytes())?;
    Ok(())
}

pub fn write_chunk<W: Write>(w: &mut W, payload: &[u8]) -> Result<(), ContainerError> {
    w.write_i32::<BigEndian>(checked_len("chunk", payload.len())?)?;
    w.write_all(payload)?;
    Ok(())
}

fn checked_len(field: &'static str, len: usize) -> Result<i32, ContainerError> {
    if len > MAX_FIELD_LEN {
        return Err(ContainerError::FieldTooLarge { field, len, max: MAX_FIELD_LEN });
    }
    Ok(len as i32)
}

impl Container {
    pub fn encode(&self) -> Result<Vec<u8>, ContainerError> {
        let payloads: Vec<&[u8]> = self.chunks.iter().map(|c| c.payload.as_ref()).collect();
        encode_container(self.header.algorithm, &self.header.filename, &payloads)
    }
}
