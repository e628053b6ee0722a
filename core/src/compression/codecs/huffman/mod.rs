//! codecs/huffman
//! Per-chunk Huffman coder.
//!
//! Payload layout:
//!
//! ```text
//! [ frequency table (see table.rs) ]
//! [ pad_bits (4, BE) ]            0..=7
//! [ bitstream (N) ]               MSB first, low `pad_bits` of the last byte are zero
//! ```

pub mod bits;
pub mod table;
pub mod tree;

use std::io::Write;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

pub use bits::{BitReader, BitWriter};
pub use table::FrequencyTable;
pub use tree::{Code, CodeBook, HuffmanTree, Node};

use crate::compression::types::{ChunkCodec, CompressionCodec, CompressionError};

const CODEC: &str = "huffman";
const PAD_LEN: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ChunkCodec for HuffmanCodec {
    fn codec(&self) -> CompressionCodec {
        CompressionCodec::Huffman
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        encode_block(input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        decode_block(input)
    }
}

pub fn encode_block(block: &[u8]) -> Result<Vec<u8>, CompressionError> {
    if block.len() > u32::MAX as usize {
        return Err(CompressionError::ChunkTooLarge { have: block.len(), max: u32::MAX as usize });
    }

    let table = FrequencyTable::from_block(block);
    let mut out = Vec::with_capacity(table.encoded_len() + PAD_LEN + block.len() / 2);
    table.write_to(&mut out)?;

    let Some(tree) = HuffmanTree::build(&table) else {
        out.write_u32::<BigEndian>(0)?;
        return Ok(out);
    };
    let book = tree.codes();

    let mut writer = BitWriter::with_capacity(block.len() / 2 + 1);
    for &b in block {
        let code = book
            .get(b)
            .ok_or_else(|| CompressionError::corrupt(CODEC, format!("no code for byte {}", b)))?;
        writer.push_code(code);
    }
    let (packed, pad) = writer.finish();

    out.write_u32::<BigEndian>(pad)?;
    out.write_all(&packed)?;
    Ok(out)
}

pub fn decode_block(payload: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let (table, mut off) = FrequencyTable::parse(payload)?;

    if payload.len() < off + PAD_LEN {
        return Err(CompressionError::corrupt(CODEC, "missing padding field"));
    }
    let pad = BigEndian::read_u32(&payload[off..off + PAD_LEN]);
    off += PAD_LEN;
    if pad > 7 {
        return Err(CompressionError::corrupt(CODEC, format!("padding {} out of range", pad)));
    }

    let bitstream = &payload[off..];
    if bitstream.is_empty() && pad != 0 {
        return Err(CompressionError::corrupt(CODEC, "padding declared for empty bitstream"));
    }
    if let Some(&last) = bitstream.last() {
        if last & ((1u8 << pad) - 1) != 0 {
            return Err(CompressionError::corrupt(CODEC, "non-zero padding bits"));
        }
    }

    let Some(tree) = HuffmanTree::build(&table) else {
        if !bitstream.is_empty() {
            return Err(CompressionError::corrupt(CODEC, "bitstream without frequency table"));
        }
        return Ok(Vec::new());
    };

    let expected = table.total();
    let reader = BitReader::new(bitstream, pad);
    if (reader.remaining() as u64) < expected {
        // Every symbol costs at least one bit.
        return Err(CompressionError::corrupt(
            CODEC,
            format!("{} bits cannot hold {} symbols", reader.remaining(), expected),
        ));
    }

    let mut out = Vec::with_capacity(expected as usize);
    let root = tree.root();

    if let Node::Leaf { value } = tree.node(root) {
        // One distinct symbol: each meaningful bit is one occurrence.
        out.resize(reader.remaining(), value);
    } else {
        let mut cur = root;
        for bit in reader {
            let Node::Internal { left, right } = tree.node(cur) else {
                return Err(CompressionError::corrupt(CODEC, "traversal stalled on a leaf"));
            };
            cur = if bit { right } else { left };
            if let Node::Leaf { value } = tree.node(cur) {
                out.push(value);
                cur = root;
            }
        }
        if cur != root {
            return Err(CompressionError::corrupt(CODEC, "bitstream ends mid-symbol"));
        }
    }

    if out.len() as u64 != expected {
        return Err(CompressionError::corrupt(
            CODEC,
            format!("decoded {} symbols, table declares {}", out.len(), expected),
        ));
    }
    Ok(out)
}
