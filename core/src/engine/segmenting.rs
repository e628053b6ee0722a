//! Chunk splitter: fixed-size blocks from any reader.

use std::io::{self, Read};

use bytes::Bytes;

use crate::constants::CHUNK_SIZE;

// Fill `len` bytes unless EOF comes first; short reads are retried so block
// boundaries never depend on how the reader fragments its data.
pub fn read_exact_or_eof<R: Read>(r: &mut R, len: usize) -> io::Result<Bytes> {
    let mut buf = vec![0u8; len];
    let mut off = 0;

    while off < len {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    buf.truncate(off);
    Ok(Bytes::from(buf))
}

/// Lazy, single-pass sequence of blocks. Every block is `chunk_size` bytes
/// except possibly the last; an empty input yields no blocks at all.
#[derive(Debug)]
pub struct ChunkSplitter<R> {
    reader: R,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> ChunkSplitter<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, CHUNK_SIZE)
    }

    /// `chunk_size` of zero is treated as one byte.
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self { reader, chunk_size: chunk_size.max(1), done: false }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl<R: Read> Iterator for ChunkSplitter<R> {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match read_exact_or_eof(&mut self.reader, self.chunk_size) {
            Ok(block) if block.is_empty() => {
                self.done = true;
                None
            }
            Ok(block) => {
                if block.len() < self.chunk_size {
                    self.done = true;
                }
                Some(Ok(block))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Split `reader` into 1 MiB blocks.
pub fn split_chunks<R: Read>(reader: R) -> ChunkSplitter<R> {
    ChunkSplitter::new(reader)
}
