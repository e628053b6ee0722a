//! MSB-first bit packing with explicit trailing padding.

use crate::compression::codecs::huffman::tree::Code;

#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    acc: u8,
    filled: u32,
}

impl BitWriter {
    pub fn with_capacity(bytes: usize) -> Self {
        Self { bytes: Vec::with_capacity(bytes), acc: 0, filled: 0 }
    }

    #[inline]
    pub fn push_bit(&mut self, bit: bool) {
        self.acc = (self.acc << 1) | bit as u8;
        self.filled += 1;
        if self.filled == 8 {
            self.bytes.push(self.acc);
            self.acc = 0;
            self.filled = 0;
        }
    }

    #[inline]
    pub fn push_code(&mut self, code: Code) {
        for i in (0..code.len).rev() {
            self.push_bit((code.bits >> i) & 1 == 1);
        }
    }

    /// Flush the partial byte with zero bits; returns the packed bytes and the
    /// number of padding bits (0..=7).
    pub fn finish(mut self) -> (Vec<u8>, u32) {
        if self.filled == 0 {
            return (self.bytes, 0);
        }
        let pad = 8 - self.filled;
        self.bytes.push(self.acc << pad);
        (self.bytes, pad)
    }
}

/// Iterates the meaningful bits of a packed stream, never the padding.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> BitReader<'a> {
    /// Caller guarantees `pad <= 7` and `pad == 0` when `bytes` is empty.
    pub fn new(bytes: &'a [u8], pad: u32) -> Self {
        let limit = (bytes.len() * 8).saturating_sub(pad as usize);
        Self { bytes, pos: 0, limit }
    }

    /// Meaningful bits left to read.
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.limit {
            return None;
        }
        let byte = self.bytes[self.pos / 8];
        let bit = (byte >> (7 - (self.pos % 8))) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}
