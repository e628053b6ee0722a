//! Per-chunk byte frequency table and its wire encoding.
//!
//! ```text
//! [ entry_count (4, BE) ]
//! [ value (1) | frequency (4, BE) ] * entry_count
//! ```
//!
//! Entries are written in ascending byte order and only for symbols that occur.

use std::io::Write;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::compression::constants::SYMBOL_COUNT;
use crate::compression::types::CompressionError;

#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Size of the entry-count prefix.
    pub const COUNT_LEN: usize = 4;
    /// Size of one serialized `(value, frequency)` entry.
    pub const ENTRY_LEN: usize = 1 + 4;

    pub fn new() -> Self {
        Self { counts: [0; SYMBOL_COUNT] }
    }

    /// Count every byte of `block`. Caller guarantees `block.len() <= u32::MAX`.
    pub fn from_block(block: &[u8]) -> Self {
        let mut table = Self::new();
        for &b in block {
            table.counts[b as usize] += 1;
        }
        table
    }

    #[inline]
    pub fn count(&self, value: u8) -> u32 {
        self.counts[value as usize]
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts, i.e. the decoded block length.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Present symbols in ascending byte order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(v, &c)| (v as u8, c))
    }

    pub fn encoded_len(&self) -> usize {
        Self::COUNT_LEN + self.distinct() * Self::ENTRY_LEN
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), CompressionError> {
        w.write_u32::<BigEndian>(self.distinct() as u32)?;
        for (value, count) in self.entries() {
            w.write_u8(value)?;
            w.write_u32::<BigEndian>(count)?;
        }
        Ok(())
    }

    /// Parse a table from the head of `input`, returning it with the number of
    /// bytes consumed.
    pub fn parse(input: &[u8]) -> Result<(Self, usize), CompressionError> {
        if input.len() < Self::COUNT_LEN {
            return Err(CompressionError::corrupt("huffman", "missing frequency table header"));
        }
        let entry_count = BigEndian::read_u32(&input[..Self::COUNT_LEN]) as usize;
        if entry_count > SYMBOL_COUNT {
            return Err(CompressionError::corrupt(
                "huffman",
                format!("entry count {} exceeds {}", entry_count, SYMBOL_COUNT),
            ));
        }

        let end = Self::COUNT_LEN + entry_count * Self::ENTRY_LEN;
        if input.len() < end {
            return Err(CompressionError::corrupt(
                "huffman",
                format!("entry count {} needs {} bytes, have {}", entry_count, end, input.len()),
            ));
        }

        let mut table = Self::new();
        for entry in input[Self::COUNT_LEN..end].chunks_exact(Self::ENTRY_LEN) {
            let value = entry[0];
            let count = BigEndian::read_u32(&entry[1..]);
            if count == 0 {
                return Err(CompressionError::corrupt("huffman", format!("zero frequency for byte {}", value)));
            }
            if table.counts[value as usize] != 0 {
                return Err(CompressionError::corrupt("huffman", format!("duplicate entry for byte {}", value)));
            }
            table.counts[value as usize] = count;
        }

        Ok((table, end))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl FromIterator<(u8, u32)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (value, count) in iter {
            table.counts[value as usize] = count;
        }
        table
    }
}
