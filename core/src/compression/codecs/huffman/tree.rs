//! Arena-backed Huffman tree with a total extraction order.
//!
//! Nodes are extracted from a min-heap keyed by `(weight, sequence)`. Leaves use
//! their byte value as sequence, internal nodes use `256 + creation index`, so
//! two builds from the same table always produce the same shape. When two nodes
//! are merged the first one extracted (the lighter) becomes the right child.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::compression::codecs::huffman::table::FrequencyTable;
use crate::compression::constants::SYMBOL_COUNT;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf { value: u8 },
    Internal { left: NodeId, right: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapEntry {
    weight: u64,
    sequence: u32,
    id: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for `table`. Returns `None` for an empty table.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let distinct = table.distinct();
        let mut nodes = Vec::with_capacity(distinct.saturating_mul(2));
        let mut heap = BinaryHeap::with_capacity(distinct);

        for (value, count) in table.entries() {
            let id = nodes.len();
            nodes.push(Node::Leaf { value });
            heap.push(Reverse(HeapEntry { weight: count as u64, sequence: value as u32, id }));
        }

        let mut next_sequence = SYMBOL_COUNT as u32;
        while heap.len() > 1 {
            let Reverse(first) = heap.pop()?;
            let Reverse(second) = heap.pop()?;

            let id = nodes.len();
            nodes.push(Node::Internal { left: second.id, right: first.id });
            heap.push(Reverse(HeapEntry {
                weight: first.weight + second.weight,
                sequence: next_sequence,
                id,
            }));
            next_sequence += 1;
        }

        let Reverse(root) = heap.pop()?;
        Some(Self { nodes, root: root.id })
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Node {
        self.nodes[id]
    }

    /// True when the table held exactly one distinct symbol.
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.nodes[self.root], Node::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    /// Derive the code book with a pre-order walk (left `0`, right `1`).
    pub fn codes(&self) -> CodeBook {
        let mut book = CodeBook::empty();

        if let Node::Leaf { value } = self.nodes[self.root] {
            // A lone leaf would otherwise get an empty code.
            book.codes[value as usize] = Some(Code { bits: 0, len: 1 });
            return book;
        }

        let mut stack = vec![(self.root, Code { bits: 0, len: 0 })];
        while let Some((id, code)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { value } => book.codes[value as usize] = Some(code),
                Node::Internal { left, right } => {
                    // Right pushed first so left is visited first.
                    stack.push((right, code.child(1)));
                    stack.push((left, code.child(0)));
                }
            }
        }
        book
    }
}

/// A variable-length code, right-aligned in `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u32,
}

impl Code {
    #[inline]
    fn child(self, bit: u64) -> Self {
        Self { bits: (self.bits << 1) | bit, len: self.len + 1 }
    }

    /// Render as a `0`/`1` string, most significant bit first.
    pub fn to_bit_string(&self) -> String {
        (0..self.len)
            .rev()
            .map(|i| if (self.bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBook {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeBook {
    fn empty() -> Self {
        Self { codes: [None; SYMBOL_COUNT] }
    }

    #[inline]
    pub fn get(&self, value: u8) -> Option<Code> {
        self.codes[value as usize]
    }

    /// `(value, code length)` for every coded symbol, ascending by value.
    pub fn lengths(&self) -> Vec<(u8, u32)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(v, c)| c.map(|c| (v as u8, c.len)))
            .collect()
    }
}
