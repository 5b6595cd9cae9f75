//! Adaptive LZW code table.
//!
//! The table maps 12-bit codes to byte sequences. Codes 0-255 are the
//! bootstrap singletons (the byte equal to the code value); codes 256-4095
//! are assigned to grown sequences in monotonically increasing order. When
//! the code space is exhausted the table switches back to its bootstrap
//! state in full, mirroring the reset the encoder performed at the same
//! point in the stream.
//!
//! Entries are stored as parent links rather than full byte buffers: each
//! grown entry records the code it extends and the one byte it appends,
//! with its first byte cached. Sequences are materialized on demand by
//! walking parent links, so an insertion costs O(1) instead of copying the
//! whole parent sequence.

use crate::error::Result;

/// Number of bootstrap singleton codes.
pub const BOOTSTRAP_CODES: usize = 256;

/// Total number of representable 12-bit codes.
pub const MAX_CODES: usize = 4096;

#[derive(Debug)]
enum Node {
    /// Bootstrap singleton; the byte equals the code value.
    Literal(u8),
    /// Extends `parent`'s sequence by one byte.
    Extension { parent: u16, last: u8, first: u8 },
    /// Fully owned sequence; only used for the insertion that triggers a
    /// table reset, whose parent chain does not survive the switch.
    Owned(Box<[u8]>),
}

/// Ordered table mapping codes to byte sequences.
///
/// The slot at index `i` holds the entry for code `i`; the next free code
/// is always `nodes.len()`.
#[derive(Debug)]
pub struct Dictionary {
    nodes: Vec<Node>,
}

impl Dictionary {
    /// Create a dictionary in its bootstrap state.
    ///
    /// The full 4096-slot arena is reserved up front, so the capacity is
    /// fixed for the lifetime of the table and later insertions never
    /// allocate. Reservation failure maps to [`crate::LzwError::Allocation`].
    pub fn new() -> Result<Self> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(MAX_CODES)?;
        for byte in 0..=u8::MAX {
            nodes.push(Node::Literal(byte));
        }
        Ok(Self { nodes })
    }

    /// Whether `code` currently resolves to an entry.
    pub fn contains(&self, code: u16) -> bool {
        usize::from(code) < self.nodes.len()
    }

    /// The code the next insertion will receive.
    pub fn next_code(&self) -> u16 {
        self.nodes.len() as u16
    }

    /// First byte of the sequence for `code`.
    ///
    /// `code` must resolve; see [`Dictionary::contains`].
    pub fn first_byte(&self, code: u16) -> u8 {
        match &self.nodes[usize::from(code)] {
            Node::Literal(byte) => *byte,
            Node::Extension { first, .. } => *first,
            Node::Owned(bytes) => bytes[0],
        }
    }

    /// Append the materialized sequence for `code` to `out`.
    ///
    /// Walks parent links root-ward, then reverses the appended tail into
    /// stream order. `code` must resolve; see [`Dictionary::contains`].
    pub fn append_bytes(&self, code: u16, out: &mut Vec<u8>) {
        let start = out.len();
        let mut current = usize::from(code);
        loop {
            match &self.nodes[current] {
                Node::Literal(byte) => {
                    out.push(*byte);
                    break;
                }
                Node::Extension { parent, last, .. } => {
                    out.push(*last);
                    current = usize::from(*parent);
                }
                Node::Owned(bytes) => {
                    out.extend(bytes.iter().rev());
                    break;
                }
            }
        }
        out[start..].reverse();
    }

    /// Insert the entry extending `parent`'s sequence by `byte`, returning
    /// the assigned code.
    ///
    /// If the table is full, every entry at or above code 256 is discarded
    /// and the next free code returns to 256 before the insertion. The new
    /// entry's bytes are materialized ahead of the switch because its
    /// parent chain is among the discarded entries.
    pub fn add(&mut self, parent: u16, byte: u8) -> u16 {
        if self.nodes.len() == MAX_CODES {
            let mut bytes = Vec::new();
            self.append_bytes(parent, &mut bytes);
            bytes.push(byte);
            self.nodes.truncate(BOOTSTRAP_CODES);
            self.nodes.push(Node::Owned(bytes.into_boxed_slice()));
            return BOOTSTRAP_CODES as u16;
        }

        let first = self.first_byte(parent);
        let code = self.nodes.len() as u16;
        self.nodes.push(Node::Extension {
            parent,
            last: byte,
            first,
        });
        code
    }

    /// Discard all grown entries, returning to the bootstrap state.
    pub fn reset(&mut self) {
        self.nodes.truncate(BOOTSTRAP_CODES);
    }
}
