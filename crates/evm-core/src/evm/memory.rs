//! # EVM Memory
//!
//! Byte-addressable linear memory.
//!
//! Writes grow the buffer to exactly `offset + len` bytes, zero-filling the
//! gap. Reads never grow it: positions past the end read as zero.

use crate::evm::word::WORD_SIZE;
use tracing::trace;

/// Memory capability used by the opcode handlers.
pub trait EvmMemory {
    /// Write `value` starting at `offset`, growing memory if needed.
    ///
    /// # Panics
    ///
    /// Panics if `offset + value.len()` overflows `usize`. The engine checks
    /// every range taken from the stack before writing.
    fn store(&mut self, value: &[u8], offset: usize);

    /// Read exactly `size` bytes starting at `offset`, zero-padded.
    fn load(&self, offset: usize, size: usize) -> Vec<u8>;

    /// Current length in bytes.
    fn len(&self) -> usize;

    /// Returns true if nothing has been written yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a single byte.
    fn load_byte(&self, offset: usize) -> u8 {
        self.load(offset, 1)[0]
    }

    /// Read a 32-byte word.
    fn load_word(&self, offset: usize) -> [u8; WORD_SIZE] {
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(&self.load(offset, WORD_SIZE));
        word
    }

    /// Write a single byte.
    fn store_byte(&mut self, value: u8, offset: usize) {
        self.store(&[value], offset);
    }

    /// Write a 32-byte word.
    fn store_word(&mut self, value: &[u8; WORD_SIZE], offset: usize) {
        self.store(value, offset);
    }

    /// Full contents.
    fn as_slice(&self) -> &[u8];
}

/// EVM memory implementation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Creates a new empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates memory holding `data`.
    #[must_use]
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl EvmMemory for Memory {
    fn store(&mut self, value: &[u8], offset: usize) {
        if value.is_empty() {
            return;
        }
        let Some(end) = offset.checked_add(value.len()) else {
            panic!(
                "memory write of {} bytes at offset {offset} overflows the address space",
                value.len()
            );
        };
        if end > self.data.len() {
            trace!(old_len = self.data.len(), new_len = end, "memory expanded");
            self.data.resize(end, 0);
        }
        self.data[offset..end].copy_from_slice(value);
    }

    fn load(&self, offset: usize, size: usize) -> Vec<u8> {
        let mut result = vec![0u8; size];
        if offset < self.data.len() {
            let end = offset.saturating_add(size).min(self.data.len());
            result[..end - offset].copy_from_slice(&self.data[offset..end]);
        }
        result
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

// =============================================================================
// TESTS
// =============================================================================
