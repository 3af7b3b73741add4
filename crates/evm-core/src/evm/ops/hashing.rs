//! KECCAK256 (0x20).

use crate::errors::VmError;
use crate::evm::engine::Engine;
use crate::evm::memory::EvmMemory;
use crate::evm::stack::EvmStack;
use crate::evm::storage::EvmStorage;
use crate::evm::word;
use sha3::{Digest, Keccak256};
use tracing::trace;

/// Keccak-256 digest (the pre-standard padding Ethereum uses, not SHA3-256).
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

impl<S, M, K> Engine<S, M, K>
where
    S: EvmStack,
    M: EvmMemory,
    K: EvmStorage,
{
    /// KECCAK256: `[offset, size] -> [keccak256(memory[offset..offset + size])]`.
    ///
    /// Bytes past the end of memory hash as zero; memory does not grow.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands, or
    /// `InvalidMemoryAccess` when `size` does not fit `usize`.
    pub fn keccak256(&mut self) -> Result<(), VmError> {
        let [offset, size] = self.operands()?;
        let (start, len) = self.read_range(offset, size)?;
        self.discard(2)?;

        let data = if len == 0 {
            Vec::new()
        } else {
            self.memory.load(start, len)
        };
        let digest = keccak256(&data);
        trace!(offset = start, size = len, "keccak256");
        self.stack.push(word::from_be_slice(&digest))
    }
}

// =============================================================================
// TESTS
// =============================================================================
