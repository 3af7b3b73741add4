//! Storage instructions: SLOAD, SSTORE.

use crate::errors::VmError;
use crate::evm::engine::Engine;
use crate::evm::memory::EvmMemory;
use crate::evm::stack::EvmStack;
use crate::evm::storage::{EvmStorage, StorageKey};
use crate::evm::word;
use primitive_types::U256;
use tracing::trace;

impl<S, M, K> Engine<S, M, K>
where
    S: EvmStack,
    M: EvmMemory,
    K: EvmStorage,
{
    /// SLOAD: `[key] -> [storage[key]]`, zero for unwritten keys.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` on an empty stack, or `StorageKeyOutOfRange`
    /// when the key does not fit a storage key.
    pub fn sload(&mut self) -> Result<(), VmError> {
        let [key] = self.operands()?;
        let slot = storage_key(key)?;
        self.discard(1)?;

        let value = self.storage.load(slot);
        self.stack.push(word::from_be_slice(&value))
    }

    /// SSTORE: `[key, value] -> []`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands, or
    /// `StorageKeyOutOfRange` when the key does not fit a storage key.
    pub fn sstore(&mut self) -> Result<(), VmError> {
        let [key, value] = self.operands()?;
        let slot = storage_key(key)?;
        self.discard(2)?;

        trace!(key = slot, %value, "sstore");
        self.storage.store(slot, word::to_be_bytes(value));
        Ok(())
    }
}

fn storage_key(key: U256) -> Result<StorageKey, VmError> {
    word::to_u64(key).ok_or(VmError::StorageKeyOutOfRange(key))
}

// =============================================================================
// TESTS
// =============================================================================
