//! Memory instructions: MLOAD, MSTORE, MSTORE8, MSIZE.
//!
//! Ranges are validated before any operand is popped.

use crate::errors::VmError;
use crate::evm::engine::Engine;
use crate::evm::memory::EvmMemory;
use crate::evm::stack::EvmStack;
use crate::evm::storage::EvmStorage;
use crate::evm::word::{self, WORD_SIZE};
use primitive_types::U256;

impl<S, M, K> Engine<S, M, K>
where
    S: EvmStack,
    M: EvmMemory,
    K: EvmStorage,
{
    /// MLOAD: `[offset] -> [memory[offset..offset + 32]]`.
    ///
    /// Reading past the end yields zeros and does not grow memory, however
    /// large the offset.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` on an empty stack.
    pub fn mload(&mut self) -> Result<(), VmError> {
        let [offset] = self.operands()?;
        let (start, _) = self.read_range(offset, U256::from(WORD_SIZE))?;
        self.discard(1)?;

        let value = self.memory.load_word(start);
        self.stack.push(word::from_be_slice(&value))
    }

    /// MSTORE: `[offset, value] -> []`, writes `value` as 32 big-endian bytes.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands, or
    /// `InvalidMemoryAccess` / `MemoryLimitExceeded` for a bad offset.
    pub fn mstore(&mut self) -> Result<(), VmError> {
        let [offset, value] = self.operands()?;
        let (start, _) = self.write_range(offset, U256::from(WORD_SIZE))?;
        self.discard(2)?;

        self.memory.store_word(&word::to_be_bytes(value), start);
        Ok(())
    }

    /// MSTORE8: `[offset, value] -> []`, writes the low byte of `value`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands, or
    /// `InvalidMemoryAccess` / `MemoryLimitExceeded` for a bad offset.
    pub fn mstore8(&mut self) -> Result<(), VmError> {
        let [offset, value] = self.operands()?;
        let (start, _) = self.write_range(offset, U256::one())?;
        self.discard(2)?;

        self.memory.store_byte(value.byte(0), start);
        Ok(())
    }

    /// MSIZE: `[] -> [memory length in bytes]`.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` on a full stack.
    pub fn msize(&mut self) -> Result<(), VmError> {
        let len = self.memory.len();
        self.stack.push(U256::from(len))
    }
}

// =============================================================================
// TESTS
// =============================================================================
