//! # Error Types
//!
//! All error types for instruction execution.

use primitive_types::U256;
use thiserror::Error;

// =============================================================================
// VM ERRORS
// =============================================================================

/// Errors that can occur while executing a single instruction.
///
/// Every handler checks its preconditions before touching the stack, memory or
/// storage, so an `Err` always leaves the engine exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Push attempted on a full stack.
    #[error("stack overflow")]
    StackOverflow,

    /// Not enough elements on the stack for the operation.
    #[error("stack underflow")]
    StackUnderflow,

    /// Peek or swap addressed an element of an empty stack.
    #[error("stack is empty")]
    EmptyStack,

    /// Peek or swap addressed a depth the stack does not reach.
    #[error("stack index out of range: depth {depth}, stack size {len}")]
    IndexOutOfRange { depth: usize, len: usize },

    /// PushN called with N outside 1..=32.
    #[error("invalid push size: {0}")]
    InvalidPushSize(usize),

    /// DupN called with N outside 1..=16.
    #[error("invalid dup size: {0}")]
    InvalidDupSize(usize),

    /// SwapN called with N outside 1..=16.
    #[error("invalid swap size: {0}")]
    InvalidSwapSize(usize),

    /// PushN immediate would read past the end of the code.
    #[error("push size exceeds code size: pc {pc}, push size {size}, code size {code_len}")]
    PushSizeExceedsCodeSize {
        pc: usize,
        size: usize,
        code_len: usize,
    },

    /// Memory offset or size does not fit the address space.
    #[error("invalid memory access: offset {offset}, size {size}")]
    InvalidMemoryAccess { offset: U256, size: U256 },

    /// Memory access would exceed the configured limit.
    #[error("memory limit exceeded: {requested} > {max} bytes")]
    MemoryLimitExceeded { requested: usize, max: usize },

    /// Storage key does not fit the integer key type.
    #[error("storage key out of range: {0}")]
    StorageKeyOutOfRange(U256),

    /// Byte does not decode to a supported opcode.
    #[error("invalid opcode: 0x{0:02X}")]
    InvalidOpcode(u8),
}

impl VmError {
    /// Returns true if the error comes from stack bounds or addressing.
    #[must_use]
    pub fn is_stack_error(&self) -> bool {
        matches!(
            self,
            Self::StackOverflow
                | Self::StackUnderflow
                | Self::EmptyStack
                | Self::IndexOutOfRange { .. }
        )
    }

    /// Returns true if the error signals a misuse of the N-ary handlers by the
    /// dispatch layer rather than a runtime condition.
    #[must_use]
    pub fn is_dispatch_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPushSize(_) | Self::InvalidDupSize(_) | Self::InvalidSwapSize(_)
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
