//! # EVM Stack
//!
//! Bounded LIFO of 256-bit words. Maximum 1024 elements.
//!
//! Depths are 1-based: depth 1 is the top, depth 2 the element below it.

use crate::errors::VmError;
use primitive_types::U256;

/// Maximum EVM stack depth.
pub const MAX_STACK_SIZE: usize = 1024;

/// Stack capability used by the opcode handlers.
pub trait EvmStack {
    /// Push a value onto the stack.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the stack is full.
    fn push(&mut self, value: U256) -> Result<(), VmError>;

    /// Pop the top value.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    fn pop(&mut self) -> Result<U256, VmError>;

    /// Read the value `depth` positions from the top.
    ///
    /// # Errors
    ///
    /// Returns `EmptyStack` on an empty stack, `IndexOutOfRange` if the stack
    /// is not deep enough.
    fn peek(&self, depth: usize) -> Result<U256, VmError>;

    /// Exchange the top value with the value at `depth` (2 or more).
    ///
    /// # Errors
    ///
    /// Same policy as [`EvmStack::peek`].
    fn swap(&mut self, depth: usize) -> Result<(), VmError>;

    /// Number of elements on the stack.
    fn size(&self) -> usize;

    /// Elements from bottom to top.
    fn as_slice(&self) -> &[U256];
}

/// EVM stack implementation.
#[derive(Clone, Debug)]
pub struct Stack {
    data: Vec<U256>,
    limit: usize,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    /// Creates a new empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity_limit(MAX_STACK_SIZE)
    }

    /// Creates a new empty stack holding at most `limit` elements (never more than 1024).
    #[must_use]
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            data: Vec::with_capacity(64),
            limit: limit.min(MAX_STACK_SIZE),
        }
    }

    /// Builds a stack from values listed bottom to top.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if there are more than 1024 values.
    pub fn from_values<I>(values: I) -> Result<Self, VmError>
    where
        I: IntoIterator<Item = U256>,
    {
        let mut stack = Self::new();
        for value in values {
            stack.push(value)?;
        }
        Ok(stack)
    }

    /// Maximum number of elements this stack accepts.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns true if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Vector index of the element at `depth`.
    fn index_of(&self, depth: usize) -> Result<usize, VmError> {
        let len = self.data.len();
        if len == 0 {
            return Err(VmError::EmptyStack);
        }
        if depth == 0 || depth > len {
            return Err(VmError::IndexOutOfRange { depth, len });
        }
        Ok(len - depth)
    }
}

impl EvmStack for Stack {
    fn push(&mut self, value: U256) -> Result<(), VmError> {
        if self.data.len() >= self.limit {
            return Err(VmError::StackOverflow);
        }
        self.data.push(value);
        Ok(())
    }

    fn pop(&mut self) -> Result<U256, VmError> {
        self.data.pop().ok_or(VmError::StackUnderflow)
    }

    fn peek(&self, depth: usize) -> Result<U256, VmError> {
        let index = self.index_of(depth)?;
        Ok(self.data[index])
    }

    fn swap(&mut self, depth: usize) -> Result<(), VmError> {
        let index = self.index_of(depth)?;
        if depth < 2 {
            return Err(VmError::IndexOutOfRange {
                depth,
                len: self.data.len(),
            });
        }
        let top = self.data.len() - 1;
        self.data.swap(top, index);
        Ok(())
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn as_slice(&self) -> &[U256] {
        &self.data
    }
}

// =============================================================================
// TESTS
// =============================================================================
