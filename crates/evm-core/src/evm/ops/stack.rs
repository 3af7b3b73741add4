//! Stack instructions: POP, PUSH0, PUSH1-32, DUP1-16, SWAP1-16.
//!
//! Each N-ary family has one parameterized handler (`push_n`, `dup_n`,
//! `swap_n`) plus a named method per member.

use crate::errors::VmError;
use crate::evm::engine::Engine;
use crate::evm::memory::EvmMemory;
use crate::evm::stack::EvmStack;
use crate::evm::storage::EvmStorage;
use crate::evm::word::{self, WORD_SIZE};
use primitive_types::U256;
use tracing::trace;

/// Number of DUP and SWAP variants.
pub const MAX_DUP_SWAP_DEPTH: usize = 16;

/// Expands to one named handler per family member, each forwarding to the
/// parameterized handler with its fixed size.
macro_rules! fixed_size_handlers {
    ($family:ident, $label:literal, $($name:ident => $n:literal),* $(,)?) => {
        $(
            #[doc = concat!($label, stringify!($n), ".")]
            ///
            /// # Errors
            ///
            #[doc = concat!("See [`Engine::", stringify!($family), "`].")]
            pub fn $name(&mut self) -> Result<(), VmError> {
                self.$family($n)
            }
        )*
    };
}

impl<S, M, K> Engine<S, M, K>
where
    S: EvmStack,
    M: EvmMemory,
    K: EvmStorage,
{
    /// POP: discard the top value.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` on an empty stack.
    pub fn pop(&mut self) -> Result<(), VmError> {
        self.stack.pop().map(drop)
    }

    /// PUSH0: push zero. Reads no code and leaves `pc` alone.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` on a full stack.
    pub fn push0(&mut self) -> Result<(), VmError> {
        self.stack.push(U256::zero())
    }

    /// PUSHn: push the `n` code bytes after `pc` as a big-endian word, then
    /// move `pc` past them.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPushSize` for `n` outside 1..=32,
    /// `PushSizeExceedsCodeSize` if the code ends early, or `StackOverflow`.
    /// `pc` only moves on success.
    pub fn push_n(&mut self, n: usize) -> Result<(), VmError> {
        if !(1..=WORD_SIZE).contains(&n) {
            return Err(VmError::InvalidPushSize(n));
        }
        let pc = self.context.pc();
        let value = match self.context.immediate(n) {
            Some(bytes) => word::from_be_slice(bytes),
            None => {
                return Err(VmError::PushSizeExceedsCodeSize {
                    pc,
                    size: n,
                    code_len: self.context.code().len(),
                })
            }
        };
        self.stack.push(value)?;
        self.context.advance(n + 1);
        trace!(pc, size = n, %value, "push");
        Ok(())
    }

    /// DUPn: push a copy of the value at depth `n`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDupSize` for `n` outside 1..=16, `EmptyStack` /
    /// `IndexOutOfRange` if depth `n` does not exist, or `StackOverflow`.
    pub fn dup_n(&mut self, n: usize) -> Result<(), VmError> {
        if !(1..=MAX_DUP_SWAP_DEPTH).contains(&n) {
            return Err(VmError::InvalidDupSize(n));
        }
        let value = self.stack.peek(n)?;
        self.stack.push(value)
    }

    /// SWAPn: exchange the top with the value at depth `n + 1`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSwapSize` for `n` outside 1..=16, or `EmptyStack` /
    /// `IndexOutOfRange` if depth `n + 1` does not exist.
    pub fn swap_n(&mut self, n: usize) -> Result<(), VmError> {
        if !(1..=MAX_DUP_SWAP_DEPTH).contains(&n) {
            return Err(VmError::InvalidSwapSize(n));
        }
        self.stack.swap(n + 1)
    }

    fixed_size_handlers!(push_n, "PUSH",
        push1 => 1, push2 => 2, push3 => 3, push4 => 4,
        push5 => 5, push6 => 6, push7 => 7, push8 => 8,
        push9 => 9, push10 => 10, push11 => 11, push12 => 12,
        push13 => 13, push14 => 14, push15 => 15, push16 => 16,
        push17 => 17, push18 => 18, push19 => 19, push20 => 20,
        push21 => 21, push22 => 22, push23 => 23, push24 => 24,
        push25 => 25, push26 => 26, push27 => 27, push28 => 28,
        push29 => 29, push30 => 30, push31 => 31, push32 => 32,
    );

    fixed_size_handlers!(dup_n, "DUP",
        dup1 => 1, dup2 => 2, dup3 => 3, dup4 => 4,
        dup5 => 5, dup6 => 6, dup7 => 7, dup8 => 8,
        dup9 => 9, dup10 => 10, dup11 => 11, dup12 => 12,
        dup13 => 13, dup14 => 14, dup15 => 15, dup16 => 16,
    );

    fixed_size_handlers!(swap_n, "SWAP",
        swap1 => 1, swap2 => 2, swap3 => 3, swap4 => 4,
        swap5 => 5, swap6 => 6, swap7 => 7, swap8 => 8,
        swap9 => 9, swap10 => 10, swap11 => 11, swap12 => 12,
        swap13 => 13, swap14 => 14, swap15 => 15, swap16 => 16,
    );
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::errors::VmError;
    use crate::evm::engine::test_helpers::{engine_with_stack, stack_values};
    use crate::evm::engine::Engine;
    use crate::evm::stack::EvmStack;
    use primitive_types::U256;

    #[test]
    fn test_pop() {
        let mut engine = engine_with_stack(&[1, 2]);
        engine.pop().unwrap();
        assert_eq!(stack_values(&engine), vec![1]);
        engine.pop().unwrap();
        assert_eq!(engine.pop(), Err(VmError::StackUnderflow));
        assert_eq!(engine.stack().size(), 0);
    }

    #[test]
    fn test_push0_ignores_code() {
        let mut engine = engine_with_stack(&[]);
        engine.push0().unwrap();
        assert_eq!(stack_values(&engine), vec![0]);
        assert_eq!(engine.pc(), 0);
    }

    #[test]
    fn test_push1() {
        let mut engine = Engine::new(vec![0x60, 0x11]);
        engine.push1().unwrap();
        assert_eq!(stack_values(&engine), vec![0x11]);
        assert_eq!(engine.pc(), 2);
    }

    #[test]
    fn test_push_sequence_advances_pc() {
        let mut engine = Engine::new(vec![0x60, 0x01, 0x61, 0x02, 0x03]);
        engine.push1().unwrap();
        engine.push2().unwrap();
        assert_eq!(stack_values(&engine), vec![0x01, 0x0203]);
        assert_eq!(engine.pc(), 5);
    }

    #[test]
    fn test_push32() {
        let mut code = vec![0x7F];
        code.extend([0xFF; 32]);
        let mut engine = Engine::new(code);
        engine.push32().unwrap();
        assert_eq!(engine.stack().peek(1).unwrap(), U256::MAX);
        assert_eq!(engine.pc(), 33);
    }

    #[test]
    fn test_push_exact_remaining_bytes() {
        let mut engine = Engine::new(vec![0x62, 0xAA, 0xBB, 0xCC]);
        engine.push3().unwrap();
        assert_eq!(stack_values(&engine), vec![0xAABBCC]);
        assert_eq!(engine.pc(), 4);
    }

    #[test]
    fn test_push_past_code_end() {
        let mut engine = Engine::new(vec![0x61, 0x01]);
        assert_eq!(
            engine.push2(),
            Err(VmError::PushSizeExceedsCodeSize {
                pc: 0,
                size: 2,
                code_len: 2
            })
        );
        assert_eq!(engine.pc(), 0);
        assert_eq!(engine.stack().size(), 0);
    }

    #[test]
    fn test_push_overflow_keeps_pc() {
        let mut engine = Engine::new(vec![0x60, 0x01]);
        for _ in 0..1024 {
            engine.push0().unwrap();
        }
        assert_eq!(engine.push0(), Err(VmError::StackOverflow));
        assert_eq!(engine.push1(), Err(VmError::StackOverflow));
        assert_eq!(engine.pc(), 0);
        assert_eq!(engine.stack().size(), 1024);
    }

    #[test]
    fn test_invalid_sizes() {
        let mut engine = engine_with_stack(&[1, 2]);
        assert_eq!(engine.push_n(0), Err(VmError::InvalidPushSize(0)));
        assert_eq!(engine.push_n(33), Err(VmError::InvalidPushSize(33)));
        assert_eq!(engine.dup_n(0), Err(VmError::InvalidDupSize(0)));
        assert_eq!(engine.dup_n(17), Err(VmError::InvalidDupSize(17)));
        assert_eq!(engine.swap_n(0), Err(VmError::InvalidSwapSize(0)));
        assert_eq!(engine.swap_n(17), Err(VmError::InvalidSwapSize(17)));
        assert_eq!(stack_values(&engine), vec![1, 2]);
    }

    #[test]
    fn test_dup() {
        let mut engine = engine_with_stack(&[1, 2, 3]);
        engine.dup1().unwrap();
        assert_eq!(stack_values(&engine), vec![1, 2, 3, 3]);

        let mut engine = engine_with_stack(&[1, 2, 3]);
        engine.dup3().unwrap();
        assert_eq!(stack_values(&engine), vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_dup_missing_depth() {
        let mut engine = engine_with_stack(&[]);
        assert_eq!(engine.dup1(), Err(VmError::EmptyStack));

        let mut engine = engine_with_stack(&[1, 2]);
        assert_eq!(
            engine.dup3(),
            Err(VmError::IndexOutOfRange { depth: 3, len: 2 })
        );
        assert_eq!(stack_values(&engine), vec![1, 2]);
    }

    #[test]
    fn test_dup16() {
        let values: Vec<u64> = (1..=16).collect();
        let mut engine = engine_with_stack(&values);
        engine.dup16().unwrap();
        assert_eq!(engine.stack().size(), 17);
        assert_eq!(engine.stack().peek(1).unwrap(), U256::one());
    }

    #[test]
    fn test_swap() {
        let mut engine = engine_with_stack(&[1, 2, 3, 4]);
        engine.swap1().unwrap();
        assert_eq!(stack_values(&engine), vec![1, 2, 4, 3]);

        let mut engine = engine_with_stack(&[1, 2, 3, 4]);
        engine.swap3().unwrap();
        assert_eq!(stack_values(&engine), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_swap_missing_depth() {
        let mut engine = engine_with_stack(&[]);
        assert_eq!(engine.swap1(), Err(VmError::EmptyStack));

        let mut engine = engine_with_stack(&[1]);
        assert_eq!(
            engine.swap1(),
            Err(VmError::IndexOutOfRange { depth: 2, len: 1 })
        );

        let values: Vec<u64> = (1..=16).collect();
        let mut engine = engine_with_stack(&values);
        assert!(engine.swap16().is_err());
        engine.push0().unwrap();
        engine.swap16().unwrap();
        assert_eq!(engine.stack().peek(1).unwrap(), U256::one());
        assert_eq!(engine.stack().peek(17).unwrap(), U256::zero());
    }
}
