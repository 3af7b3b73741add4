//! Comparison and bitwise instructions (0x10 - 0x1D).
//!
//! Comparisons push 1 for true and 0 for false. For BYTE and the shifts
//! the index or shift amount is the top operand.

use crate::errors::VmError;
use crate::evm::engine::Engine;
use crate::evm::memory::EvmMemory;
use crate::evm::stack::EvmStack;
use crate::evm::storage::EvmStorage;
use crate::evm::word;

impl<S, M, K> Engine<S, M, K>
where
    S: EvmStack,
    M: EvmMemory,
    K: EvmStorage,
{
    /// LT: `[x, y] -> [x < y]`, unsigned.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn lt(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| word::from_bool(x < y))
    }

    /// GT: `[x, y] -> [x > y]`, unsigned.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn gt(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| word::from_bool(x > y))
    }

    /// SLT: `[x, y] -> [x < y]`, two's complement.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn slt(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| word::from_bool(word::signed_lt(x, y)))
    }

    /// SGT: `[x, y] -> [x > y]`, two's complement.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn sgt(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| word::from_bool(word::signed_lt(y, x)))
    }

    /// EQ: `[x, y] -> [x == y]`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn eq(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| word::from_bool(x == y))
    }

    /// ISZERO: `[x] -> [x == 0]`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` on an empty stack.
    pub fn iszero(&mut self) -> Result<(), VmError> {
        self.apply_unary(|x| word::from_bool(x.is_zero()))
    }

    /// AND
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn and(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| x & y)
    }

    /// OR
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn or(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| x | y)
    }

    /// XOR
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn xor(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| x ^ y)
    }

    /// NOT: bitwise complement.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` on an empty stack.
    pub fn not(&mut self) -> Result<(), VmError> {
        self.apply_unary(|x| !x)
    }

    /// BYTE: `[i, x] -> [byte i of x]`, index 0 being the most significant.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn byte(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::byte_at)
    }

    /// SHL: `[shift, value] -> [value << shift]`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn shl(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::shl)
    }

    /// SHR: `[shift, value] -> [value >> shift]`, logical.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn shr(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::shr)
    }

    /// SAR: `[shift, value] -> [value >> shift]`, sign-filling.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn sar(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::sar)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::errors::VmError;
    use crate::evm::engine::test_helpers::{engine_with_stack, stack_values};
    use crate::evm::stack::EvmStack;
    use crate::evm::word;
    use primitive_types::U256;

    fn minus_one_under(top: u64) -> crate::evm::engine::Engine {
        let mut engine = engine_with_stack(&[]);
        engine.stack_mut().push(U256::MAX).unwrap();
        engine.stack_mut().push(U256::from(top)).unwrap();
        engine
    }

    #[test]
    fn test_lt_gt() {
        let mut engine = engine_with_stack(&[1, 3, 2]);
        engine.lt().unwrap();
        assert_eq!(stack_values(&engine), vec![1, 1]);

        let mut engine = engine_with_stack(&[1, 3, 2]);
        engine.gt().unwrap();
        assert_eq!(stack_values(&engine), vec![1, 0]);

        let mut engine = engine_with_stack(&[2, 2]);
        engine.lt().unwrap();
        assert_eq!(stack_values(&engine), vec![0]);
    }

    #[test]
    fn test_slt_sgt_treat_max_as_minus_one() {
        // Unsigned, 1 < MAX; signed, 1 > -1.
        let mut engine = minus_one_under(1);
        engine.lt().unwrap();
        assert_eq!(stack_values(&engine), vec![1]);

        let mut engine = minus_one_under(1);
        engine.slt().unwrap();
        assert_eq!(stack_values(&engine), vec![0]);

        let mut engine = minus_one_under(1);
        engine.sgt().unwrap();
        assert_eq!(stack_values(&engine), vec![1]);
    }

    #[test]
    fn test_eq_iszero() {
        let mut engine = engine_with_stack(&[7, 7]);
        engine.eq().unwrap();
        assert_eq!(stack_values(&engine), vec![1]);

        let mut engine = engine_with_stack(&[7, 8]);
        engine.eq().unwrap();
        assert_eq!(stack_values(&engine), vec![0]);

        let mut engine = engine_with_stack(&[5, 0]);
        engine.iszero().unwrap();
        assert_eq!(stack_values(&engine), vec![5, 1]);
        engine.iszero().unwrap();
        assert_eq!(stack_values(&engine), vec![5, 0]);
    }

    #[test]
    fn test_and_or_xor() {
        let mut engine = engine_with_stack(&[0b1100, 0b1010]);
        engine.and().unwrap();
        assert_eq!(stack_values(&engine), vec![0b1000]);

        let mut engine = engine_with_stack(&[0b1100, 0b1010]);
        engine.or().unwrap();
        assert_eq!(stack_values(&engine), vec![0b1110]);

        let mut engine = engine_with_stack(&[0b1100, 0b1010]);
        engine.xor().unwrap();
        assert_eq!(stack_values(&engine), vec![0b0110]);
    }

    #[test]
    fn test_not() {
        let mut engine = engine_with_stack(&[0]);
        engine.not().unwrap();
        assert_eq!(engine.stack().peek(1).unwrap(), U256::MAX);
        engine.not().unwrap();
        assert_eq!(stack_values(&engine), vec![0]);
    }

    #[test]
    fn test_byte() {
        // Index on top, value below.
        let mut engine = engine_with_stack(&[0xABCD, 31]);
        engine.byte().unwrap();
        assert_eq!(stack_values(&engine), vec![0xCD]);

        let mut engine = engine_with_stack(&[0xABCD, 30]);
        engine.byte().unwrap();
        assert_eq!(stack_values(&engine), vec![0xAB]);

        let mut engine = engine_with_stack(&[0xABCD, 32]);
        engine.byte().unwrap();
        assert_eq!(stack_values(&engine), vec![0]);
    }

    #[test]
    fn test_shifts() {
        let mut engine = engine_with_stack(&[1, 4]);
        engine.shl().unwrap();
        assert_eq!(stack_values(&engine), vec![16]);

        let mut engine = engine_with_stack(&[16, 4]);
        engine.shr().unwrap();
        assert_eq!(stack_values(&engine), vec![1]);

        let mut engine = engine_with_stack(&[1, 256]);
        engine.shl().unwrap();
        assert_eq!(stack_values(&engine), vec![0]);
    }

    #[test]
    fn test_sar_keeps_sign() {
        let mut engine = engine_with_stack(&[]);
        engine.stack_mut().push(word::from_i64(-16)).unwrap();
        engine.stack_mut().push(U256::from(2)).unwrap();
        engine.sar().unwrap();
        assert_eq!(engine.stack().peek(1).unwrap(), word::from_i64(-4));

        let mut engine = minus_one_under(300);
        engine.sar().unwrap();
        assert_eq!(engine.stack().peek(1).unwrap(), U256::MAX);

        let mut engine = minus_one_under(300);
        engine.shr().unwrap();
        assert_eq!(stack_values(&engine), vec![0]);
    }

    #[test]
    fn test_underflow() {
        let mut engine = engine_with_stack(&[]);
        assert_eq!(engine.iszero(), Err(VmError::StackUnderflow));
        assert_eq!(engine.not(), Err(VmError::StackUnderflow));

        let mut engine = engine_with_stack(&[9]);
        assert_eq!(engine.lt(), Err(VmError::StackUnderflow));
        assert_eq!(engine.byte(), Err(VmError::StackUnderflow));
        assert_eq!(engine.sar(), Err(VmError::StackUnderflow));
        assert_eq!(stack_values(&engine), vec![9]);
    }
}
