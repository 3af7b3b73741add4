//! Arithmetic instructions (0x01 - 0x0B).
//!
//! Stack picture `[x, y, ...]` with `x` on top: `Sub` computes `x - y`.

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
    /// ADD: `[x, y] -> [x + y]`, wrapping.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn add(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| x.overflowing_add(y).0)
    }

    /// MUL: `[x, y] -> [x * y]`, wrapping.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn mul(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| x.overflowing_mul(y).0)
    }

    /// SUB: `[x, y] -> [x - y]`, wrapping.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn sub(&mut self) -> Result<(), VmError> {
        self.apply_binary(|x, y| x.overflowing_sub(y).0)
    }

    /// DIV: `[x, y] -> [x / y]`, zero when `y == 0`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn div(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::div)
    }

    /// SDIV: signed truncated division.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn sdiv(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::signed_div)
    }

    /// MOD: `[x, y] -> [x % y]`, zero when `y == 0`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn modulo(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::rem)
    }

    /// SMOD: signed remainder, sign of `x`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn smod(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::signed_mod)
    }

    /// ADDMOD: `[x, y, m] -> [(x + y) % m]`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than three operands.
    pub fn addmod(&mut self) -> Result<(), VmError> {
        self.apply_ternary(word::add_mod)
    }

    /// MULMOD: `[x, y, m] -> [(x * y) % m]`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than three operands.
    pub fn mulmod(&mut self) -> Result<(), VmError> {
        self.apply_ternary(word::mul_mod)
    }

    /// EXP: `[x, y] -> [x ** y]`, wrapping.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn exp(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::exp)
    }

    /// SIGNEXTEND: `[x, b] -> [x sign-extended from byte b]`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` with fewer than two operands.
    pub fn signextend(&mut self) -> Result<(), VmError> {
        self.apply_binary(word::sign_extend)
    }
}

// =============================================================================
// TESTS
// =============================================================================
