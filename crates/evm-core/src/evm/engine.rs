//! # Execution Engine
//!
//! Owns the stack, memory, storage and execution context of one execution
//! and exposes one method per instruction. Handlers live in [`super::ops`].
//!
//! There is no fetch-decode loop here: the embedding caller picks the next
//! instruction and calls either the handler directly or [`Engine::execute`].

use crate::config::EngineConfig;
use crate::errors::VmError;
use crate::evm::context::ExecutionContext;
use crate::evm::memory::{EvmMemory, Memory};
use crate::evm::opcodes::Opcode;
use crate::evm::stack::{EvmStack, Stack};
use crate::evm::storage::{EvmStorage, Storage, StorageKey, StorageValue};
use crate::evm::word;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Machine state exported after (or injected before) a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSnapshot {
    /// Program counter.
    pub pc: usize,
    /// Stack, bottom to top.
    pub stack: Vec<U256>,
    /// Memory contents.
    pub memory: Vec<u8>,
    /// Written storage slots.
    pub storage: BTreeMap<StorageKey, StorageValue>,
}

/// EVM execution engine.
#[derive(Debug)]
pub struct Engine<S = Stack, M = Memory, K = Storage>
where
    S: EvmStack,
    M: EvmMemory,
    K: EvmStorage,
{
    pub(crate) stack: S,
    pub(crate) memory: M,
    pub(crate) storage: K,
    pub(crate) context: ExecutionContext,
    pub(crate) config: EngineConfig,
}

impl Engine {
    /// Create an engine over `code` with empty state.
    #[must_use]
    pub fn new(code: Vec<u8>) -> Self {
        Self::with_config(code, EngineConfig::default())
    }

    /// Create an engine with explicit limits.
    #[must_use]
    pub fn with_config(code: Vec<u8>, config: EngineConfig) -> Self {
        let stack = Stack::with_capacity_limit(config.stack_limit());
        Self::with_parts(code, stack, Memory::new(), Storage::new(), config)
    }

    /// Create an engine starting from existing storage.
    #[must_use]
    pub fn with_storage(code: Vec<u8>, storage: Storage) -> Self {
        let config = EngineConfig::default();
        let stack = Stack::with_capacity_limit(config.stack_limit());
        Self::with_parts(code, stack, Memory::new(), storage, config)
    }

    /// Rebuild an engine from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the snapshot stack exceeds the configured limit.
    pub fn from_snapshot(
        code: Vec<u8>,
        snapshot: ExecutionSnapshot,
        config: EngineConfig,
    ) -> Result<Self, VmError> {
        let mut stack = Stack::with_capacity_limit(config.stack_limit());
        for value in snapshot.stack {
            stack.push(value)?;
        }
        let mut engine = Self::with_parts(
            code,
            stack,
            Memory::from_bytes(snapshot.memory),
            snapshot.storage.into_iter().collect(),
            config,
        );
        engine.context.set_pc(snapshot.pc);
        Ok(engine)
    }
}

impl<S, M, K> Engine<S, M, K>
where
    S: EvmStack,
    M: EvmMemory,
    K: EvmStorage,
{
    /// Create an engine from caller-supplied components.
    pub fn with_parts(
        code: Vec<u8>,
        stack: S,
        memory: M,
        storage: K,
        config: EngineConfig,
    ) -> Self {
        Self {
            stack,
            memory,
            storage,
            context: ExecutionContext::new(code),
            config,
        }
    }

    /// The stack.
    #[must_use]
    pub fn stack(&self) -> &S {
        &self.stack
    }

    /// Mutable stack access for the embedding layer.
    pub fn stack_mut(&mut self) -> &mut S {
        &mut self.stack
    }

    /// The memory.
    #[must_use]
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable memory access for the embedding layer.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// The storage.
    #[must_use]
    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// Mutable storage access for the embedding layer.
    pub fn storage_mut(&mut self) -> &mut K {
        &mut self.storage
    }

    /// Code and program counter.
    #[must_use]
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Mutable context access (the dispatch loop moves `pc` for non-push opcodes).
    pub fn context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.context
    }

    /// Program counter.
    #[must_use]
    pub fn pc(&self) -> usize {
        self.context.pc()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Copy of the full machine state.
    #[must_use]
    pub fn snapshot(&self) -> ExecutionSnapshot {
        ExecutionSnapshot {
            pc: self.context.pc(),
            stack: self.stack.as_slice().to_vec(),
            memory: self.memory.as_slice().to_vec(),
            storage: self.storage.entries(),
        }
    }

    /// Execute a single instruction.
    ///
    /// Only PUSH1..PUSH32 touch the program counter.
    ///
    /// # Errors
    ///
    /// Returns whatever the handler returns; state is untouched on error.
    pub fn execute(&mut self, opcode: Opcode) -> Result<(), VmError> {
        trace!(
            opcode = %opcode,
            pc = self.context.pc(),
            stack_size = self.stack.size(),
            "executing"
        );

        let result = match opcode {
            // =================================================================
            // ARITHMETIC
            // =================================================================
            Opcode::Add => self.add(),
            Opcode::Mul => self.mul(),
            Opcode::Sub => self.sub(),
            Opcode::Div => self.div(),
            Opcode::SDiv => self.sdiv(),
            Opcode::Mod => self.modulo(),
            Opcode::SMod => self.smod(),
            Opcode::AddMod => self.addmod(),
            Opcode::MulMod => self.mulmod(),
            Opcode::Exp => self.exp(),
            Opcode::SignExtend => self.signextend(),

            // =================================================================
            // COMPARISON & BITWISE
            // =================================================================
            Opcode::Lt => self.lt(),
            Opcode::Gt => self.gt(),
            Opcode::SLt => self.slt(),
            Opcode::SGt => self.sgt(),
            Opcode::Eq => self.eq(),
            Opcode::IsZero => self.iszero(),
            Opcode::And => self.and(),
            Opcode::Or => self.or(),
            Opcode::Xor => self.xor(),
            Opcode::Not => self.not(),
            Opcode::Byte => self.byte(),
            Opcode::Shl => self.shl(),
            Opcode::Shr => self.shr(),
            Opcode::Sar => self.sar(),

            // =================================================================
            // KECCAK256
            // =================================================================
            Opcode::Keccak256 => self.keccak256(),

            // =================================================================
            // MEMORY & STORAGE
            // =================================================================
            Opcode::MLoad => self.mload(),
            Opcode::MStore => self.mstore(),
            Opcode::MStore8 => self.mstore8(),
            Opcode::MSize => self.msize(),
            Opcode::SLoad => self.sload(),
            Opcode::SStore => self.sstore(),

            // =================================================================
            // STACK
            // =================================================================
            Opcode::Pop => self.pop(),
            Opcode::Push0 => self.push0(),

            Opcode::Push1
            | Opcode::Push2
            | Opcode::Push3
            | Opcode::Push4
            | Opcode::Push5
            | Opcode::Push6
            | Opcode::Push7
            | Opcode::Push8
            | Opcode::Push9
            | Opcode::Push10
            | Opcode::Push11
            | Opcode::Push12
            | Opcode::Push13
            | Opcode::Push14
            | Opcode::Push15
            | Opcode::Push16
            | Opcode::Push17
            | Opcode::Push18
            | Opcode::Push19
            | Opcode::Push20
            | Opcode::Push21
            | Opcode::Push22
            | Opcode::Push23
            | Opcode::Push24
            | Opcode::Push25
            | Opcode::Push26
            | Opcode::Push27
            | Opcode::Push28
            | Opcode::Push29
            | Opcode::Push30
            | Opcode::Push31
            | Opcode::Push32 => {
                family_size(opcode, opcode.push_size()).and_then(|n| self.push_n(n))
            }

            Opcode::Dup1
            | Opcode::Dup2
            | Opcode::Dup3
            | Opcode::Dup4
            | Opcode::Dup5
            | Opcode::Dup6
            | Opcode::Dup7
            | Opcode::Dup8
            | Opcode::Dup9
            | Opcode::Dup10
            | Opcode::Dup11
            | Opcode::Dup12
            | Opcode::Dup13
            | Opcode::Dup14
            | Opcode::Dup15
            | Opcode::Dup16 => {
                family_size(opcode, opcode.dup_depth()).and_then(|n| self.dup_n(n))
            }

            Opcode::Swap1
            | Opcode::Swap2
            | Opcode::Swap3
            | Opcode::Swap4
            | Opcode::Swap5
            | Opcode::Swap6
            | Opcode::Swap7
            | Opcode::Swap8
            | Opcode::Swap9
            | Opcode::Swap10
            | Opcode::Swap11
            | Opcode::Swap12
            | Opcode::Swap13
            | Opcode::Swap14
            | Opcode::Swap15
            | Opcode::Swap16 => {
                family_size(opcode, opcode.swap_depth()).and_then(|n| self.swap_n(n))
            }
        };

        if let Err(err) = &result {
            debug!(opcode = %opcode, pc = self.context.pc(), error = %err, "instruction failed");
        }
        result
    }

    /// Decode `byte` and execute it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOpcode` for bytes this core does not handle.
    pub fn execute_byte(&mut self, byte: u8) -> Result<(), VmError> {
        let opcode = Opcode::try_from(byte)?;
        self.execute(opcode)
    }

    // =========================================================================
    // OPERAND HELPERS
    // =========================================================================

    /// Top `N` stack values without removing them, top first.
    ///
    /// A stack holding exactly `N` values is enough.
    pub(crate) fn operands<const N: usize>(&self) -> Result<[U256; N], VmError> {
        if self.stack.size() < N {
            return Err(VmError::StackUnderflow);
        }
        let mut operands = [U256::zero(); N];
        for (i, slot) in operands.iter_mut().enumerate() {
            *slot = self.stack.peek(i + 1)?;
        }
        Ok(operands)
    }

    /// Remove the top `count` values. Callers check the size first.
    pub(crate) fn discard(&mut self, count: usize) -> Result<(), VmError> {
        for _ in 0..count {
            self.stack.pop()?;
        }
        Ok(())
    }

    /// Pop the top `N` values, top first, or nothing at all.
    pub(crate) fn pop_operands<const N: usize>(&mut self) -> Result<[U256; N], VmError> {
        let operands = self.operands::<N>()?;
        self.discard(N)?;
        Ok(operands)
    }

    /// Pop one operand and push `op(x)`.
    pub(crate) fn apply_unary(&mut self, op: impl FnOnce(U256) -> U256) -> Result<(), VmError> {
        let [x] = self.pop_operands()?;
        self.stack.push(op(x))
    }

    /// Pop `[x, y]` and push `op(x, y)`.
    pub(crate) fn apply_binary(
        &mut self,
        op: impl FnOnce(U256, U256) -> U256,
    ) -> Result<(), VmError> {
        let [x, y] = self.pop_operands()?;
        self.stack.push(op(x, y))
    }

    /// Pop `[x, y, z]` and push `op(x, y, z)`.
    pub(crate) fn apply_ternary(
        &mut self,
        op: impl FnOnce(U256, U256, U256) -> U256,
    ) -> Result<(), VmError> {
        let [x, y, z] = self.pop_operands()?;
        self.stack.push(op(x, y, z))
    }

    /// Validate a range an instruction is about to write.
    ///
    /// Returns `(offset, size)`. Zero-sized ranges never touch memory, so their
    /// offset is not checked and comes back as 0.
    pub(crate) fn write_range(&self, offset: U256, size: U256) -> Result<(usize, usize), VmError> {
        let invalid = || VmError::InvalidMemoryAccess { offset, size };
        let len = word::to_usize(size).ok_or_else(invalid)?;
        if len == 0 {
            return Ok((0, 0));
        }
        let start = word::to_usize(offset).ok_or_else(invalid)?;
        let end = start.checked_add(len).ok_or_else(invalid)?;
        if let Some(max) = self.config.max_memory_size {
            if end > max {
                return Err(VmError::MemoryLimitExceeded {
                    requested: end,
                    max,
                });
            }
        }
        Ok((start, len))
    }

    /// Validate a range an instruction is about to read.
    ///
    /// Reads never grow memory, so only `size` has to be addressable. An
    /// offset beyond `usize` is clamped to `usize::MAX`, which lies past the
    /// end of any memory and reads as zeros.
    pub(crate) fn read_range(&self, offset: U256, size: U256) -> Result<(usize, usize), VmError> {
        let len = word::to_usize(size).ok_or(VmError::InvalidMemoryAccess { offset, size })?;
        if len == 0 {
            return Ok((0, 0));
        }
        let start = word::to_usize(offset).unwrap_or(usize::MAX);
        Ok((start, len))
    }
}

/// Size carried by a PUSH/DUP/SWAP opcode.
fn family_size(opcode: Opcode, size: Option<usize>) -> Result<usize, VmError> {
    size.ok_or(VmError::InvalidOpcode(opcode.as_byte()))
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// TESTS
// =============================================================================
