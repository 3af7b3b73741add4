//! # EVM Core - 256-bit Stack Machine Execution
//!
//! Instruction-level execution core of an Ethereum Virtual Machine: the
//! word arithmetic, the 1024-item stack, linear memory, key/value storage
//! and one handler per supported instruction.
//!
//! ## Scope
//!
//! The crate executes single instructions. Fetching, decoding and program
//! counter movement for non-PUSH opcodes belong to the embedding layer,
//! which calls a handler (or [`evm::Engine::execute`]) once per step.
//! Gas, control flow, calls and logs are not part of this crate.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Stack never exceeds 1024 items | `evm/stack.rs` - `Stack::push` |
//! | Failed instructions leave no partial effects | `evm/engine.rs` - `operands` peeks before `discard` |
//! | Reads never grow memory | `evm/memory.rs` - `Memory::load` |
//! | Only PUSH1..PUSH32 move `pc` | `evm/ops/stack.rs` - `push_n` |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Engine | `evm/engine.rs` | State owner and dispatch |
//! | Handlers | `evm/ops/` | Instruction semantics |
//! | Stack | `evm/stack.rs` | 1024-item stack |
//! | Memory | `evm/memory.rs` | Zero-extended byte memory |
//! | Storage | `evm/storage.rs` | Per-context key/value store |
//! | Opcodes | `evm/opcodes.rs` | Byte to instruction mapping |
//!
//! ## Usage Example
//!
//! ```
//! use evm_core::prelude::*;
//!
//! // PUSH1 0x02, PUSH1 0x03, ADD
//! let mut engine = Engine::new(vec![0x60, 0x02, 0x60, 0x03, 0x01]);
//! engine.push1().unwrap();
//! engine.push1().unwrap();
//! engine.execute(Opcode::Add).unwrap();
//!
//! assert_eq!(engine.stack().peek(1).unwrap(), U256::from(5));
//! assert_eq!(engine.pc(), 4);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod errors;
pub mod evm;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use primitive_types::U256;

    // Configuration
    pub use crate::config::EngineConfig;

    // Errors
    pub use crate::errors::VmError;

    // EVM components
    pub use crate::evm::{
        keccak256, word, Engine, EvmMemory, EvmStack, EvmStorage, ExecutionContext,
        ExecutionSnapshot, Memory, Opcode, Stack, Storage, StorageKey, StorageValue,
        MAX_STACK_SIZE,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
