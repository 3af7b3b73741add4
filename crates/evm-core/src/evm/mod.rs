//! # EVM Implementation
//!
//! Execution state and instruction handlers of the stack machine.
//!
//! ## Components
//!
//! - `word.rs` - 256-bit word helpers (signed view, modular and bit ops)
//! - `stack.rs` - 1024-item stack
//! - `memory.rs` - Byte-addressable linear memory
//! - `storage.rs` - Key/value contract storage
//! - `context.rs` - Code and program counter
//! - `opcodes.rs` - Opcode definitions
//! - `engine.rs` - Execution engine and dispatch
//! - `ops/` - Instruction handlers, one module per family

pub mod context;
pub mod engine;
pub mod memory;
pub mod opcodes;
pub mod ops;
pub mod stack;
pub mod storage;
pub mod word;

pub use context::*;
pub use engine::*;
pub use memory::*;
pub use opcodes::*;
pub use ops::*;
pub use stack::*;
pub use storage::*;
