//! # Instruction Handlers
//!
//! One `impl Engine` block per instruction family. Every handler validates
//! all operands before mutating anything.

mod arithmetic;
mod bitwise;
mod hashing;
mod memory;
mod stack;
mod storage;

pub use hashing::keccak256;
pub use stack::MAX_DUP_SWAP_DEPTH;
