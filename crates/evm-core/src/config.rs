//! # Engine Configuration
//!
//! Execution limits applied by the [`Engine`](crate::evm::Engine).

use crate::evm::stack::MAX_STACK_SIZE;
use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Memory is unbounded by default; an embedding layer that models
/// gas-limited growth sets `max_memory_size`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum stack size (default and hard ceiling: 1024).
    pub max_stack_size: usize,
    /// Maximum addressable memory in bytes (default: unbounded).
    pub max_memory_size: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_stack_size: MAX_STACK_SIZE,
            max_memory_size: None,
        }
    }
}

impl EngineConfig {
    /// Sets the stack limit. Values above 1024 are clamped.
    #[must_use]
    pub fn with_max_stack_size(mut self, size: usize) -> Self {
        self.max_stack_size = size.min(MAX_STACK_SIZE);
        self
    }

    /// Bounds memory to `size` bytes.
    #[must_use]
    pub fn with_max_memory_size(mut self, size: usize) -> Self {
        self.max_memory_size = Some(size);
        self
    }

    /// Stack limit actually enforced.
    #[must_use]
    pub fn stack_limit(&self) -> usize {
        self.max_stack_size.min(MAX_STACK_SIZE)
    }
}

// =============================================================================
// TESTS
// =============================================================================
