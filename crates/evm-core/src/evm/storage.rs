//! # Contract Storage
//!
//! Flat key/value storage local to one execution context.
//! Unknown keys read as the zero word.

use crate::evm::word::WORD_SIZE;
use std::collections::{BTreeMap, HashMap};

/// Storage key. A plain integer rather than a full word.
pub type StorageKey = u64;

/// Storage value (32 bytes).
pub type StorageValue = [u8; WORD_SIZE];

/// Storage capability used by the opcode handlers.
pub trait EvmStorage {
    /// Write `value` at `key`, replacing any previous value.
    fn store(&mut self, key: StorageKey, value: StorageValue);

    /// Read the value at `key`; zero if never written.
    fn load(&self, key: StorageKey) -> StorageValue;

    /// All written slots, ordered by key.
    fn entries(&self) -> BTreeMap<StorageKey, StorageValue>;
}

/// In-memory storage backed by a hash map.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Storage {
    data: HashMap<StorageKey, StorageValue>,
}

impl Storage {
    /// Creates a new empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Number of written slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.data.len()
    }
}

impl EvmStorage for Storage {
    fn store(&mut self, key: StorageKey, value: StorageValue) {
        self.data.insert(key, value);
    }

    fn load(&self, key: StorageKey) -> StorageValue {
        self.data.get(&key).copied().unwrap_or_default()
    }

    fn entries(&self) -> BTreeMap<StorageKey, StorageValue> {
        self.data.iter().map(|(k, v)| (*k, *v)).collect()
    }
}

impl FromIterator<(StorageKey, StorageValue)> for Storage {
    fn from_iter<I: IntoIterator<Item = (StorageKey, StorageValue)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
