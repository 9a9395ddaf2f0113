//! In-process storage adapter.
//!
//! Clones share the same entries, so a store can be dropped and reopened over
//! the same data within one process.

use crate::domain::error::JournalError;
use crate::ports::storage_port::StoragePort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorageAdapter {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StoragePort for MemoryStorageAdapter {
    fn read(&self, key: &str) -> Result<Option<String>, JournalError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), JournalError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
