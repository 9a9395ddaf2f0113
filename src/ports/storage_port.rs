//! Durable key/value storage port.
//!
//! The journal keeps its whole trade log in a single entry, so the port is a
//! plain string-to-string store in the shape of browser local storage.

use crate::domain::error::JournalError;

pub trait StoragePort {
    /// Returns `Ok(None)` when nothing has been stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, JournalError>;

    /// Replaces any prior value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), JournalError>;
}
