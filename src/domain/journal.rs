//! The trade store: the authoritative ordered trade log.
//!
//! Every successful mutation is written straight through to the storage port.
//! A failed write is logged and dropped; the in-memory log stays the source
//! of truth for the rest of the session and nothing is retried. Callers that
//! need stricter durability can call [`TradeStore::persist`] themselves and
//! inspect the result.

use crate::domain::error::{JournalError, ValidationError};
use crate::domain::trade::{TradeInput, TradeRecord};
use crate::ports::storage_port::StoragePort;
use chrono::Utc;

/// Storage key the browser version of the journal used.
pub const DEFAULT_STORAGE_KEY: &str = "ictTrades";

pub struct TradeStore<S: StoragePort> {
    storage: S,
    key: String,
    records: Vec<TradeRecord>,
    last_id: i64,
}

impl<S: StoragePort> TradeStore<S> {
    /// Builds the store and fills it from whatever is persisted under `key`.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            records: Vec::new(),
            last_id: 0,
        };
        store.records = store.load();
        store.last_id = store.records.iter().map(|r| r.id).max().unwrap_or(0);
        store
    }

    /// Reads the persisted log. Missing or unreadable data yields an empty log;
    /// individual records that fail to parse are skipped.
    pub fn load(&self) -> Vec<TradeRecord> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "storage unavailable, starting empty");
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                let err = JournalError::Deserialization {
                    key: self.key.clone(),
                    reason: e.to_string(),
                };
                tracing::warn!(error = %err, "discarding unreadable trade log");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<TradeRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key = %self.key, index, error = %e, "skipping unreadable trade");
                    None
                }
            })
            .collect()
    }

    /// Validates and appends a new trade, then persists the log.
    pub fn add(&mut self, candidate: TradeInput) -> Result<TradeRecord, ValidationError> {
        let record = candidate.into_record(self.next_id())?;
        self.last_id = self.last_id.max(record.id);
        self.records.push(record.clone());
        self.persist_quietly();
        Ok(record)
    }

    /// Removes the trade with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return false;
        }
        self.persist_quietly();
        true
    }

    /// Writes the full log under the store's key, overwriting the prior value.
    pub fn persist(&self) -> Result<(), JournalError> {
        let body =
            serde_json::to_string(&self.records).map_err(|e| JournalError::Persistence {
                key: self.key.clone(),
                reason: e.to_string(),
            })?;
        self.storage.write(&self.key, &body)?;
        tracing::debug!(key = %self.key, trades = self.records.len(), "trade log persisted");
        Ok(())
    }

    fn persist_quietly(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "trade log not persisted; keeping in-memory state");
        }
    }

    /// Millisecond timestamp, bumped past the last issued id when the clock
    /// has not moved on. Once the id space is exhausted, walks down to the
    /// nearest free id.
    fn next_id(&self) -> i64 {
        let mut id = Utc::now().timestamp_millis().max(self.last_id.saturating_add(1));
        while self.get(id).is_some() {
            id -= 1;
        }
        id
    }

    /// Records in storage (insertion) order.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Records newest first, as the log is displayed.
    pub fn display_order(&self) -> impl Iterator<Item = &TradeRecord> {
        self.records.iter().rev()
    }

    pub fn get(&self, id: i64) -> Option<&TradeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
